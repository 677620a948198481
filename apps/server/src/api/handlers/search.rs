//! Listing search handler

use axum::{extract::State, response::Json};

use crate::api::extractors::ApiJson;
use crate::db::search::SearchCriteria;
use crate::services::SearchResults;
use crate::state::AppState;
use crate::Result;

/// POST /search
///
/// - 200 with `{success, totalCount, currentPage, totalPages, listings}`
/// - 400 for criteria that cannot be interpreted (bad booleans, non-numeric bounds)
pub async fn search_properties(
    State(state): State<AppState>,
    ApiJson(criteria): ApiJson<SearchCriteria>,
) -> Result<Json<SearchResults>> {
    let results = state.search_service.search(&criteria).await?;
    Ok(Json(results))
}
