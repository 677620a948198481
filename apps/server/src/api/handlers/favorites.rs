//! Favorite toggle and listing handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::api::extractors::ApiJson;
use crate::models::{ToggleFavorite, ToggleOutcome};
use crate::state::AppState;
use crate::Result;

/// POST /toggle
///
/// 201 when the favorite was added, 200 when it was removed.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ToggleFavorite>,
) -> Result<impl IntoResponse> {
    let outcome = state.favorite_service.toggle(request).await?;

    let (status, message) = match outcome {
        ToggleOutcome::Added => (StatusCode::CREATED, "Added to favorites"),
        ToggleOutcome::Removed => (StatusCode::OK, "Removed from favorites"),
    };
    Ok((
        status,
        Json(json!({
            "success": true,
            "favorited": outcome.favorited(),
            "message": message,
        })),
    ))
}

/// GET /:customerId
pub async fn list_favorites(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse> {
    let favorites = state.favorite_service.list(&customer_id).await?;
    Ok(Json(json!({ "success": true, "data": favorites })))
}
