//! Favorite routes, nested under `/api/favorites`

use crate::api::handlers::favorites;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(favorites::toggle_favorite))
        .route("/:customerId", get(favorites::list_favorites))
}
