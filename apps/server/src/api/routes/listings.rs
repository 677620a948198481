//! Listing routes, nested under `/api/sell`
//!
//! Literal segments (`/properties/city`, `/properties/type`) take precedence over the
//! `:id` capture at the same position.

use crate::api::handlers::{listings, search};
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/properties",
            get(listings::list_properties).post(listings::create_property),
        )
        .route("/properties/city", get(listings::properties_by_city))
        .route("/properties/type", get(listings::properties_by_type))
        .route(
            "/properties/:id",
            get(listings::get_property)
                .put(listings::update_property)
                .delete(listings::delete_property),
        )
        .route(
            "/properties/:propertyId/:customerId/:type",
            get(listings::owned_property),
        )
        .route(
            "/getPropertyByIDandType/:propertyId/:type",
            get(listings::property_with_type),
        )
        .route("/favorite/:propertyId", put(listings::toggle_favorite_flag))
        .route(
            "/property/favorites/:customerId",
            get(listings::owner_favorites),
        )
        .route("/search", post(search::search_properties))
}
