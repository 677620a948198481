//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();
    let public_path = state.config.storage.public_path.trim_end_matches('/').to_string();
    let images = middleware::uploaded_images(state.uploads.dir());
    let security_state = state.clone();

    Router::new()
        .route("/health", get(handlers::service::health_check))
        .route("/", get(handlers::service::root))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/metrics", get(handlers::service::metrics_handler))
        .nest("/api/sell", routes::listings::listing_routes())
        .nest("/api/favorites", routes::favorites::favorite_routes())
        .nest("/api/enquiry", routes::enquiries::enquiry_routes())
        .nest("/api/users", routes::accounts::user_routes())
        .nest("/api/admin", routes::accounts::admin_routes())
        .nest_service(&public_path, images)
        .with_state(state)
        // Applied in reverse order
        .layer(axum::middleware::from_fn_with_state(
            security_state,
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(middleware::compression())
        .layer(middleware::cors(&cors_origins))
        // Multipart uploads are bounded by this too
        .layer(DefaultBodyLimit::max(max_body_size))
}
