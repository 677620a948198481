//! Service endpoints: health, info and Prometheus metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;

use crate::state::AppState;

/// GET /health - 503 when the database does not answer
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.metrics_service.database_reachable().await {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "service": "estatehub", "database": "up" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "service": "estatehub", "database": "down" })),
        )
    }
}

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "server": "EstateHub listing service",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.logging.deployment_environment,
        "status": "running"
    }))
}

/// GET /metrics - Prometheus text format
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    // Sampled gauges must be fresh before the registry is gathered.
    let service_info = state
        .metrics_service
        .collect_custom_metrics(env!("CARGO_PKG_VERSION"))
        .await;

    let mut buffer = vec![];
    match TextEncoder::new().encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => {
            buffer.extend_from_slice(service_info.as_bytes());
            (
                StatusCode::OK,
                [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
                buffer,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}
