//! Request ID middleware with OpenTelemetry trace context injection

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::metrics::{resource_for_path, sanitize_path};

/// Creates the root span for each HTTP request and:
/// - generates a server request id, returned as `x-request-id`
/// - echoes a differing client `x-request-id` back as `x-correlation-id`
/// - returns the trace id as `x-trace-id`
///
/// Server errors are logged at error level; everything else at info.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %sanitize_path(req.uri().path()),
        otel.kind = "server",
        estatehub.resource = tracing::field::Empty,
        http.response.status_code = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let server_id = Uuid::new_v4().to_string();
    span.record("request_id", &server_id);

    let method = req.method().clone();
    let route = sanitize_path(req.uri().path());
    if let Some(resource) = resource_for_path(req.uri().path()) {
        span.record("estatehub.resource", resource);
    }
    tracing::debug!(method = %method, route = %route, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis();
    span.record("http.response.status_code", status);
    if response.status().is_server_error() {
        tracing::error!(method = %method, route = %route, status, elapsed_ms, "Request failed");
    } else {
        tracing::info!(method = %method, route = %route, status, elapsed_ms, "Request completed");
    }

    let trace_id = span.context().span().span_context().trace_id().to_string();
    set_ids(response.headers_mut(), &server_id, &trace_id, client_id);
    response
}

fn set_ids(headers: &mut HeaderMap, server_id: &str, trace_id: &str, client_id: Option<String>) {
    let pairs = [
        ("x-request-id", Some(server_id.to_string())),
        ("x-trace-id", Some(trace_id.to_string())),
        (
            "x-correlation-id",
            client_id.filter(|id| id.as_str() != server_id),
        ),
    ];
    for (name, value) in pairs {
        if let Some(value) = value.and_then(|v| HeaderValue::from_str(&v).ok()) {
            headers.insert(name, value);
        }
    }
}
