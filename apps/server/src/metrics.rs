//! Metrics collection for the listing service
//!
//! Prometheus metrics registered in the default registry and exposed on `/metrics`.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "estatehub_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "estatehub_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "estatehub_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    /// Request body size; multipart uploads dominate the upper buckets.
    pub static ref HTTP_REQUEST_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "estatehub_http_request_size_bytes",
        "HTTP request body size in bytes",
        &["method", "path"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0, 100_000_000.0]
    )
    .expect("Failed to register HTTP_REQUEST_SIZE_BYTES");

    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "estatehub_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Listing Search Metrics

    /// Listing searches by outcome (`success`, `client_error`, `server_error`)
    pub static ref LISTING_SEARCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "estatehub_listing_search_total",
        "Total number of listing searches",
        &["status"]
    )
    .expect("Failed to register LISTING_SEARCH_TOTAL");

    /// Total matches per search, before paging
    pub static ref LISTING_SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "estatehub_listing_search_results",
        "Number of listings matching a search",
        &["sort"],
        vec![0.0, 1.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0]
    )
    .expect("Failed to register LISTING_SEARCH_RESULTS");

    pub static ref LISTING_SEARCH_CLAUSES: HistogramVec = register_histogram_vec!(
        "estatehub_listing_search_clauses",
        "Number of filter clauses compiled per search",
        &["sort"],
        vec![0.0, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0]
    )
    .expect("Failed to register LISTING_SEARCH_CLAUSES");

    /// Uploaded listing images by outcome
    pub static ref LISTING_IMAGE_UPLOADS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "estatehub_listing_image_uploads_total",
        "Total number of listing image uploads",
        &["status"]
    )
    .expect("Failed to register LISTING_IMAGE_UPLOADS_TOTAL");

    // Database Metrics

    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "estatehub_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "estatehub_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");

    // Record Metrics

    /// Stored records by kind (`listing`, `favorite`, `enquiry`, `user`, `admin`)
    pub static ref RECORDS_TOTAL: IntGaugeVec = register_int_gauge_vec!(
        "estatehub_records_total",
        "Total number of stored records by kind",
        &["kind"]
    )
    .expect("Failed to register RECORDS_TOTAL");
}

/// Literal route segments. Anything else in an `/api` path is an identifier.
const ROUTE_SEGMENTS: &[&str] = &[
    "api",
    "sell",
    "properties",
    "city",
    "type",
    "search",
    "favorite",
    "property",
    "favorites",
    "toggle",
    "getPropertyByIDandType",
    "enquiry",
    "enquiries",
    "accept",
    "reject",
    "customer",
    "accepted",
    "rejected",
    "getallenquiries",
    "users",
    "admin",
    "signup",
    "signin",
    "alluser",
    "updateusers",
];

/// Helper to sanitize path for metrics labels (remove IDs, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.first() {
        None => "/".to_string(),
        Some(&"api") => {
            let labelled: Vec<&str> = segments
                .iter()
                .map(|segment| {
                    if ROUTE_SEGMENTS.contains(segment) {
                        *segment
                    } else {
                        "{id}"
                    }
                })
                .collect();
            format!("/{}", labelled.join("/"))
        }
        // Static files and service endpoints: the first segment is enough
        Some(first) => format!("/{}", first),
    }
}

/// Record kind an `/api` path operates on, for span fields.
pub fn resource_for_path(path: &str) -> Option<&'static str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    if segments.next() != Some("api") {
        return None;
    }
    match segments.next()? {
        "sell" if segments.next() == Some("search") => Some("search"),
        "sell" => Some("listing"),
        "favorites" => Some("favorite"),
        "enquiry" => Some("enquiry"),
        "users" => Some("user"),
        "admin" => Some("admin"),
        _ => None,
    }
}

/// Label for a response status in the search and upload counters.
pub fn outcome_label(status: u16) -> &'static str {
    match status {
        200..=399 => "success",
        400..=499 => "client_error",
        _ => "server_error",
    }
}
