//! Enquiry routes, nested under `/api/enquiry`

use crate::api::handlers::enquiries;
use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};

pub fn enquiry_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/enquiries",
            get(enquiries::list_enquiries).post(enquiries::create_enquiry),
        )
        .route("/enquiries/:userId", get(enquiries::user_enquiries))
        .route(
            "/enquiries/accept/:enquiryId",
            put(enquiries::accept_enquiry),
        )
        .route(
            "/enquiries/reject/:enquiryId",
            put(enquiries::reject_enquiry),
        )
        .route(
            "/enquiries/customer/:customerId",
            get(enquiries::owner_enquiries),
        )
        .route("/accepted", get(enquiries::accepted_enquiries))
        .route("/rejected", get(enquiries::rejected_enquiries))
        .route(
            "/getallenquiries",
            get(enquiries::all_enquiries_with_listings),
        )
}
