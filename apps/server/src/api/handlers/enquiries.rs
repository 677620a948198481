//! Enquiry handlers

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::api::extractors::ApiJson;
use crate::db::EnquiryScope;
use crate::models::{parse_id, CreateEnquiry, EnquiryState};
use crate::state::AppState;
use crate::Result;

/// POST /enquiries
pub async fn create_enquiry(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEnquiry>,
) -> Result<impl IntoResponse> {
    let enquiry = state.enquiry_service.create(request).await?;
    Ok(Json(json!({
        "message": "Enquiry created successfully!",
        "data": enquiry,
    })))
}

/// GET /enquiries
pub async fn list_enquiries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let enquiries = state.enquiry_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": enquiries })))
}

/// GET /enquiries/:userId
pub async fn user_enquiries(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse> {
    scoped(&state, EnquiryScope::ByUser(user_id)).await
}

/// GET /enquiries/customer/:customerId - enquiries on the customer's own listings
pub async fn owner_enquiries(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse> {
    scoped(&state, EnquiryScope::ByListingOwner(customer_id)).await
}

/// GET /accepted
pub async fn accepted_enquiries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    scoped(&state, EnquiryScope::ByState(true)).await
}

/// GET /rejected
pub async fn rejected_enquiries(State(state): State<AppState>) -> Result<impl IntoResponse> {
    scoped(&state, EnquiryScope::ByState(false)).await
}

/// GET /getallenquiries
pub async fn all_enquiries_with_listings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    scoped(&state, EnquiryScope::All).await
}

/// PUT /enquiries/accept/:enquiryId
pub async fn accept_enquiry(
    State(state): State<AppState>,
    Path(enquiry_id): Path<String>,
) -> Result<impl IntoResponse> {
    decide(&state, &enquiry_id, EnquiryState::Accepted).await
}

/// PUT /enquiries/reject/:enquiryId
pub async fn reject_enquiry(
    State(state): State<AppState>,
    Path(enquiry_id): Path<String>,
) -> Result<impl IntoResponse> {
    decide(&state, &enquiry_id, EnquiryState::Rejected).await
}

async fn scoped(state: &AppState, scope: EnquiryScope) -> Result<Json<serde_json::Value>> {
    let enquiries = state.enquiry_service.list_with_listings(&scope).await?;
    Ok(Json(json!({ "success": true, "data": enquiries })))
}

async fn decide(
    state: &AppState,
    enquiry_id: &str,
    decision: EnquiryState,
) -> Result<Json<serde_json::Value>> {
    let id = parse_id(enquiry_id, "enquiry id")?;
    let enquiry = state.enquiry_service.decide(id, decision).await?;
    let message = match decision {
        EnquiryState::Accepted => "Enquiry accepted",
        EnquiryState::Rejected => "Enquiry rejected",
    };
    Ok(Json(json!({ "message": message, "data": enquiry })))
}
