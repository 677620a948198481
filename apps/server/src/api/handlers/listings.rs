//! Listing handlers
//!
//! Handlers coordinate between routes and the listing service:
//! - Path/query extraction and id parsing
//! - Multipart or JSON body decoding (see [`crate::api::forms`])
//! - Response envelopes

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use serde_json::json;

use crate::api::forms::read_listing_form;
use crate::models::parse_id;
use crate::state::AppState;
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type", default)]
    pub listing_type: String,
}

/// GET /properties
pub async fn list_properties(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let listings = state.listing_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": listings })))
}

/// GET /properties/:id
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id, "property id")?;
    let listing = state.listing_service.get(id).await?;
    Ok(Json(json!({ "success": true, "data": listing })))
}

/// POST /properties
///
/// Returns 201 with the stored listing. Images uploaded before a failure are removed.
pub async fn create_property(
    State(state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse> {
    let form = read_listing_form(&state, request).await?;

    match state.listing_service.create(&form.fields, form.images.clone()).await {
        Ok(listing) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "Property created successfully",
                "property": listing,
            })),
        )),
        Err(e) => {
            state.uploads.discard(&form.images).await;
            Err(e)
        }
    }
}

/// PUT /properties/:id
///
/// When new images are uploaded they replace the stored ones, whose files are removed.
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id, "property id")?;
    let form = read_listing_form(&state, request).await?;

    let updated = async {
        let previous = state.listing_service.get(id).await?;
        let listing = state
            .listing_service
            .update(id, &form.fields, form.images.clone())
            .await?;
        Ok::<_, Error>((previous, listing))
    }
    .await;

    match updated {
        Ok((previous, listing)) => {
            if !form.images.is_empty() {
                state.uploads.discard(&previous.images).await;
            }
            Ok(Json(json!({
                "message": "Property updated successfully",
                "property": listing,
            })))
        }
        Err(e) => {
            state.uploads.discard(&form.images).await;
            Err(e)
        }
    }
}

/// DELETE /properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&id, "property id")?;
    let listing = state.listing_service.get(id).await?;
    state.listing_service.delete(id).await?;
    state.uploads.discard(&listing.images).await;
    Ok(Json(json!({ "message": "Property deleted successfully" })))
}

/// GET /properties/city?city=
pub async fn properties_by_city(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<impl IntoResponse> {
    let listings = state.listing_service.by_city(&query.city).await?;
    Ok(Json(json!({ "success": true, "data": listings })))
}

/// GET /properties/type?type=
pub async fn properties_by_type(
    State(state): State<AppState>,
    Query(query): Query<TypeQuery>,
) -> Result<impl IntoResponse> {
    let listings = state.listing_service.by_type(&query.listing_type).await?;
    Ok(Json(json!({ "success": true, "data": listings })))
}

/// GET /properties/:propertyId/:customerId/:type
pub async fn owned_property(
    State(state): State<AppState>,
    Path((property_id, customer_id, listing_type)): Path<(String, String, String)>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&property_id, "property id")?;
    let listing = state
        .listing_service
        .get_owned(id, &customer_id, &listing_type)
        .await?;
    Ok(Json(json!({ "success": true, "data": listing })))
}

/// GET /getPropertyByIDandType/:propertyId/:type
pub async fn property_with_type(
    State(state): State<AppState>,
    Path((property_id, listing_type)): Path<(String, String)>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&property_id, "property id")?;
    let listing = state
        .listing_service
        .get_with_type(id, &listing_type)
        .await?;
    Ok(Json(json!({ "success": true, "data": listing })))
}

/// PUT /favorite/:propertyId - flips the listing's own flag
pub async fn toggle_favorite_flag(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&property_id, "property id")?;
    let favorite = state.listing_service.toggle_favorite_flag(id).await?;
    Ok(Json(json!({
        "message": format!("Favorite status updated to {}", favorite),
        "favorite": favorite,
    })))
}

/// GET /property/favorites/:customerId
pub async fn owner_favorites(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse> {
    let listings = state.listing_service.owner_favorites(&customer_id).await?;
    Ok(Json(json!({ "success": true, "data": listings })))
}
