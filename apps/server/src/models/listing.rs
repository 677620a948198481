//! Property listing records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::loose::{parse_flag, Loose};
use crate::{Error, Result};

/// Geocoordinate pair, kept exactly as submitted (decimal strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: String,
    pub long: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenity {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub category: String,
    pub place_name: String,
    pub distance: String,
}

/// A property listing as stored and as returned to clients.
///
/// Numeric-semantic attributes (`total_area`, `expect_price`, `floor_no`, `bedrooms`,
/// `bathrooms`) are text; search compares them through a numeric projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    #[serde(rename = "propertytype")]
    pub property_type: String,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    #[serde(rename = "residentialtype")]
    pub residential_type: Option<String>,
    #[serde(rename = "commercialtype")]
    pub commercial_type: Option<String>,
    #[serde(rename = "saletype")]
    pub sale_type: Option<String>,
    #[serde(rename = "sellertype")]
    pub seller_type: Option<String>,
    #[serde(rename = "Facing")]
    pub facing: Option<String>,
    #[serde(rename = "Dimensions")]
    pub dimensions: Option<String>,
    #[serde(rename = "totalarea")]
    pub total_area: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub landmark: Option<String>,
    #[serde(rename = "googleaddress")]
    pub geo: GeoPoint,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub furnishing: Option<String>,
    #[serde(rename = "possessionstatus")]
    pub possession_status: Option<String>,
    #[serde(rename = "approvalauthority")]
    pub approval_authority: Option<String>,
    #[serde(rename = "reraregistered")]
    pub rera_registered: bool,
    pub amenities: Vec<Amenity>,
    pub expect_price: Option<String>,
    #[serde(rename = "booking_tokenamount")]
    pub booking_token_amount: Option<String>,
    #[serde(rename = "nearbyplace")]
    pub nearby_places: Vec<NearbyPlace>,
    pub floor_no: Option<String>,
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    #[serde(rename = "customerNumber")]
    pub customer_number: Option<String>,
    #[serde(rename = "propertyimage")]
    pub images: Vec<String>,
    pub office_seats: Option<i32>,
    pub acre: Option<String>,
    pub kunte: Option<String>,
    pub diet: Option<String>,
    pub bachelor_allowed: Option<bool>,
    pub occupancy_type: Option<String>,
    pub food_provided: Option<bool>,
    #[serde(rename = "profession_Type")]
    pub profession_type: Option<String>,
    pub favorite: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Listing attributes submitted by a create or update request.
///
/// Every field is optional here: `None` means "not supplied". Creation additionally
/// requires `property_type` and `geo` (see [`NewListing::try_from_fields`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFields {
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub residential_type: Option<String>,
    pub commercial_type: Option<String>,
    pub sale_type: Option<String>,
    pub seller_type: Option<String>,
    pub facing: Option<String>,
    pub dimensions: Option<String>,
    pub total_area: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub landmark: Option<String>,
    pub geo: Option<GeoPoint>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub furnishing: Option<String>,
    pub possession_status: Option<String>,
    pub approval_authority: Option<String>,
    pub rera_registered: Option<bool>,
    pub amenities: Option<Vec<Amenity>>,
    pub expect_price: Option<String>,
    pub booking_token_amount: Option<String>,
    pub nearby_places: Option<Vec<NearbyPlace>>,
    pub floor_no: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_number: Option<String>,
    pub images: Option<Vec<String>>,
    pub office_seats: Option<i32>,
    pub acre: Option<String>,
    pub kunte: Option<String>,
    pub diet: Option<String>,
    pub bachelor_allowed: Option<bool>,
    pub occupancy_type: Option<String>,
    pub food_provided: Option<bool>,
    pub profession_type: Option<String>,
    pub favorite: Option<bool>,
}

/// Amenities arrive either as `[{"name": "pool"}]` or as `["pool"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AmenityInput {
    Named { name: String },
    Bare(String),
}

#[derive(Deserialize)]
struct NearbyPlaceInput {
    category: String,
    place_name: String,
    distance: Loose,
}

#[derive(Deserialize)]
struct GeoInput {
    lat: Loose,
    long: Loose,
}

impl ListingFields {
    /// Build from the text fields of a multipart form.
    ///
    /// `amenities`, `nearbyplace` and `googleaddress` carry JSON documents as strings.
    /// Unknown form fields are ignored.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self> {
        let text = |key: &str| form.get(key).map(|v| v.trim().to_string());
        let flag = |key: &str| -> Result<Option<bool>> {
            match form.get(key) {
                Some(raw) => parse_flag(raw).map_err(|reason| {
                    Error::Validation(format!("Invalid value for {key}: {reason}"))
                }),
                None => Ok(None),
            }
        };

        let office_seats = match form.get("office_seats").map(|v| v.trim()) {
            Some("") | None => None,
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
                Error::Validation(format!("Invalid value for office_seats: '{raw}'"))
            })?),
        };

        Ok(Self {
            property_type: text("propertytype"),
            listing_type: text("type"),
            residential_type: text("residentialtype"),
            commercial_type: text("commercialtype"),
            sale_type: text("saletype"),
            seller_type: text("sellertype"),
            facing: text("Facing"),
            dimensions: text("Dimensions"),
            total_area: text("totalarea"),
            city: text("city"),
            address: text("address"),
            landmark: text("landmark"),
            geo: form
                .get("googleaddress")
                .map(|raw| parse_geo(raw))
                .transpose()?,
            bedrooms: text("bedrooms"),
            bathrooms: text("bathrooms"),
            furnishing: text("furnishing"),
            possession_status: text("possessionstatus"),
            approval_authority: text("approvalauthority"),
            rera_registered: flag("reraregistered")?,
            amenities: form
                .get("amenities")
                .map(|raw| parse_amenities(raw))
                .transpose()?,
            expect_price: text("expect_price"),
            booking_token_amount: text("booking_tokenamount"),
            nearby_places: form
                .get("nearbyplace")
                .map(|raw| parse_nearby_places(raw))
                .transpose()?,
            floor_no: text("floor_no"),
            customer_id: text("customerId"),
            customer_name: text("customerName"),
            customer_number: text("customerNumber"),
            images: None,
            office_seats,
            acre: text("acre"),
            kunte: text("kunte"),
            diet: text("diet"),
            bachelor_allowed: flag("bachelor_allowed")?,
            occupancy_type: text("occupancy_type"),
            food_provided: flag("food_provided")?,
            profession_type: text("profession_Type"),
            favorite: flag("favorite")?,
        })
    }
}

fn json_field<T: serde::de::DeserializeOwned>(field: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidJson {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

fn parse_geo(raw: &str) -> Result<GeoPoint> {
    let input: GeoInput = json_field("googleaddress", raw)?;
    match (input.lat.text(), input.long.text()) {
        (Some(lat), Some(long)) => Ok(GeoPoint { lat, long }),
        _ => Err(Error::Validation(
            "googleaddress requires both lat and long".to_string(),
        )),
    }
}

fn parse_amenities(raw: &str) -> Result<Vec<Amenity>> {
    let items: Vec<AmenityInput> = json_field("amenities", raw)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            AmenityInput::Named { name } | AmenityInput::Bare(name) => name.trim().to_string(),
        })
        .filter(|name| !name.is_empty())
        .map(|name| Amenity { name })
        .collect())
}

fn parse_nearby_places(raw: &str) -> Result<Vec<NearbyPlace>> {
    let items: Vec<NearbyPlaceInput> = json_field("nearbyplace", raw)?;
    Ok(items
        .into_iter()
        .map(|item| NearbyPlace {
            category: item.category.trim().to_string(),
            place_name: item.place_name.trim().to_string(),
            distance: item.distance.text().unwrap_or_default(),
        })
        .collect())
}

/// Validated creation payload.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub property_type: String,
    pub geo: GeoPoint,
    pub fields: ListingFields,
}

impl NewListing {
    pub fn try_from_fields(fields: ListingFields) -> Result<Self> {
        let property_type = fields
            .property_type
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Validation("propertytype is required".to_string()))?;
        let geo = fields
            .geo
            .clone()
            .ok_or_else(|| Error::Validation("googleaddress is required".to_string()))?;
        Ok(Self {
            property_type,
            geo,
            fields,
        })
    }
}
