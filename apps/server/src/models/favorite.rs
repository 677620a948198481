use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::listing::Listing;
use super::loose::deserialize_text;

/// Join record between a customer and a listing they favorited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "propertyId")]
    pub listing_id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteWithListing {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub property: Listing,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleFavorite {
    #[serde(rename = "customerId", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub customer_id: String,
    #[serde(rename = "customerName", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub customer_name: String,
    #[serde(rename = "propertyId", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub property_id: String,
}

/// Outcome of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn favorited(self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }
}
