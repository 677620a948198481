use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::listing::Listing;
use super::loose::deserialize_text;

/// A contact request from a user about a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "propertyId")]
    pub listing_id: Uuid,
    /// `None` until the listing owner accepts or rejects.
    pub accepted: Option<bool>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// An enquiry together with the listing it refers to.
#[derive(Debug, Clone, Serialize)]
pub struct EnquiryWithListing {
    #[serde(flatten)]
    pub enquiry: Enquiry,
    pub property: Listing,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEnquiry {
    #[serde(rename = "userName", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub user_name: String,
    #[serde(rename = "phoneNumber", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[serde(rename = "userId", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(rename = "propertyId", default, deserialize_with = "deserialize_text")]
    #[validate(length(min = 1))]
    pub property_id: String,
}

/// Enquiry review states used by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryState {
    Accepted,
    Rejected,
}

impl EnquiryState {
    pub fn as_flag(self) -> bool {
        matches!(self, EnquiryState::Accepted)
    }
}
