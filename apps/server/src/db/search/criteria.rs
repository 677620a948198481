//! Search criteria as sent by clients.
//!
//! Every field is optional and loosely typed. Field names follow the wire format of the
//! listing documents (`propertytype`, `Facing`, `expect_price_min`, ...). Unknown fields are
//! ignored so older clients keep working.

use serde::Deserialize;

use crate::models::{Loose, OneOrMany};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    // Exact-match scalars
    #[serde(rename = "propertytype")]
    pub property_type: Option<Loose>,
    #[serde(rename = "type")]
    pub listing_type: Option<Loose>,
    #[serde(rename = "Dimensions")]
    pub dimensions: Option<Loose>,
    pub city: Option<Loose>,
    #[serde(rename = "booking_tokenamount")]
    pub booking_token_amount: Option<Loose>,
    #[serde(rename = "customerId")]
    pub customer_id: Option<Loose>,
    #[serde(rename = "customerNumber")]
    pub customer_number: Option<Loose>,
    pub acre: Option<Loose>,
    pub kunte: Option<Loose>,
    pub diet: Option<Loose>,
    pub office_seats: Option<Loose>,

    // Set membership
    #[serde(rename = "residentialtype")]
    pub residential_type: Option<OneOrMany>,
    #[serde(rename = "commercialtype")]
    pub commercial_type: Option<OneOrMany>,
    #[serde(rename = "saletype")]
    pub sale_type: Option<OneOrMany>,
    #[serde(rename = "sellertype")]
    pub seller_type: Option<OneOrMany>,
    #[serde(rename = "Facing")]
    pub facing: Option<OneOrMany>,
    pub furnishing: Option<OneOrMany>,
    pub bedrooms: Option<OneOrMany>,
    pub bathrooms: Option<OneOrMany>,
    #[serde(rename = "possessionstatus")]
    pub possession_status: Option<OneOrMany>,
    #[serde(rename = "approvalauthority")]
    pub approval_authority: Option<OneOrMany>,
    pub occupancy_type: Option<OneOrMany>,
    #[serde(rename = "profession_Type")]
    pub profession_type: Option<OneOrMany>,

    // Substring match
    pub address: Option<Loose>,
    pub landmark: Option<Loose>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<Loose>,

    // Flags
    pub favorite: Option<Loose>,
    #[serde(rename = "reraregistered")]
    pub rera_registered: Option<Loose>,
    pub bachelor_allowed: Option<Loose>,
    pub food_provided: Option<Loose>,

    // Numeric ranges
    #[serde(rename = "expect_price_min")]
    pub price_min: Option<Loose>,
    #[serde(rename = "expect_price_max")]
    pub price_max: Option<Loose>,
    #[serde(rename = "totalareaMin")]
    pub total_area_min: Option<Loose>,
    #[serde(rename = "totalareaMax")]
    pub total_area_max: Option<Loose>,
    pub floor_no_min: Option<Loose>,
    pub floor_no_max: Option<Loose>,

    #[serde(rename = "googleaddress")]
    pub geo: Option<GeoCriteria>,
    pub amenities: Option<AmenityCriteria>,
    #[serde(rename = "nearbyplace")]
    pub nearby_places: Option<NearbyCriteria>,

    #[serde(rename = "dateFilter")]
    pub date_filter: Option<Loose>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<Loose>,
    pub page: Option<Loose>,
    #[serde(alias = "pageSize")]
    pub limit: Option<Loose>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeoCriteria {
    pub lat: Option<Loose>,
    pub long: Option<Loose>,
}

/// Requested amenity: `"pool"` or `{"name": "pool"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmenityCriterion {
    Named { name: Loose },
    Bare(Loose),
}

impl AmenityCriterion {
    pub fn name(&self) -> Option<String> {
        match self {
            AmenityCriterion::Named { name } | AmenityCriterion::Bare(name) => name.text(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmenityCriteria {
    Many(Vec<AmenityCriterion>),
    One(AmenityCriterion),
}

impl AmenityCriteria {
    /// Requested tag names, blanks and duplicates removed.
    pub fn names(&self) -> Vec<String> {
        let items: Vec<&AmenityCriterion> = match self {
            AmenityCriteria::Many(items) => items.iter().collect(),
            AmenityCriteria::One(item) => vec![item],
        };
        let mut out = Vec::new();
        for name in items.into_iter().filter_map(AmenityCriterion::name) {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

/// One requested nearby-place pattern. Only the supplied parts must match.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NearbyPattern {
    pub category: Option<Loose>,
    pub place_name: Option<Loose>,
    pub distance: Option<Loose>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NearbyCriteria {
    Many(Vec<NearbyPattern>),
    One(NearbyPattern),
}

impl NearbyCriteria {
    pub fn patterns(&self) -> Vec<&NearbyPattern> {
        match self {
            NearbyCriteria::Many(items) => items.iter().collect(),
            NearbyCriteria::One(item) => vec![item],
        }
    }
}
