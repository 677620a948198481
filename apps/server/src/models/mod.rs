//! Domain models for the listing service

pub mod account;
pub mod enquiry;
pub mod favorite;
pub mod listing;
pub mod loose;

pub use account::{Admin, AdminRecord, Credentials, ProfileUpdate, User, UserRecord, UserSignup};
pub use enquiry::{CreateEnquiry, Enquiry, EnquiryState, EnquiryWithListing};
pub use favorite::{Favorite, FavoriteWithListing, ToggleFavorite, ToggleOutcome};
pub use listing::{Amenity, GeoPoint, Listing, ListingFields, NearbyPlace, NewListing};
pub use loose::{Loose, OneOrMany};

use uuid::Uuid;

/// Parse a record identifier taken from a path or body. Malformed ids are a client error.
pub fn parse_id(raw: &str, label: &str) -> crate::Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| crate::Error::Validation(format!("Invalid {label}: '{raw}'")))
}
