//! Core storage trait for listings

use crate::{
    models::{Listing, ListingFields, NewListing},
    Result,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Exact-match lookup over listings. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub id: Option<Uuid>,
    pub city: Option<String>,
    pub listing_type: Option<String>,
    pub customer_id: Option<String>,
    pub favorite: Option<bool>,
}

/// Storage operations for property listings.
///
/// Every mutation is a single-row statement; there is no cross-record transaction and
/// concurrent writers to the same listing are last-write-wins.
#[async_trait]
pub trait ListingStore: Send + Sync + Clone {
    /// Insert a listing with a server-assigned id and store-assigned timestamps.
    async fn create(&self, listing: NewListing, images: Vec<String>) -> Result<Listing>;

    /// * `Ok(None)` - no listing with this id
    async fn read(&self, id: Uuid) -> Result<Option<Listing>>;

    /// Apply the supplied fields only. `images`, when present, replaces the image list.
    ///
    /// Returns `Ok(None)` when the listing does not exist.
    async fn update(
        &self,
        id: Uuid,
        fields: ListingFields,
        images: Option<Vec<String>>,
    ) -> Result<Option<Listing>>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Flip the listing's own favorite flag and return the new value.
    async fn toggle_favorite(&self, id: Uuid) -> Result<Option<bool>>;

    /// Listings matching the filter, newest first.
    async fn find(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;

    /// Fetch several listings at once. Missing ids are skipped.
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Listing>>;
}
