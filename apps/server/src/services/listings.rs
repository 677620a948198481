//! Listing service - create, read, update, delete and the owner-facing lookups

use std::collections::HashMap;

use uuid::Uuid;

use crate::db::{ListingFilter, ListingStore, PostgresListingStore};
use crate::models::{Listing, ListingFields, NewListing};
use crate::{Error, Result};

const NOT_FOUND: &str = "Property not found";

/// Coordinates listing persistence. Uploaded image paths are handed in by the caller.
#[derive(Clone)]
pub struct ListingService<S: ListingStore = PostgresListingStore> {
    store: S,
}

impl<S: ListingStore> ListingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All listings, newest first.
    pub async fn list_all(&self) -> Result<Vec<Listing>> {
        self.store.find(&ListingFilter::default()).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Listing> {
        self.store
            .read(id)
            .await?
            .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))
    }

    /// Create a listing from submitted form fields.
    ///
    /// `propertytype` and a complete `googleaddress` are required.
    pub async fn create(
        &self,
        form: &HashMap<String, String>,
        images: Vec<String>,
    ) -> Result<Listing> {
        if form.is_empty() && images.is_empty() {
            return Err(Error::Validation("No listing fields provided".to_string()));
        }

        let fields = ListingFields::from_form(form)?;
        let new_listing = NewListing::try_from_fields(fields)?;
        let listing = self.store.create(new_listing, images).await?;

        tracing::info!(
            listing_id = %listing.id,
            property_type = %listing.property_type,
            images = listing.images.len(),
            "Listing created"
        );
        Ok(listing)
    }

    /// Apply the supplied fields; a non-empty `images` replaces the stored image list.
    pub async fn update(
        &self,
        id: Uuid,
        form: &HashMap<String, String>,
        images: Vec<String>,
    ) -> Result<Listing> {
        let fields = ListingFields::from_form(form)?;
        if matches!(&fields.property_type, Some(v) if v.is_empty()) {
            return Err(Error::Validation("propertytype cannot be empty".to_string()));
        }

        let images = if images.is_empty() { None } else { Some(images) };
        let listing = self
            .store
            .update(id, fields, images)
            .await?
            .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))?;

        tracing::info!(listing_id = %listing.id, "Listing updated");
        Ok(listing)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::NotFound(NOT_FOUND.to_string()));
        }
        tracing::info!(listing_id = %id, "Listing deleted");
        Ok(())
    }

    /// Flip the listing's own favorite flag, returning the new value.
    pub async fn toggle_favorite_flag(&self, id: Uuid) -> Result<bool> {
        self.store
            .toggle_favorite(id)
            .await?
            .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn by_city(&self, city: &str) -> Result<Vec<Listing>> {
        let city = required_param("city", city)?;
        self.store
            .find(&ListingFilter {
                city: Some(city),
                ..Default::default()
            })
            .await
    }

    pub async fn by_type(&self, listing_type: &str) -> Result<Vec<Listing>> {
        let listing_type = required_param("type", listing_type)?;
        self.store
            .find(&ListingFilter {
                listing_type: Some(listing_type),
                ..Default::default()
            })
            .await
    }

    /// A listing that also belongs to `customer_id` and has the given listing type.
    pub async fn get_owned(&self, id: Uuid, customer_id: &str, listing_type: &str) -> Result<Listing> {
        self.find_one(ListingFilter {
            id: Some(id),
            customer_id: Some(customer_id.to_string()),
            listing_type: Some(listing_type.to_string()),
            ..Default::default()
        })
        .await
    }

    pub async fn get_with_type(&self, id: Uuid, listing_type: &str) -> Result<Listing> {
        self.find_one(ListingFilter {
            id: Some(id),
            listing_type: Some(listing_type.to_string()),
            ..Default::default()
        })
        .await
    }

    /// The customer's own listings that carry the favorite flag.
    pub async fn owner_favorites(&self, customer_id: &str) -> Result<Vec<Listing>> {
        self.store
            .find(&ListingFilter {
                customer_id: Some(customer_id.to_string()),
                favorite: Some(true),
                ..Default::default()
            })
            .await
    }

    async fn find_one(&self, filter: ListingFilter) -> Result<Listing> {
        self.store
            .find(&filter)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(NOT_FOUND.to_string()))
    }
}

fn required_param(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!(
            "{name} query parameter is required"
        )));
    }
    Ok(value.to_string())
}
