//! Favorites service - customer/listing toggles

use std::collections::HashMap;

use uuid::Uuid;
use validator::Validate;

use crate::db::{FavoriteRepository, ListingStore, PostgresListingStore};
use crate::models::{parse_id, FavoriteWithListing, Listing, ToggleFavorite, ToggleOutcome};
use crate::{Error, Result};

#[derive(Clone)]
pub struct FavoriteService<S: ListingStore = PostgresListingStore> {
    repo: FavoriteRepository,
    listings: S,
}

impl<S: ListingStore> FavoriteService<S> {
    pub fn new(repo: FavoriteRepository, listings: S) -> Self {
        Self { repo, listings }
    }

    /// Add the (customer, listing) pair when absent, remove it when present.
    pub async fn toggle(&self, request: ToggleFavorite) -> Result<ToggleOutcome> {
        request.validate()?;
        let listing_id = parse_id(&request.property_id, "propertyId")?;

        if self.listings.read(listing_id).await?.is_none() {
            return Err(Error::NotFound("Property not found".to_string()));
        }

        let outcome = self
            .repo
            .toggle(&request.customer_id, &request.customer_name, listing_id)
            .await?;

        tracing::info!(
            customer_id = %request.customer_id,
            listing_id = %listing_id,
            favorited = outcome.favorited(),
            "Favorite toggled"
        );
        Ok(outcome)
    }

    /// The customer's favorites with their listings, newest favorite first.
    pub async fn list(&self, customer_id: &str) -> Result<Vec<FavoriteWithListing>> {
        let favorites = self.repo.list_for_customer(customer_id).await?;
        let ids: Vec<Uuid> = favorites.iter().map(|f| f.listing_id).collect();
        let mut listings = index_by_id(self.listings.load_batch(&ids).await?);

        Ok(favorites
            .into_iter()
            .filter_map(|favorite| {
                let property = listings.remove(&favorite.listing_id)?;
                Some(FavoriteWithListing {
                    customer_id: favorite.customer_id,
                    customer_name: favorite.customer_name,
                    property,
                })
            })
            .collect())
    }
}

pub(crate) fn index_by_id(listings: Vec<Listing>) -> HashMap<Uuid, Listing> {
    listings.into_iter().map(|l| (l.id, l)).collect()
}
