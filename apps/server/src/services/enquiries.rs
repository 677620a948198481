//! Enquiry service - contact requests about listings

use uuid::Uuid;
use validator::Validate;

use super::favorites::index_by_id;
use crate::db::{EnquiryRepository, EnquiryScope, ListingStore, PostgresListingStore};
use crate::models::{parse_id, CreateEnquiry, Enquiry, EnquiryState, EnquiryWithListing};
use crate::{Error, Result};

#[derive(Clone)]
pub struct EnquiryService<S: ListingStore = PostgresListingStore> {
    repo: EnquiryRepository,
    listings: S,
}

impl<S: ListingStore> EnquiryService<S> {
    pub fn new(repo: EnquiryRepository, listings: S) -> Self {
        Self { repo, listings }
    }

    /// Record an enquiry. The decision starts unset.
    pub async fn create(&self, request: CreateEnquiry) -> Result<Enquiry> {
        request.validate()?;
        let listing_id = parse_id(&request.property_id, "propertyId")?;

        let enquiry = self
            .repo
            .create(
                &request.user_name,
                &request.phone_number,
                &request.user_id,
                listing_id,
            )
            .await?;

        tracing::info!(enquiry_id = %enquiry.id, listing_id = %listing_id, "Enquiry created");
        Ok(enquiry)
    }

    pub async fn list_all(&self) -> Result<Vec<Enquiry>> {
        self.repo.list(&EnquiryScope::All).await
    }

    /// Enquiries in scope, each paired with its listing.
    pub async fn list_with_listings(&self, scope: &EnquiryScope) -> Result<Vec<EnquiryWithListing>> {
        let enquiries = self.repo.list(scope).await?;
        let mut ids: Vec<Uuid> = enquiries.iter().map(|e| e.listing_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let listings = index_by_id(self.listings.load_batch(&ids).await?);

        Ok(enquiries
            .into_iter()
            .filter_map(|enquiry| {
                let property = listings.get(&enquiry.listing_id)?.clone();
                Some(EnquiryWithListing { enquiry, property })
            })
            .collect())
    }

    /// Accept or reject. Repeated decisions overwrite each other.
    pub async fn decide(&self, id: Uuid, state: EnquiryState) -> Result<Enquiry> {
        let enquiry = self
            .repo
            .set_accepted(id, state.as_flag())
            .await?
            .ok_or_else(|| Error::NotFound("Enquiry not found.".to_string()))?;

        tracing::info!(enquiry_id = %id, accepted = state.as_flag(), "Enquiry decided");
        Ok(enquiry)
    }
}
