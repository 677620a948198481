//! Database layer - repositories and data access

pub mod accounts;
pub mod enquiries;
pub mod favorites;
pub mod listings;
pub mod metrics;
pub mod search;
pub mod traits;

pub use accounts::{AdminRepository, UserRepository};
pub use enquiries::{EnquiryRepository, EnquiryScope};
pub use favorites::FavoriteRepository;
pub use listings::PostgresListingStore;
pub use metrics::MetricsRepository;
pub use search::{SearchEngine, SearchPage};
pub use traits::{ListingFilter, ListingStore};
