//! Service layer - business logic between the HTTP handlers and the repositories

pub mod accounts;
pub mod enquiries;
pub mod favorites;
pub mod listings;
pub mod metrics;
pub mod search;
pub mod uploads;

pub use accounts::AccountService;
pub use enquiries::EnquiryService;
pub use favorites::FavoriteService;
pub use listings::ListingService;
pub use metrics::MetricsService;
pub use search::{SearchResults, SearchService};
pub use uploads::UploadStore;
