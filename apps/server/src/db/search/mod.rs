//! Listing search: criteria decoding, filter compilation, SQL rendering and execution.

pub mod compile;
pub mod criteria;
pub mod engine;
pub(crate) mod escape;
pub mod numeric;
pub mod query_builder;

pub use compile::{compile, Clause, Column, CompiledSearch, DateWindow, Pagination, SortOrder};
pub use criteria::SearchCriteria;
pub use engine::{SearchEngine, SearchPage};
