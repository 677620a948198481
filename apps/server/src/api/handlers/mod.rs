//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction and validation
//! - Service invocation
//! - Response formatting

pub mod accounts;
pub mod enquiries;
pub mod favorites;
pub mod listings;
pub mod search;
pub mod service;
