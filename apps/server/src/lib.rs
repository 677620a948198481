//! EstateHub - real-estate listing service
//!
//! - Listings with image uploads, stored in PostgreSQL
//! - Listing search: loosely typed criteria compiled to one parameterised SQL query
//! - Customer favorites and enquiries
//! - User and admin accounts with Argon2 password hashes

#![allow(
    clippy::too_many_arguments,      // Repository inserts mirror the listing columns
    clippy::large_enum_variant,      // Clause variants carry their values inline
)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
