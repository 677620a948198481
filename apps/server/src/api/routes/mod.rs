//! Route tables, one per resource group

pub mod accounts;
pub mod enquiries;
pub mod favorites;
pub mod listings;
