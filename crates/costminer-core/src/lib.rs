//! Core types and aggregation for costminer
//!
//! This crate provides the billing record model, the read-only
//! [`BillingCollection`] with its filter/group/sum operations, the value
//! formatters, and the error type shared by all other costminer crates.

pub mod collection;
pub mod error;
pub mod formatters;
pub mod types;

// Re-export commonly used types
pub use collection::{BillingCollection, Groups};
pub use error::{CostMinerError, Result};
pub use formatters::{Hours, Money, Percent, percent_of};
pub use types::{BillingRecord, PricingModel, ResourceType, ServiceCode};
