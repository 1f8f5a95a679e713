//! Filtering module for billing records
//!
//! This module narrows a billing collection down before metrics run,
//! supporting usage date ranges and service selection.
//!
//! # Examples
//!
//! ```
//! use costminer::filters::RecordFilter;
//! use chrono::NaiveDate;
//!
//! // EC2 and S3 charges for January 2024
//! let filter = RecordFilter::new()
//!     .with_since(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .with_until(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
//!     .with_service("AmazonEC2")
//!     .with_service("AmazonS3");
//! ```

use costminer_core::{BillingCollection, BillingRecord, ServiceCode};
use chrono::NaiveDate;
use tracing::debug;

/// Filter configuration for billing records
///
/// All filters are optional and can be combined. A record without a usage
/// start date never matches a date filter.
#[derive(Debug, Default, Clone)]
pub struct RecordFilter {
    /// Start date filter (inclusive)
    pub since_date: Option<NaiveDate>,
    /// End date filter (inclusive)
    pub until_date: Option<NaiveDate>,
    /// Services to keep; empty keeps all
    pub services: Vec<ServiceCode>,
}

impl RecordFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start date filter
    pub fn with_since(mut self, date: NaiveDate) -> Self {
        self.since_date = Some(date);
        self
    }

    /// Set the end date filter
    pub fn with_until(mut self, date: NaiveDate) -> Self {
        self.until_date = Some(date);
        self
    }

    /// Add a service to keep
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.services.push(ServiceCode::new(service));
        self
    }

    /// Whether the filter lets everything through
    pub fn is_unrestricted(&self) -> bool {
        self.since_date.is_none() && self.until_date.is_none() && self.services.is_empty()
    }

    /// Check if a record passes the filter
    pub fn matches(&self, record: &BillingRecord) -> bool {
        if self.since_date.is_some() || self.until_date.is_some() {
            let Some(start) = record.usage_start else {
                return false;
            };
            let usage_date = start.date_naive();

            if let Some(since) = &self.since_date
                && usage_date < *since
            {
                return false;
            }

            if let Some(until) = &self.until_date
                && usage_date > *until
            {
                return false;
            }
        }

        if !self.services.is_empty() && !self.services.contains(&record.service) {
            return false;
        }

        true
    }

    /// Apply the filter to a whole collection
    pub fn apply(&self, billing: &BillingCollection) -> BillingCollection {
        if self.is_unrestricted() {
            return billing.clone();
        }

        let filtered = billing.filter(|record| self.matches(record));
        debug!(
            "Record filter kept {} of {} records",
            filtered.len(),
            billing.len()
        );
        filtered
    }
}
