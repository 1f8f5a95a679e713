//! Common test utilities and helpers for costminer tests
//!
//! Builders for billing records and helpers that write JSONL exports into
//! temporary directories.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use costminer::{BillingRecord, PricingModel};
use costminer_core::ResourceType;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Instance types used across tests
pub const TEST_INSTANCE_TYPES: &[&str] = &["m5.large", "c5.xlarge", "t3.micro", "r6g.2xlarge"];

/// Services without pricing models used across tests
pub const TEST_SERVICES: &[&str] = &["AmazonS3", "AmazonRDS", "AWSLambda"];

/// Builder for creating test BillingRecord instances
pub struct RecordBuilder {
    record: BillingRecord,
}

impl RecordBuilder {
    /// An on-demand `m5.large` hour costing one dollar
    pub fn new() -> Self {
        Self {
            record: BillingRecord::instance(
                TEST_INSTANCE_TYPES[0],
                PricingModel::OnDemand,
                Decimal::ONE,
                Decimal::ONE,
            ),
        }
    }

    /// Switch to a service without pricing models
    pub fn service(mut self, service: &str) -> Self {
        self.record = BillingRecord::service(service, self.record.cost, self.record.hours_used);
        self
    }

    pub fn instance_type(mut self, instance_type: &str) -> Self {
        self.record.resource_type = Some(ResourceType::new(instance_type));
        self
    }

    pub fn pricing_model(mut self, model: PricingModel) -> Self {
        self.record.pricing_model = Some(model);
        self
    }

    pub fn cost(mut self, cost: Decimal) -> Self {
        self.record.cost = cost;
        self
    }

    pub fn hours(mut self, hours: Decimal) -> Self {
        self.record.hours_used = hours;
        self
    }

    pub fn on_day(mut self, year: i32, month: u32, day: u32) -> Self {
        self.record.usage_start = Some(timestamp(year, month, day));
        self
    }

    pub fn build(self) -> BillingRecord {
        self.record
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Midday UTC on the given date
pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Write records as a JSONL file inside `dir`
pub fn write_jsonl(dir: &Path, name: &str, records: &[BillingRecord]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let content: String = records
        .iter()
        .map(|r| serde_json::to_string(r).unwrap() + "\n")
        .collect();
    std::fs::write(&path, content).unwrap();
    path
}

/// A temporary export holding the instance-type reference scenario
pub fn reference_export() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = write_jsonl(temp_dir.path(), "billing.jsonl", &reference_records());
    (temp_dir, path)
}

/// typeA: on-demand $10 / 5h and spot $6 / 4h; typeB: on-demand $2 / 1h
pub fn reference_records() -> Vec<BillingRecord> {
    vec![
        RecordBuilder::new()
            .instance_type("typeA")
            .cost(Decimal::from(10))
            .hours(Decimal::from(5))
            .build(),
        RecordBuilder::new()
            .instance_type("typeA")
            .pricing_model(PricingModel::Spot)
            .cost(Decimal::from(6))
            .hours(Decimal::from(4))
            .build(),
        RecordBuilder::new()
            .instance_type("typeB")
            .cost(Decimal::from(2))
            .hours(Decimal::from(1))
            .build(),
    ]
}
