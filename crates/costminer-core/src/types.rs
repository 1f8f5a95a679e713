//! Core domain types for costminer
//!
//! This module contains the billing line item and the strongly-typed
//! identifiers it is made of. Amounts are `rust_decimal::Decimal` values so
//! sums stay exact; rounding only ever happens in [`crate::formatters`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Services billed per running instance, which is what gives a line item a
/// pricing model and an instance type.
const PRICING_MODEL_SERVICES: &[&str] = &["AmazonEC2"];

/// Strongly-typed service identifier (the billing export's product code)
///
/// # Examples
/// ```
/// use costminer_core::types::ServiceCode;
///
/// let ec2 = ServiceCode::new("AmazonEC2");
/// assert!(ec2.supports_pricing_model());
/// assert!(!ServiceCode::new("AmazonS3").supports_pricing_model());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Create a new ServiceCode from any string-like type
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether line items of this service carry a pricing model and an
    /// instance type
    pub fn supports_pricing_model(&self) -> bool {
        PRICING_MODEL_SERVICES.contains(&self.0.as_str())
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource subtype within a service, e.g. an EC2 instance type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceType(String);

impl ResourceType {
    /// Create a new ResourceType
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Purchasing commitment a resource was billed under
///
/// # Examples
/// ```
/// use costminer_core::types::PricingModel;
/// use std::str::FromStr;
///
/// assert_eq!(PricingModel::from_str("spot").unwrap(), PricingModel::Spot);
/// assert_eq!(PricingModel::Reserved.to_string(), "Reserved");
/// assert_eq!(PricingModel::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModel {
    /// Pay-as-you-go instance hours
    OnDemand,
    /// Spare capacity at a market price
    Spot,
    /// Hours covered by a reservation
    Reserved,
}

impl PricingModel {
    /// Every pricing model, in report order
    pub const ALL: [PricingModel; 3] = [Self::OnDemand, Self::Spot, Self::Reserved];

    /// Human-readable label used in reports
    pub fn description(&self) -> &'static str {
        match self {
            Self::OnDemand => "On-Demand",
            Self::Spot => "Spot",
            Self::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::str::FromStr for PricingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "on-demand" | "ondemand" => Ok(Self::OnDemand),
            "spot" => Ok(Self::Spot),
            "reserved" => Ok(Self::Reserved),
            _ => Err(format!("Invalid pricing model: {s}")),
        }
    }
}

/// One priced usage entry from a billing export
///
/// # Examples
/// ```
/// use costminer_core::types::{BillingRecord, PricingModel};
/// use rust_decimal::Decimal;
///
/// let record = BillingRecord::instance("m5.large", PricingModel::OnDemand, Decimal::new(1000, 2), Decimal::from(5));
/// assert!(record.validate().is_ok());
///
/// let json = serde_json::to_string(&record).unwrap();
/// assert!(json.contains("\"pricing_model\":\"on-demand\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Service that produced the charge
    pub service: ServiceCode,
    /// Instance type, only for services with pricing models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    /// Pricing model, only for services with pricing models
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<PricingModel>,
    /// Unblended cost in USD
    pub cost: Decimal,
    /// Usage quantity in hours
    #[serde(default)]
    pub hours_used: Decimal,
    /// Start of the usage period, when the export provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_start: Option<DateTime<Utc>>,
}

impl BillingRecord {
    /// Record for a service without pricing models
    pub fn service(service: impl Into<String>, cost: Decimal, hours_used: Decimal) -> Self {
        Self {
            service: ServiceCode::new(service),
            resource_type: None,
            pricing_model: None,
            cost,
            hours_used,
            usage_start: None,
        }
    }

    /// Record for an `AmazonEC2` instance
    pub fn instance(
        instance_type: impl Into<String>,
        pricing_model: PricingModel,
        cost: Decimal,
        hours_used: Decimal,
    ) -> Self {
        Self {
            service: ServiceCode::new("AmazonEC2"),
            resource_type: Some(ResourceType::new(instance_type)),
            pricing_model: Some(pricing_model),
            cost,
            hours_used,
            usage_start: None,
        }
    }

    /// Set the usage start timestamp
    pub fn with_usage_start(mut self, start: DateTime<Utc>) -> Self {
        self.usage_start = Some(start);
        self
    }

    /// Whether this line item belongs to a service with pricing models
    pub fn is_instance(&self) -> bool {
        self.service.supports_pricing_model()
    }

    /// Check the data-model invariants, returning the first violation
    pub fn validate(&self) -> Result<(), String> {
        if self.cost < Decimal::ZERO {
            return Err(format!("negative cost {}", self.cost));
        }
        if self.hours_used < Decimal::ZERO {
            return Err(format!("negative hours used {}", self.hours_used));
        }
        if !self.service.supports_pricing_model() {
            if let Some(model) = self.pricing_model {
                return Err(format!(
                    "pricing model {model} on service {} which has no pricing models",
                    self.service
                ));
            }
            if let Some(resource_type) = &self.resource_type {
                return Err(format!(
                    "resource type {resource_type} on service {} which has no resource types",
                    self.service
                ));
            }
        }
        Ok(())
    }
}
