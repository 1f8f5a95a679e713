//! Ordered execution of metrics over one collection
//!
//! The pipeline holds an explicit list of metrics; the order of the list is
//! the order of the report sections. Running it either yields every section or
//! the first error, never a partial report.
//!
//! # Examples
//!
//! ```
//! use costminer_core::{BillingCollection, BillingRecord, PricingModel};
//! use costminer_metrics::pipeline::{MetricPipeline, default_metrics};
//! use rust_decimal::Decimal;
//!
//! # fn main() -> costminer_core::Result<()> {
//! let billing = BillingCollection::new(vec![BillingRecord::instance(
//!     "m5.large",
//!     PricingModel::OnDemand,
//!     Decimal::from(3),
//!     Decimal::from(1),
//! )])?;
//!
//! let pipeline = MetricPipeline::new(default_metrics());
//! let results = pipeline.run(&billing)?;
//! assert_eq!(results.len(), 3);
//! # Ok(())
//! # }
//! ```

use crate::cost_by_instance_type::CostByInstanceTypeMetric;
use crate::cost_by_pricing_model::CostByPricingModelMetric;
use crate::cost_by_service::CostByServiceMetric;
use crate::metric::{Metric, MetricResult};
use costminer_core::{BillingCollection, CostMinerError, Result};
use tracing::{debug, info};

/// Every available metric, in report order
pub fn default_metrics() -> Vec<Box<dyn Metric>> {
    vec![
        Box::new(CostByServiceMetric),
        Box::new(CostByPricingModelMetric),
        Box::new(CostByInstanceTypeMetric),
    ]
}

/// Runs an ordered list of metrics against a billing collection
pub struct MetricPipeline {
    metrics: Vec<Box<dyn Metric>>,
}

impl MetricPipeline {
    /// Create a pipeline running `metrics` in the given order
    pub fn new(metrics: Vec<Box<dyn Metric>>) -> Self {
        Self { metrics }
    }

    /// Append a metric to the end of the pipeline
    pub fn with_metric(mut self, metric: impl Metric + 'static) -> Self {
        self.metrics.push(Box::new(metric));
        self
    }

    /// Keep only the metrics whose names are listed, in pipeline order
    ///
    /// An empty list keeps every metric.
    ///
    /// # Errors
    ///
    /// Returns [`CostMinerError::InvalidArgument`] if a name matches no metric.
    pub fn select(self, names: &[String]) -> Result<Self> {
        if names.is_empty() {
            return Ok(self);
        }

        if let Some(unknown) = names
            .iter()
            .find(|name| !self.metrics.iter().any(|m| m.name() == name.as_str()))
        {
            return Err(CostMinerError::InvalidArgument(format!(
                "Unknown metric '{unknown}', expected one of: {}",
                self.names().join(", ")
            )));
        }

        let metrics = self
            .metrics
            .into_iter()
            .filter(|m| names.iter().any(|name| name == m.name()))
            .collect();
        Ok(Self { metrics })
    }

    /// Names of the metrics in pipeline order
    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// The metrics in pipeline order
    pub fn metrics(&self) -> &[Box<dyn Metric>] {
        &self.metrics
    }

    /// Number of metrics
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether the pipeline has no metrics
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Run every metric in order against the same collection
    ///
    /// # Errors
    ///
    /// Stops at the first failing metric and returns its error.
    pub fn run(&self, billing: &BillingCollection) -> Result<Vec<MetricResult>> {
        info!(
            "Running {} metrics over {} billing records",
            self.metrics.len(),
            billing.len()
        );

        self.metrics
            .iter()
            .map(|metric| {
                debug!("Calculating {}", metric.description());
                metric.calculate_metric(billing)
            })
            .collect()
    }
}

impl Default for MetricPipeline {
    fn default() -> Self {
        Self::new(default_metrics())
    }
}
