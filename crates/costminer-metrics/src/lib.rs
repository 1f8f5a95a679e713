//! Metric computations for costminer
//!
//! This crate defines the [`Metric`] contract, the metrics that ship with
//! costminer, and the [`MetricPipeline`] that runs them in order.

pub mod cost_by_instance_type;
pub mod cost_by_pricing_model;
pub mod cost_by_service;
pub mod metric;
pub mod pipeline;

pub use cost_by_instance_type::CostByInstanceTypeMetric;
pub use cost_by_pricing_model::CostByPricingModelMetric;
pub use cost_by_service::CostByServiceMetric;
pub use metric::{Metric, MetricResult, MetricValue};
pub use pipeline::{MetricPipeline, default_metrics};
