//! costminer - Break cloud billing exports down into cost and usage reports
//!
//! This library provides functionality to:
//! - Load JSONL billing exports into a validated [`BillingCollection`]
//! - Narrow the records down by usage date and service
//! - Run an ordered pipeline of cost metrics over the records
//! - Render the results as tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use costminer::{
//!     data_loader::DataLoader,
//!     filters::RecordFilter,
//!     MetricPipeline,
//! };
//! use costminer_terminal::output::get_formatter;
//!
//! #[tokio::main]
//! async fn main() -> costminer::Result<()> {
//!     let billing = DataLoader::new("./billing")?.load_collection().await?;
//!     let billing = RecordFilter::new().with_service("AmazonEC2").apply(&billing);
//!
//!     let results = MetricPipeline::default().run(&billing)?;
//!     println!("{}", get_formatter(false).format_results(&results));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod data_loader;
pub mod filters;

// Re-export commonly used types
pub use costminer_core::{
    BillingCollection, BillingRecord, CostMinerError, PricingModel, Result, ServiceCode,
};
pub use costminer_metrics::{Metric, MetricPipeline, MetricResult, default_metrics};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
