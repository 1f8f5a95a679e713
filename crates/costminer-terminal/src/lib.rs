//! Terminal output formatting for costminer
//!
//! This crate provides table and JSON output formatters for metric results.

pub mod output;

pub use output::{JsonFormatter, OutputFormatter, TableFormatter, get_formatter};
