//! CLI interface for costminer
//!
//! This module defines the command-line interface using clap.
//!
//! # Example
//!
//! ```bash
//! # Full report for a billing export
//! costminer report ./billing/2024-01.jsonl
//!
//! # Only instance costs for the first quarter, as JSON
//! costminer report ./billing --since 2024-01 --until 2024-03-31 \
//!     --metric cost-by-instance-type --json
//!
//! # List the available metrics
//! costminer metrics
//! ```

use costminer_core::error::{CostMinerError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Break cloud billing exports down into cost and usage reports
#[derive(Parser, Debug, Clone)]
#[command(name = "costminer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show debug output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments for the report command
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Billing export: a JSONL file or a directory of JSONL files
    #[arg(env = "COSTMINER_INPUT")]
    pub input: PathBuf,

    /// Only include usage starting on or after this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long)]
    pub since: Option<String>,

    /// Only include usage starting on or before this date (YYYY-MM-DD, or
    /// YYYY-MM for the whole month)
    #[arg(long)]
    pub until: Option<String>,

    /// Only include these services (repeatable), e.g. AmazonEC2
    #[arg(long = "service", short = 's')]
    pub services: Vec<String>,

    /// Only run these metrics (repeatable); see `costminer metrics`
    #[arg(long = "metric", short = 'm')]
    pub metrics: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute cost and usage metrics for a billing export
    Report(ReportArgs),
    /// List the available metrics in report order
    Metrics,
}

/// Parse date filter from string
///
/// Accepts dates in YYYY-MM-DD or YYYY-MM format.
/// For YYYY-MM format, defaults to the first day of the month.
///
/// # Example
///
/// ```
/// use costminer::cli::parse_date_filter;
/// use chrono::Datelike;
///
/// let date = parse_date_filter("2024-01-15").unwrap();
/// assert_eq!(date.day(), 15);
///
/// let date = parse_date_filter("2024-01").unwrap();
/// assert_eq!(date.month(), 1);
/// assert_eq!(date.day(), 1);
/// ```
pub fn parse_date_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() == 2 {
        let year = parts[0]
            .parse::<i32>()
            .map_err(|_| CostMinerError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
        let month = parts[1]
            .parse::<u32>()
            .map_err(|_| CostMinerError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

        if !(1..=12).contains(&month) {
            return Err(CostMinerError::InvalidDate(format!(
                "Month must be between 1-12, got {month}"
            )));
        }

        chrono::NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CostMinerError::InvalidDate(format!("Invalid date: {date_str}")))
    } else {
        Err(CostMinerError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )))
    }
}

/// Parse the inclusive end of a date range
///
/// Same formats as [`parse_date_filter`], but YYYY-MM resolves to the last
/// day of the month so that `--until 2024-03` covers all of March.
///
/// # Example
///
/// ```
/// use costminer::cli::parse_until_filter;
/// use chrono::Datelike;
///
/// assert_eq!(parse_until_filter("2024-02").unwrap().day(), 29);
/// assert_eq!(parse_until_filter("2024-02-10").unwrap().day(), 10);
/// ```
pub fn parse_until_filter(date_str: &str) -> Result<chrono::NaiveDate> {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_date_filter(date_str)?
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .ok_or_else(|| CostMinerError::InvalidDate(format!("Invalid date: {date_str}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_report_parsing() {
        let cli = Cli::parse_from([
            "costminer",
            "report",
            "billing.jsonl",
            "--since",
            "2024-01",
            "-s",
            "AmazonEC2",
            "--service",
            "AmazonS3",
            "--metric",
            "cost-by-service",
            "--json",
        ]);
        assert!(cli.json);
        assert!(!cli.verbose);
        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.input, PathBuf::from("billing.jsonl"));
                assert_eq!(args.since.as_deref(), Some("2024-01"));
                assert!(args.until.is_none());
                assert_eq!(args.services, vec!["AmazonEC2", "AmazonS3"]);
                assert_eq!(args.metrics, vec!["cost-by-service"]);
            }
            other => panic!("Expected Report command, got {other:?}"),
        }
    }

    #[test]
    fn test_metrics_command() {
        let cli = Cli::parse_from(["costminer", "-q", "metrics"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Metrics));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["costminer", "-v", "-q", "metrics"]).is_err());
    }

    #[test]
    fn test_parse_date_filter() {
        let date = parse_date_filter("2024-02-29").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));

        let date = parse_date_filter("2023-11").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 11, 1));

        assert!(matches!(
            parse_date_filter("2024-13"),
            Err(CostMinerError::InvalidDate(_))
        ));
        assert!(parse_date_filter("2024-02-30").is_err());
        assert!(parse_date_filter("yesterday").is_err());
        assert!(parse_date_filter("24-x").is_err());
    }

    #[test]
    fn test_parse_until_filter_covers_whole_month() {
        let date = parse_until_filter("2024-03").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 31));

        let date = parse_until_filter("2023-02").unwrap();
        assert_eq!(date.day(), 28);

        let date = parse_until_filter("2024-12").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 12, 31));

        let date = parse_until_filter("2024-03-15").unwrap();
        assert_eq!(date.day(), 15);

        assert!(matches!(
            parse_until_filter("2024-00"),
            Err(CostMinerError::InvalidDate(_))
        ));
    }
}
