//! Output formatting module for costminer
//!
//! This module renders metric results in different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! Formatters only know about row-groups and labels, never about a specific
//! metric.
//!
//! # Examples
//!
//! ```
//! use costminer_metrics::{MetricResult, MetricValue};
//! use costminer_terminal::output::get_formatter;
//!
//! let results = vec![MetricResult::new(
//!     "Cost by Service",
//!     vec![vec![MetricValue::new("Service", "AmazonS3"), MetricValue::new("Cost", "$1.00")]],
//! )
//! .unwrap()];
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false);
//! println!("{}", formatter.format_results(&results));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true);
//! println!("{}", json_formatter.format_results(&results));
//! ```

use costminer_metrics::{MetricResult, MetricValue};
use prettytable::{Cell, Row, Table, format};
use serde_json::{Map, Value, json};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format every metric result, in order
    fn format_results(&self, results: &[MetricResult]) -> String;
}

/// Table formatter for human-readable output
///
/// Produces one titled ASCII table per metric. `Total` rows are printed in
/// bold and numeric values are right-aligned.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableFormatter;

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new() -> Self {
        Self
    }

    fn is_total_row(row: &[MetricValue]) -> bool {
        row.iter().any(|v| v.value == "Total")
    }

    fn format_result(result: &MetricResult) -> String {
        let mut output = format!("\n=== {} ===\n", result.description());

        if result.is_empty() {
            output.push_str("No billing data\n");
            return output;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(Row::new(
            result
                .headers()
                .into_iter()
                .map(|label| Cell::new(label).style_spec("b"))
                .collect(),
        ));

        for row in result.rows() {
            let bold = if Self::is_total_row(row) { "b" } else { "" };
            table.add_row(Row::new(
                row.iter()
                    .map(|v| {
                        let align = if v.value.starts_with(|c: char| c.is_ascii_digit() || c == '$') {
                            "r"
                        } else {
                            "l"
                        };
                        Cell::new(&v.value).style_spec(&format!("{bold}{align}"))
                    })
                    .collect(),
            ));
        }

        output.push_str(&table.to_string());
        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_results(&self, results: &[MetricResult]) -> String {
        results.iter().map(Self::format_result).collect()
    }
}

/// JSON formatter for machine-readable output
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl JsonFormatter {
    fn result_to_json(result: &MetricResult) -> Value {
        let rows: Vec<Value> = result
            .rows()
            .map(|row| {
                let mut object = Map::new();
                for value in row {
                    object.insert(value.label.clone(), Value::String(value.value.clone()));
                }
                Value::Object(object)
            })
            .collect();

        json!({
            "description": result.description(),
            "columns": result.headers(),
            "rows": rows,
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_results(&self, results: &[MetricResult]) -> String {
        let output = json!({
            "metrics": results.iter().map(Self::result_to_json).collect::<Vec<_>>(),
        });

        serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize metrics: {e}");
            "{}".to_string()
        })
    }
}

/// Get the formatter for the requested output mode
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new())
    }
}
