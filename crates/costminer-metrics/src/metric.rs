//! The metric contract and its tabular result
//!
//! A metric turns a [`BillingCollection`] into a [`MetricResult`]: a
//! description plus rows of labelled, already formatted values. Every row of
//! a result carries the same labels in the same order, so a renderer can lay
//! out any metric as a table without knowing which metric produced it.

use costminer_core::{BillingCollection, CostMinerError, Result};
use serde::{Deserialize, Serialize};

/// One labelled cell of a report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Column label
    pub label: String,
    /// Formatted value
    pub value: String,
}

impl MetricValue {
    /// Create a new MetricValue
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Output of one metric: a description and uniform row-groups
///
/// # Examples
/// ```
/// use costminer_metrics::metric::{MetricResult, MetricValue};
///
/// let result = MetricResult::new(
///     "Cost by Service",
///     vec![
///         vec![MetricValue::new("Service", "AmazonS3"), MetricValue::new("Cost", "$1.00")],
///         vec![MetricValue::new("Service", "Total"), MetricValue::new("Cost", "$1.00")],
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(result.headers(), vec!["Service", "Cost"]);
/// assert_eq!(result.rows().count(), 2);
/// assert_eq!(result.values().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricResult {
    description: String,
    values: Vec<MetricValue>,
    row_width: usize,
}

impl MetricResult {
    /// Build a result from rows that all share the same labels
    ///
    /// # Errors
    ///
    /// Returns [`CostMinerError::InvalidArgument`] naming the first row whose
    /// labels differ from the first row's.
    pub fn new(description: impl Into<String>, rows: Vec<Vec<MetricValue>>) -> Result<Self> {
        let description = description.into();
        let row_width = rows.first().map_or(0, Vec::len);

        if let Some(first) = rows.first()
            && let Some(bad) = rows.iter().position(|row| {
                row.len() != row_width || row.iter().zip(first).any(|(a, b)| a.label != b.label)
            })
        {
            let labels = |row: &[MetricValue]| {
                row.iter().map(|v| v.label.as_str()).collect::<Vec<_>>().join(", ")
            };
            return Err(CostMinerError::InvalidArgument(format!(
                "Metric '{description}' row {bad} has labels [{}], expected [{}]",
                labels(&rows[bad]),
                labels(first)
            )));
        }

        Ok(Self {
            description,
            values: rows.into_iter().flatten().collect(),
            row_width,
        })
    }

    /// Human-readable description of the metric
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every value in row order
    pub fn values(&self) -> &[MetricValue] {
        &self.values
    }

    /// Column labels, taken from the first row
    pub fn headers(&self) -> Vec<&str> {
        self.values
            .iter()
            .take(self.row_width)
            .map(|v| v.label.as_str())
            .collect()
    }

    /// Iterate over the row-groups
    pub fn rows(&self) -> impl Iterator<Item = &[MetricValue]> + '_ {
        // chunks() panics on a zero width, which only an empty result has
        self.values.chunks(self.row_width.max(1))
    }

    /// Whether the metric produced no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A computation from billing records to a report section
///
/// Metrics are hermetic: they read the shared collection, never mutate it, and
/// never see another metric's output.
pub trait Metric: Send + Sync {
    /// Stable identifier used to select the metric on the command line
    fn name(&self) -> &'static str;

    /// Human-readable description, used as the report section title
    fn description(&self) -> &str;

    /// Compute the report section
    fn calculate_metric(&self, billing: &BillingCollection) -> Result<MetricResult>;
}
