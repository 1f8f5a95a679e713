//! Error types for costminer
//!
//! This module defines the error types used throughout the costminer crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Nothing in the core recovers from these errors. A failing record or a
//! grouping applied to the wrong records aborts the whole report run, and the
//! CLI turns the error into a message and a non-zero exit code.
//!
//! # Example
//!
//! ```
//! use costminer_core::error::{CostMinerError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CostMinerError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for costminer operations
#[derive(Error, Debug)]
pub enum CostMinerError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A billing line could not be parsed
    #[error("Parse error in {file} at line {line}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// 1-based line number within the file
        line: usize,
        /// The error message
        error: String,
    },

    /// A record breaks a data-model invariant
    #[error("Invalid billing record #{index}: {reason}")]
    InvalidRecord {
        /// Position of the record in the imported data
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A grouping key was applied to a record that does not carry the attribute
    #[error("Billing record #{index} has no {attribute}; filter before grouping by it")]
    MissingAttribute {
        /// Position of the record in the imported data
        index: usize,
        /// Name of the grouped-on attribute
        attribute: &'static str,
    },

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in costminer
///
/// # Example
///
/// ```
/// use costminer_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CostMinerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CostMinerError::MissingAttribute {
            index: 4,
            attribute: "instance type",
        };
        assert_eq!(
            error.to_string(),
            "Billing record #4 has no instance type; filter before grouping by it"
        );

        let error = CostMinerError::InvalidRecord {
            index: 0,
            reason: "negative cost -1".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid billing record #0: negative cost -1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: CostMinerError = io_error.into();
        assert!(matches!(error, CostMinerError::Io(_)));
    }
}
