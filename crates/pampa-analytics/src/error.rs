//! Error types for analytical operations.

use thiserror::Error;

/// Result type for analytical operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors raised by the filter engine and aggregations.
///
/// Only structural problems are errors here. Soft conditions such as an
/// empty filtered subset or a zero denominator produce `None` values
/// instead, so one undefined metric never aborts a whole view.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Referenced column does not exist in the frame
    #[error("column '{column}' not found in table")]
    ColumnNotFound {
        /// Column that was referenced
        column: String,
    },

    /// Column exists but has the wrong type for the operation
    #[error("column '{column}' has dtype {dtype}, expected {expected}")]
    TypeMismatch {
        /// Column that was referenced
        column: String,
        /// Actual dtype found
        dtype: String,
        /// What the operation needed
        expected: &'static str,
    },

    /// A correlation matrix needs at least two columns
    #[error("correlation matrix needs at least 2 columns, got {got}")]
    InsufficientColumns {
        /// Number of columns supplied
        got: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
