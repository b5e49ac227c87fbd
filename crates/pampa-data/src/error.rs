//! Error types for workbook loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading tables from a workbook.
///
/// Loading errors are fatal for the session: the source file is static,
/// so there is nothing to retry. Downstream analytical code never maps
/// its soft conditions (empty subsets, zero denominators) onto these.
#[derive(Debug, Error)]
pub enum DataError {
    /// Workbook file does not exist
    #[error("workbook not found: {}", path.display())]
    NotFound {
        /// Path that was opened
        path: PathBuf,
    },

    /// Named sheet is absent from the workbook
    #[error("sheet '{sheet}' not found in {}", path.display())]
    SheetNotFound {
        /// Sheet name that was requested
        sheet: String,
        /// Workbook the sheet was expected in
        path: PathBuf,
    },

    /// A column required by the sheet schema is missing from the header row
    #[error("malformed sheet '{sheet}': required column '{column}' is missing")]
    MissingColumn {
        /// Sheet being loaded
        sheet: String,
        /// Column declared by the schema
        column: String,
    },

    /// A cell value does not match the declared column type
    #[error(
        "malformed sheet '{sheet}': column '{column}' row {row} holds {found}, expected {expected}"
    )]
    MalformedCell {
        /// Sheet being loaded
        sheet: String,
        /// Column declared by the schema
        column: String,
        /// 1-based data row index (header excluded)
        row: usize,
        /// Description of the offending cell
        found: String,
        /// Declared column type
        expected: &'static str,
    },

    /// Sheet has no header row at all
    #[error("malformed sheet '{sheet}': sheet is empty")]
    EmptySheet {
        /// Sheet being loaded
        sheet: String,
    },

    /// Spreadsheet parsing error
    #[error("spreadsheet error: {0}")]
    Sheet(#[from] calamine::XlsxError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
