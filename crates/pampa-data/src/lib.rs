#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pampa/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod schema;
pub mod store;
pub mod workbook;

pub use error::{DataError, Result};
pub use schema::{ColumnSpec, ColumnType, SheetSchema};
pub use store::WorkbookStore;
pub use workbook::Workbook;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
