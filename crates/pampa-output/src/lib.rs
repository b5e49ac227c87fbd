#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pampa/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod metric;
pub mod table;

pub use chart::{ChartKind, ChartSeries, ChartSpec};
pub use export::{ExportError, ExportFormat};
pub use metric::{Metric, format_value};
pub use table::{Cell, ReportTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
