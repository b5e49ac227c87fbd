#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pampa/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;
pub mod error;
pub mod view;

// Re-export main types from sub-crates
pub use pampa_analytics as analytics;
pub use pampa_data as data;
pub use pampa_kpi as kpi;
pub use pampa_output as output;

pub use dashboard::{Dashboard, DashboardConfig};
pub use error::{PampaError, Result};
pub use view::{FilterOptions, PageView};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
