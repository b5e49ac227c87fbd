#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pampa/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod join;

pub mod growth;
pub mod projection;
pub mod share;

pub use growth::{GrowthRecord, growth, growth_pct};
pub use projection::{ProjectionRecord, projection};
pub use share::{ShareRecord, share, share_pct};

/// One pre-aggregated value keyed by an exact-match text key, usually a
/// province name. KPI inputs are slices of these.
pub type KeyedValue = (String, f64);

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
