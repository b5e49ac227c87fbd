#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/pampa/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod column;
pub mod correlation;
pub mod error;
pub mod filter;
pub mod groupby;
pub mod stats;

pub use correlation::{CorrelationMatrix, correlation_matrix, pearson};
pub use error::{AnalyticsError, Result};
pub use filter::{FilterValues, Predicate, distinct_values, filter};
pub use groupby::{GroupOrder, GroupSum, grouped_sum, grouped_sum_multi};
pub use stats::{HistogramBin, OutlierBounds, histogram, outlier_bounds, outliers};

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
