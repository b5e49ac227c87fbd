//! Period-over-period growth.

use serde::Serialize;

use crate::KeyedValue;
use crate::join::inner_join;

/// Growth of one key between two periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRecord {
    /// Join key, typically a province name
    pub key: String,
    /// Value in the earlier period
    pub value_a: f64,
    /// Value in the later period
    pub value_b: f64,
    /// `(value_b - value_a) / value_a * 100`; `None` when `value_a` is zero
    pub growth_pct: Option<f64>,
}

/// Join two period slices on key and compute growth per key.
///
/// Inner-join semantics: keys present in only one period are dropped.
/// Output order follows `period_a`.
pub fn growth(period_a: &[KeyedValue], period_b: &[KeyedValue]) -> Vec<GrowthRecord> {
    inner_join(period_a, period_b)
        .into_iter()
        .map(|(key, value_a, value_b)| GrowthRecord {
            key,
            value_a,
            value_b,
            growth_pct: growth_pct(value_a, value_b),
        })
        .collect()
}

/// Percentage growth from `a` to `b`; `None` when the base is zero.
pub fn growth_pct(a: f64, b: f64) -> Option<f64> {
    if a == 0.0 {
        None
    } else {
        Some((b - a) / a * 100.0)
    }
}
