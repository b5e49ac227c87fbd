//! Projected-versus-actual access targets.

use serde::Serialize;

use crate::KeyedValue;
use crate::join::inner_join;

/// Comparison of an actual value against a projected target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRecord {
    /// Join key, typically a province name
    pub key: String,
    /// Baseline value the target was projected from
    pub baseline: f64,
    /// `baseline * (1 + target_rate)`
    pub predicted: f64,
    /// Observed value
    pub actual: f64,
    /// `(actual - predicted) / predicted * 100`; `None` when the
    /// prediction is zero
    pub delta_pct: Option<f64>,
}

/// Project `baseline` forward by `target_rate` and compare with `actual`.
///
/// Inner-join semantics on key: rows lacking either a baseline or an
/// actual value are excluded. Output order follows `baseline`.
pub fn projection(
    baseline: &[KeyedValue],
    actual: &[KeyedValue],
    target_rate: f64,
) -> Vec<ProjectionRecord> {
    inner_join(baseline, actual)
        .into_iter()
        .map(|(key, base, act)| {
            let predicted = base * (1.0 + target_rate);
            let delta_pct = if predicted == 0.0 {
                None
            } else {
                Some((act - predicted) / predicted * 100.0)
            };
            ProjectionRecord {
                key,
                baseline: base,
                predicted,
                actual: act,
                delta_pct,
            }
        })
        .collect()
}
