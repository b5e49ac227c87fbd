//! Share-of-total percentages.

use serde::Serialize;

use crate::KeyedValue;
use crate::join::inner_join;

/// Share of a numerator within its denominator for one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRecord {
    /// Join key, typically a province name
    pub key: String,
    /// Numerator (e.g. fiber-optic accesses)
    pub numerator: f64,
    /// Denominator (e.g. total accesses)
    pub denominator: f64,
    /// `numerator / denominator * 100`; `None` when the denominator is zero
    pub share_pct: Option<f64>,
}

/// Percentage share; `None` when the denominator is zero.
///
/// Presentation renders the `None` as `N/A` instead of crashing or
/// printing NaN.
pub fn share_pct(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator * 100.0)
    }
}

/// Join numerator and denominator slices on key and compute the share
/// per key. Inner-join semantics; output order follows `numerators`.
pub fn share(numerators: &[KeyedValue], denominators: &[KeyedValue]) -> Vec<ShareRecord> {
    inner_join(numerators, denominators)
        .into_iter()
        .map(|(key, numerator, denominator)| ShareRecord {
            key,
            numerator,
            denominator,
            share_pct: share_pct(numerator, denominator),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quarter_share() {
        assert_relative_eq!(share_pct(25.0, 100.0).unwrap(), 25.0);
    }

    #[test]
    fn test_zero_denominator_is_undefined() {
        assert_eq!(share_pct(25.0, 0.0), None);
    }

    #[test]
    fn test_keyed_share() {
        let fiber = vec![("Chubut".to_string(), 800.0), ("Cordoba".to_string(), 0.0)];
        let total = vec![
            ("Chubut".to_string(), 2000.0),
            ("Cordoba".to_string(), 0.0),
            ("Salta".to_string(), 100.0),
        ];
        let out = share(&fiber, &total);
        assert_eq!(out.len(), 2);
        assert_relative_eq!(out[0].share_pct.unwrap(), 40.0);
        assert_eq!(out[1].share_pct, None);
    }
}
