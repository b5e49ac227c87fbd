//! Inner join of two keyed slices.
//!
//! Every KPI pairs two slices of pre-aggregated values on an exact text
//! key (province name). Keys present on only one side are dropped; no
//! normalization of casing or accents is attempted, so sheets that
//! disagree on naming silently lose rows here.

use crate::KeyedValue;
use std::collections::HashMap;

/// Pair up `left` and `right` by key, keeping `left`'s key order.
///
/// Duplicate keys keep their first occurrence on either side.
pub(crate) fn inner_join(
    left: &[KeyedValue],
    right: &[KeyedValue],
) -> Vec<(String, f64, f64)> {
    let mut right_by_key: HashMap<&str, f64> = HashMap::with_capacity(right.len());
    for (key, value) in right {
        right_by_key.entry(key.as_str()).or_insert(*value);
    }

    let mut seen: Vec<&str> = Vec::new();
    let mut joined = Vec::new();
    for (key, value) in left {
        if seen.contains(&key.as_str()) {
            continue;
        }
        seen.push(key.as_str());
        if let Some(&other) = right_by_key.get(key.as_str()) {
            joined.push((key.clone(), *value, other));
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(pairs: &[(&str, f64)]) -> Vec<KeyedValue> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_inner_semantics_and_left_order() {
        let left = keyed(&[("Chubut", 1.0), ("Cordoba", 2.0), ("Mendoza", 3.0)]);
        let right = keyed(&[("Mendoza", 30.0), ("Chubut", 10.0), ("Salta", 99.0)]);

        let joined = inner_join(&left, &right);
        assert_eq!(
            joined,
            vec![
                ("Chubut".to_string(), 1.0, 10.0),
                ("Mendoza".to_string(), 3.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let left = keyed(&[("Chubut", 1.0), ("Chubut", 5.0)]);
        let right = keyed(&[("Chubut", 10.0)]);
        assert_eq!(inner_join(&left, &right), vec![("Chubut".to_string(), 1.0, 10.0)]);
    }

    #[test]
    fn test_exact_match_only() {
        // Casing differences are not reconciled
        let left = keyed(&[("chubut", 1.0)]);
        let right = keyed(&[("Chubut", 10.0)]);
        assert!(inner_join(&left, &right).is_empty());
    }
}
