//! Group-by sums.
//!
//! Groups keep the first-appearance order of their key unless the
//! caller asks for a descending ranking by sum, which is what the
//! technology-distribution chart uses.

use polars::prelude::*;
use serde::Serialize;

use crate::column;
use crate::error::Result;

/// Ordering policy for grouped results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Order of the key's first appearance in the input
    #[default]
    FirstAppearance,
    /// Largest sum first; ties keep first-appearance order
    DescendingBySum,
}

/// One (key, sum) pair of a grouped aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSum {
    /// Group key rendered as text
    pub key: String,
    /// Sum of the value column within the group
    pub sum: f64,
}

/// Sum `value` per distinct `key`, one pair per group.
///
/// Rows with a null key are dropped. Null values count as zero within
/// their group.
pub fn grouped_sum(
    df: &DataFrame,
    key: &str,
    value: &str,
    order: GroupOrder,
) -> Result<Vec<GroupSum>> {
    grouped_sum_multi(df, &[key], value, order)
}

/// Like [`grouped_sum`] with a composite key; key parts are joined with
/// `-` in the rendered label (e.g. `2023-4` for a year/quarter pair).
pub fn grouped_sum_multi(
    df: &DataFrame,
    keys: &[&str],
    value: &str,
    order: GroupOrder,
) -> Result<Vec<GroupSum>> {
    // Validate columns before handing polars the lazy plan, so misses
    // surface as ColumnNotFound instead of a plan error.
    for name in keys.iter().chain(std::iter::once(&value)) {
        column::series(df, name)?;
    }

    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable(key_exprs)
        .agg([col(value).sum().alias("__sum")])
        .collect()?;

    let key_parts: Vec<Vec<Option<String>>> = keys
        .iter()
        .map(|k| column::text_values(&grouped, k))
        .collect::<Result<_>>()?;
    let sums = column::numeric_values_with_nulls(&grouped, "__sum")?;

    let mut result = Vec::with_capacity(grouped.height());
    'rows: for row in 0..grouped.height() {
        let mut label_parts = Vec::with_capacity(keys.len());
        for part in &key_parts {
            match &part[row] {
                Some(p) => label_parts.push(p.clone()),
                None => continue 'rows, // null key, dropped
            }
        }
        result.push(GroupSum {
            key: label_parts.join("-"),
            sum: sums[row].unwrap_or(0.0),
        });
    }

    if order == GroupOrder::DescendingBySum {
        result.sort_by(|a, b| b.sum.total_cmp(&a.sum));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Tecnologia".into(), ["A", "B", "A"]).into(),
            Series::new("Cantidad".into(), [5.0, 3.0, 2.0]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_first_appearance_order() {
        let out = grouped_sum(&frame(), "Tecnologia", "Cantidad", GroupOrder::FirstAppearance)
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].key, "A");
        assert_eq!(out[0].sum, 7.0);
        assert_eq!(out[1].key, "B");
        assert_eq!(out[1].sum, 3.0);
    }

    #[test]
    fn test_descending_ranking() {
        let df = DataFrame::new(vec![
            Series::new("Tecnologia".into(), ["X", "Y", "Z"]).into(),
            Series::new("Cantidad".into(), [1.0, 9.0, 4.0]).into(),
        ])
        .unwrap();
        let out =
            grouped_sum(&df, "Tecnologia", "Cantidad", GroupOrder::DescendingBySum).unwrap();
        let keys: Vec<&str> = out.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Y", "Z", "X"]);
    }

    #[test]
    fn test_composite_key_labels() {
        let df = DataFrame::new(vec![
            Series::new("Anio".into(), [2023i64, 2023, 2024]).into(),
            Series::new("Trimestre".into(), [3i64, 4, 1]).into(),
            Series::new("Cantidad".into(), [1.0, 2.0, 3.0]).into(),
        ])
        .unwrap();
        let out = grouped_sum_multi(
            &df,
            &["Anio", "Trimestre"],
            "Cantidad",
            GroupOrder::FirstAppearance,
        )
        .unwrap();
        let keys: Vec<&str> = out.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2023-3", "2023-4", "2024-1"]);
    }

    #[test]
    fn test_null_keys_dropped() {
        let df = DataFrame::new(vec![
            Series::new("Tecnologia".into(), [Some("A"), None, Some("A")]).into(),
            Series::new("Cantidad".into(), [1.0, 100.0, 2.0]).into(),
        ])
        .unwrap();
        let out =
            grouped_sum(&df, "Tecnologia", "Cantidad", GroupOrder::FirstAppearance).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sum, 3.0);
    }

    #[test]
    fn test_missing_column() {
        assert!(matches!(
            grouped_sum(&frame(), "Velocidad", "Cantidad", GroupOrder::FirstAppearance),
            Err(AnalyticsError::ColumnNotFound { .. })
        ));
    }
}
