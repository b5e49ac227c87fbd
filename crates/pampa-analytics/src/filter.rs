//! Filter engine.
//!
//! A [`Predicate`] maps column names to sets of allowed values. A row
//! passes when every constrained column holds one of its allowed values:
//! AND across columns, OR within a column. Columns without a constraint
//! pass everything, and an empty predicate is the identity.

use std::collections::BTreeMap;

use polars::prelude::*;

use crate::column;
use crate::error::{AnalyticsError, Result};

/// Allowed values for one constrained column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValues {
    /// Integer choices (years, quarters)
    Int(Vec<i64>),
    /// Text choices (provinces, technologies)
    Text(Vec<String>),
}

/// A set of column constraints, ANDed together.
///
/// Constraints with an empty value set are never stored: an empty set
/// means "no filter on this column", so adding one is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    constraints: BTreeMap<String, FilterValues>,
}

impl Predicate {
    /// The empty predicate; filtering with it returns the table unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain `column` to a set of text values.
    #[must_use]
    pub fn with_text<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.constraints
                .insert(column.to_string(), FilterValues::Text(values));
        }
        self
    }

    /// Constrain `column` to a set of integer values.
    #[must_use]
    pub fn with_ints<I>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let values: Vec<i64> = values.into_iter().collect();
        if !values.is_empty() {
            self.constraints
                .insert(column.to_string(), FilterValues::Int(values));
        }
        self
    }

    /// True when no column is constrained.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constrained columns and their allowed values.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &FilterValues)> {
        self.constraints.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this predicate keeping only constraints on `columns`.
    ///
    /// Used when one user selection feeds several sheets that carry
    /// different subsets of the filterable columns.
    #[must_use]
    pub fn retain_columns(&self, columns: &[&str]) -> Self {
        Self {
            constraints: self
                .constraints
                .iter()
                .filter(|(k, _)| columns.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Return the rows of `df` satisfying `predicate`, in their original order.
///
/// Values absent from the table simply match nothing; a constrained
/// column absent from the table is an
/// [`AnalyticsError::ColumnNotFound`].
pub fn filter(df: &DataFrame, predicate: &Predicate) -> Result<DataFrame> {
    if predicate.is_empty() {
        return Ok(df.clone());
    }

    let mut combined: Option<Expr> = None;
    for (name, values) in predicate.constraints() {
        if df.column(name).is_err() {
            return Err(AnalyticsError::ColumnNotFound {
                column: name.to_string(),
            });
        }
        let allowed = match values {
            FilterValues::Int(v) => Series::new(PlSmallStr::EMPTY, v.as_slice()),
            FilterValues::Text(v) => Series::new(PlSmallStr::EMPTY, v.as_slice()),
        };
        let clause = col(name).is_in(lit(allowed));
        combined = Some(match combined {
            Some(expr) => expr.and(clause),
            None => clause,
        });
    }

    let Some(expr) = combined else {
        return Ok(df.clone());
    };
    Ok(df.clone().lazy().filter(expr).collect()?)
}

/// Distinct values of a column in first-appearance order, rendered as
/// strings. This is what a UI enumerates to populate filter controls.
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let mut seen = Vec::new();
    for value in column::text_values(df, column)?.into_iter().flatten() {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "Provincia".into(),
                ["Chubut", "Cordoba", "Chubut", "Mendoza"],
            )
            .into(),
            Series::new("Tecnologia".into(), ["ADSL", "ADSL", "Fibra", "Fibra"]).into(),
            Series::new("Anio".into(), [2022i64, 2023, 2023, 2023]).into(),
            Series::new("Cantidad".into(), [10.0, 20.0, 30.0, 40.0]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_predicate_is_identity() {
        let df = frame();
        let out = filter(&df, &Predicate::new()).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn test_and_across_columns_or_within() {
        let df = frame();
        let p = Predicate::new()
            .with_text("Provincia", ["Chubut", "Mendoza"])
            .with_ints("Anio", [2023]);
        let out = filter(&df, &p).unwrap();

        let provinces = column::text_values(&out, "Provincia").unwrap();
        assert_eq!(
            provinces,
            vec![Some("Chubut".to_string()), Some("Mendoza".to_string())]
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let df = frame();
        let p = Predicate::new().with_text("Tecnologia", ["Fibra"]);
        let once = filter(&df, &p).unwrap();
        let twice = filter(&once, &p).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let df = frame();
        let p = Predicate::new().with_text("Provincia", ["Atlantida"]);
        let out = filter(&df, &p).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let df = frame();
        let p = Predicate::new().with_text("Partido", ["x"]);
        assert!(matches!(
            filter(&df, &p),
            Err(AnalyticsError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_value_set_is_not_a_constraint() {
        let p = Predicate::new().with_text("Provincia", Vec::<String>::new());
        assert!(p.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let df = frame();
        let p = Predicate::new().with_text("Provincia", ["Chubut"]);
        let out = filter(&df, &p).unwrap();
        let qty = column::numeric_values(&out, "Cantidad").unwrap();
        assert_eq!(qty, vec![10.0, 30.0]);
    }

    #[test]
    fn test_retain_columns() {
        let p = Predicate::new()
            .with_text("Provincia", ["Chubut"])
            .with_text("Tecnologia", ["Fibra"]);
        let narrowed = p.retain_columns(&["Provincia", "Anio"]);
        let columns: Vec<&str> = narrowed.constraints().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["Provincia"]);
    }

    #[test]
    fn test_distinct_values_first_appearance() {
        let df = frame();
        assert_eq!(
            distinct_values(&df, "Provincia").unwrap(),
            vec!["Chubut", "Cordoba", "Mendoza"]
        );
        assert_eq!(
            distinct_values(&df, "Anio").unwrap(),
            vec!["2022", "2023"]
        );
    }
}
