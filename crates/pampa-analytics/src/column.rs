//! Typed column extraction helpers.
//!
//! Aggregations work on plain `f64` slices; these helpers pull a named
//! column out of a frame with the error mapping the rest of the crate
//! relies on.

use polars::prelude::*;

use crate::error::{AnalyticsError, Result};

/// Look up a column, mapping the polars miss to [`AnalyticsError::ColumnNotFound`].
pub fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(Column::as_materialized_series)
        .map_err(|_| AnalyticsError::ColumnNotFound {
            column: name.to_string(),
        })
}

/// Numeric values of a column with nulls dropped.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(numeric_values_with_nulls(df, name)?
        .into_iter()
        .flatten()
        .collect())
}

/// Numeric values of a column, nulls preserved in position.
///
/// Needed wherever two columns must stay row-aligned, e.g. when pairing
/// observations for a correlation. A non-strict cast would turn text
/// into nulls silently, so the dtype is checked first.
pub fn numeric_values_with_nulls(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = series(df, name)?;
    if !matches!(s.dtype(), DataType::Float64 | DataType::Int64) {
        return Err(AnalyticsError::TypeMismatch {
            column: name.to_string(),
            dtype: s.dtype().to_string(),
            expected: "a numeric column",
        });
    }
    let floats = s.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Values of a text or integer column rendered as strings, nulls
/// preserved in position. Integer columns (years, quarters) are
/// accepted so they can serve as group keys and labels.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = series(df, name)?;
    match s.dtype() {
        DataType::String => Ok(s.str()?.into_iter().map(|v| v.map(str::to_string)).collect()),
        DataType::Int64 => Ok(s
            .i64()?
            .into_iter()
            .map(|v| v.map(|i| i.to_string()))
            .collect()),
        other => Err(AnalyticsError::TypeMismatch {
            column: name.to_string(),
            dtype: other.to_string(),
            expected: "a text or integer column",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Provincia".into(), ["Chubut", "Cordoba"]).into(),
            Series::new("Cantidad".into(), [Some(1200.0), None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_values_drops_nulls() {
        let values = numeric_values(&frame(), "Cantidad").unwrap();
        assert_eq!(values, vec![1200.0]);
    }

    #[test]
    fn test_numeric_values_with_nulls_keeps_alignment() {
        let values = numeric_values_with_nulls(&frame(), "Cantidad").unwrap();
        assert_eq!(values, vec![Some(1200.0), None]);
    }

    #[test]
    fn test_unknown_column() {
        let err = numeric_values(&frame(), "Velocidad").unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::ColumnNotFound { column } if column == "Velocidad"
        ));
    }
}
