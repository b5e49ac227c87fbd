//! Pairwise Pearson correlation.

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::column;
use crate::error::{AnalyticsError, Result};

/// Pearson correlation over the complete pairs of two aligned columns.
///
/// `None` unless at least two complete pairs exist and both sides have
/// nonzero variance over those pairs.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

/// Symmetric matrix of pairwise correlations between named columns.
///
/// Cells that cannot be computed (too few complete pairs, constant
/// column) are `None`; the matrix itself is still produced so one
/// degenerate pair never hides the rest of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Column names, indexing both axes
    pub labels: Vec<String>,
    /// Row-major cells; `cells[i][j]` correlates `labels[i]` with `labels[j]`
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Cell value by axis indices.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells.get(i)?.get(j).copied()?
    }
}

/// Compute the correlation matrix of `names` over `df`.
///
/// Needs at least two columns; anything less is a caller mistake, not a
/// soft condition.
pub fn correlation_matrix(df: &DataFrame, names: &[&str]) -> Result<CorrelationMatrix> {
    if names.len() < 2 {
        return Err(AnalyticsError::InsufficientColumns { got: names.len() });
    }
    let columns: Vec<Vec<Option<f64>>> = names
        .iter()
        .map(|name| column::numeric_values_with_nulls(df, name))
        .collect::<Result<_>>()?;

    let n = columns.len();
    let mut cells = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }
    Ok(CorrelationMatrix {
        labels: names.iter().map(|s| s.to_string()).collect(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let y = some(&[2.0, 4.0, 6.0, 8.0]);
        assert_relative_eq!(pearson(&x, &y).unwrap(), 1.0);

        let inv = some(&[8.0, 6.0, 4.0, 2.0]);
        assert_relative_eq!(pearson(&x, &inv).unwrap(), -1.0);
    }

    #[test]
    fn test_constant_column_is_undefined() {
        let x = some(&[1.0, 2.0, 3.0]);
        let y = some(&[5.0, 5.0, 5.0]);
        assert_eq!(pearson(&x, &y), None);
    }

    #[test]
    fn test_incomplete_pairs_are_skipped() {
        let x = vec![Some(1.0), None, Some(3.0), Some(4.0)];
        let y = vec![Some(2.0), Some(9.0), None, Some(8.0)];
        // Only rows 0 and 3 are complete, exactly the minimum
        assert!(pearson(&x, &y).is_some());

        let too_few = vec![Some(1.0), None, None, None];
        assert_eq!(pearson(&too_few, &y), None);
    }

    #[test]
    fn test_matrix_shape_and_symmetry() {
        let df = DataFrame::new(vec![
            Series::new("Cantidad".into(), [1.0, 2.0, 3.0, 4.0]).into(),
            Series::new("Velocidad".into(), [10.0, 18.0, 32.0, 41.0]).into(),
            Series::new("Anio".into(), [2023i64, 2023, 2023, 2023]).into(),
        ])
        .unwrap();
        let m = correlation_matrix(&df, &["Cantidad", "Velocidad", "Anio"]).unwrap();

        assert_eq!(m.labels.len(), 3);
        assert_relative_eq!(m.get(0, 0).unwrap(), 1.0);
        assert_eq!(m.get(0, 1), m.get(1, 0));
        // Constant year column yields undefined cells, including its diagonal
        assert_eq!(m.get(2, 2), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn test_single_column_is_an_error() {
        let df = DataFrame::new(vec![
            Series::new("Cantidad".into(), [1.0, 2.0]).into(),
        ])
        .unwrap();
        assert!(matches!(
            correlation_matrix(&df, &["Cantidad"]),
            Err(AnalyticsError::InsufficientColumns { got: 1 })
        ));
    }
}
