//! Descriptive statistics over numeric columns.
//!
//! Every function here returns `Option` rather than NaN when the input
//! cannot support the computation (empty subset, single observation for
//! a sample statistic). Callers branch on the `None` explicitly; nothing
//! in this crate relies on floating-point NaN propagation.

use polars::prelude::*;
use serde::Serialize;

use crate::column;
use crate::error::Result;

/// Sum of a slice; `None` on an empty subset.
pub fn sum(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum())
    }
}

/// Arithmetic mean; `None` on an empty subset.
pub fn mean(values: &[f64]) -> Option<f64> {
    sum(values).map(|s| s / values.len() as f64)
}

/// Sample standard deviation (n − 1 denominator); `None` below two
/// observations.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (n - 1) as f64).sqrt())
}

/// Quantile by linear interpolation on the sorted values; `None` on an
/// empty subset. `q` is clamped to `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Tukey fences derived from the quartiles of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBounds {
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
    /// Interquartile range
    pub iqr: f64,
    /// Lower fence, `q1 - 1.5 * iqr`
    pub lower: f64,
    /// Upper fence, `q3 + 1.5 * iqr`
    pub upper: f64,
}

impl OutlierBounds {
    /// True when `value` falls outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Compute Tukey fences for a slice; `None` on an empty subset.
pub fn outlier_bounds(values: &[f64]) -> Option<OutlierBounds> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some(OutlierBounds {
        q1,
        q3,
        iqr,
        lower: q1 - 1.5 * iqr,
        upper: q3 + 1.5 * iqr,
    })
}

/// Rows of `df` whose `column` value falls outside the Tukey fences.
///
/// An empty input yields an empty frame, not an error.
pub fn outliers(df: &DataFrame, name: &str) -> Result<DataFrame> {
    let values = column::numeric_values(df, name)?;
    let Some(bounds) = outlier_bounds(&values) else {
        return Ok(df.head(Some(0)));
    };
    let out = df
        .clone()
        .lazy()
        .filter(
            col(name)
                .lt(lit(bounds.lower))
                .or(col(name).gt(lit(bounds.upper))),
        )
        .collect()?;
    Ok(out)
}

/// One equal-width histogram bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge, inclusive only for the last bin
    pub upper: f64,
    /// Number of observations in the bin
    pub count: usize,
}

/// Equal-width histogram over a slice.
///
/// Empty input or a zero bin count yields no bins. When every value is
/// identical a single degenerate bin holds everything.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    // Reference vector used throughout: one clear outlier at 100.
    const REFERENCE: [f64; 9] = [10.0, 12.0, 12.0, 13.0, 12.0, 11.0, 14.0, 13.0, 100.0];

    #[test]
    fn test_sum_mean_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sum(&v).unwrap(), 40.0);
        assert_relative_eq!(mean(&v).unwrap(), 5.0);
        // Sample std-dev of this classic vector is sqrt(32/7)
        assert_relative_eq!(std_dev(&v).unwrap(), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn test_empty_subset_is_undefined() {
        assert_eq!(sum(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(outlier_bounds(&[]), None);
    }

    #[test]
    fn test_std_needs_two_observations() {
        assert_eq!(std_dev(&[5.0]), None);
        assert!(std_dev(&[5.0, 7.0]).is_some());
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(0.25, 12.0)]
    #[case(0.5, 12.0)]
    #[case(0.75, 13.0)]
    #[case(1.0, 100.0)]
    fn test_reference_quantiles(#[case] q: f64, #[case] expected: f64) {
        assert_relative_eq!(quantile(&REFERENCE, q).unwrap(), expected);
    }

    #[test]
    fn test_interpolated_quantile() {
        // Median of an even-length vector interpolates halfway
        assert_relative_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5).unwrap(), 2.5);
    }

    #[test]
    fn test_reference_outlier_bounds() {
        let bounds = outlier_bounds(&REFERENCE).unwrap();
        assert_relative_eq!(bounds.q1, 12.0);
        assert_relative_eq!(bounds.q3, 13.0);
        assert_relative_eq!(bounds.iqr, 1.0);
        assert_relative_eq!(bounds.lower, 10.5);
        assert_relative_eq!(bounds.upper, 14.5);

        assert!(bounds.is_outlier(100.0));
        assert!(bounds.is_outlier(10.0));
        for v in [11.0, 12.0, 13.0, 14.0] {
            assert!(!bounds.is_outlier(v));
        }
    }

    #[test]
    fn test_outlier_rows() {
        let df = DataFrame::new(vec![
            Series::new("Cantidad".into(), REFERENCE.as_slice()).into(),
        ])
        .unwrap();
        let out = outliers(&df, "Cantidad").unwrap();
        let values = column::numeric_values(&out, "Cantidad").unwrap();
        assert_eq!(values, vec![10.0, 100.0]);
    }

    #[test]
    fn test_outliers_of_empty_frame() {
        let df = DataFrame::new(vec![
            Series::new("Cantidad".into(), Vec::<f64>::new()).into(),
        ])
        .unwrap();
        let out = outliers(&df, "Cantidad").unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn test_histogram_counts() {
        let v = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let bins = histogram(&v, 5);
        assert_eq!(bins.len(), 5);
        assert_relative_eq!(bins[0].lower, 0.0);
        assert_relative_eq!(bins[4].upper, 10.0);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, v.len());
        // Max lands in the last bin, not past it
        assert_eq!(bins[4].count, 2);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
        let single = histogram(&[3.0, 3.0, 3.0], 4);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 3);
    }
}
