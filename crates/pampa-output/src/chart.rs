//! Chart specifications.
//!
//! The dashboard core never draws anything. It emits a [`ChartSpec`] —
//! chart kind, labels, data series — and a rendering surface turns that
//! into pixels. Undefined data points stay `None` all the way to the
//! renderer, which shows them as gaps or `N/A`.

use serde::{Deserialize, Serialize};

/// Kind of chart a spec asks the rendering surface for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Categorical bars
    Bar,
    /// Connected line over ordered labels
    Line,
    /// Paired x/y points
    Scatter,
    /// Pre-binned histogram
    Histogram,
    /// Box-and-whisker summary
    Box,
    /// Matrix heatmap
    Heatmap,
}

/// One named data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name shown in the legend
    pub name: String,
    /// Data points aligned with the spec's labels
    pub values: Vec<Option<f64>>,
}

impl ChartSeries {
    /// Series from fully-defined values.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// Series that may contain undefined points.
    pub fn from_optional(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A complete chart request: kind, axis labels and one or more series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// What to draw
    pub kind: ChartKind,
    /// Chart title
    pub title: String,
    /// Category / axis labels; may be empty for scatter charts
    pub labels: Vec<String>,
    /// Data series, each aligned with `labels` where labels exist
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    /// Start a spec with no data attached yet.
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            labels: Vec::new(),
            series: Vec::new(),
        }
    }

    /// Attach axis labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Attach one series.
    #[must_use]
    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// True when no series carries a defined data point, i.e. the
    /// renderer should show a "no data" placeholder.
    pub fn is_empty(&self) -> bool {
        self.series
            .iter()
            .all(|s| s.values.iter().all(Option::is_none))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_detection() {
        let spec = ChartSpec::new(ChartKind::Bar, "Accesos por tecnologia");
        assert!(spec.is_empty());

        let spec = spec.with_series(ChartSeries::from_optional("Cantidad", vec![None, None]));
        assert!(spec.is_empty());

        let spec = spec.with_series(ChartSeries::from_values("Otros", vec![1.0]));
        assert!(!spec.is_empty());
    }
}
