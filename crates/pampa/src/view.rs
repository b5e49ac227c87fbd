//! Assembled page view-models.

use serde::{Deserialize, Serialize};

use pampa_output::{ChartSpec, Metric, ReportTable};

/// Everything one dashboard page hands to the rendering surface.
///
/// The page is a value: recomputed in full on every filter change,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Page title
    pub title: String,
    /// Headline metrics, in display order
    pub metrics: Vec<Metric>,
    /// Charts, in display order
    pub charts: Vec<ChartSpec>,
    /// Tables, in display order
    pub tables: Vec<ReportTable>,
}

impl PageView {
    /// Empty page with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            metrics: Vec::new(),
            charts: Vec::new(),
            tables: Vec::new(),
        }
    }
}

/// Distinct filter choices present in the data, for populating UI
/// controls. Choices are enumerated from the loaded table, so a
/// predicate built from them always references live values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Provinces in first-appearance order
    pub provinces: Vec<String>,
    /// Technologies in first-appearance order
    pub technologies: Vec<String>,
    /// Years in first-appearance order
    pub years: Vec<String>,
}
