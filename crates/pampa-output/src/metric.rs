//! Scalar metric widgets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Render an optional value the way every widget does: two decimals, or
/// `N/A` when the computation was undefined.
pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// A single headline number on a dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Widget label
    pub label: String,
    /// Value; `None` when the underlying computation was undefined
    pub value: Option<f64>,
    /// Unit suffix, e.g. `%` or `accesos`
    pub unit: Option<String>,
}

impl Metric {
    /// Metric with a bare value.
    pub fn new(label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: None,
        }
    }

    /// Metric with a unit suffix.
    pub fn with_unit(label: impl Into<String>, value: Option<f64>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            unit: Some(unit.into()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, format_value(self.value))?;
        if let (Some(unit), Some(_)) = (&self.unit, self.value) {
            write!(f, " {unit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defined_metric_display() {
        let m = Metric::with_unit("Participacion fibra", Some(37.5), "%");
        assert_eq!(m.to_string(), "Participacion fibra: 37.50 %");
    }

    #[test]
    fn test_undefined_metric_renders_na() {
        let m = Metric::with_unit("Crecimiento QoQ", None, "%");
        assert_eq!(m.to_string(), "Crecimiento QoQ: N/A");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(10.0)), "10.00");
        assert_eq!(format_value(None), "N/A");
    }
}
