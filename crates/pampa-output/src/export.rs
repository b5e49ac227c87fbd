//! Export of table widgets to CSV and JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::table::{Cell, ReportTable};

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl ReportTable {
    /// Serialize the table in the requested format.
    ///
    /// CSV rows render undefined numbers as `N/A`, the same as the
    /// terminal widgets do.
    pub fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                writer.write_record(&self.headers)?;
                for row in &self.rows {
                    writer.write_record(row.iter().map(Cell::render))?;
                }
                let bytes = writer.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Write the table to a file in the requested format.
    pub fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportTable {
        let mut table = ReportTable::new("Participacion", ["Provincia", "Fibra %"]);
        table.push_row([Cell::from("Chubut"), Cell::from(40.0)]);
        table.push_row([Cell::from("Cordoba"), Cell::from(None)]);
        table
    }

    #[test]
    fn test_csv_export() {
        let csv = sample().export_to_string(ExportFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Provincia,Fibra %"));
        assert_eq!(lines.next(), Some("Chubut,40.00"));
        assert_eq!(lines.next(), Some("Cordoba,N/A"));
    }

    #[test]
    fn test_json_export_roundtrip() {
        let json = sample().export_to_string(ExportFormat::Json).unwrap();
        let back: ReportTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("participacion.csv");
        sample().export_to_file(&path, ExportFormat::Csv).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Provincia,Fibra %"));
    }
}
