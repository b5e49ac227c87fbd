//! Tabular widget rendering.

use serde::{Deserialize, Serialize};

use crate::metric::format_value;

/// One table cell: text or an optional number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Text content
    Text(String),
    /// Numeric content; `None` renders as `N/A`
    Number(Option<f64>),
}

impl Cell {
    /// Text representation used by every output format.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(v) => format_value(*v),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Number(Some(v))
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        Self::Number(v)
    }
}

/// A titled table widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    /// Table title
    pub title: String,
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows; each row aligns with `headers`
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Empty table with headers only.
    pub fn new<I, S>(title: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append one row.
    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{}\n", self.title));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        for header in &self.headers {
            output.push_str(&format!("{header:<18}"));
        }
        output.push('\n');
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("(no data)\n");
        }
        for row in &self.rows {
            for cell in row {
                output.push_str(&format!("{:<18}", cell.render()));
            }
            output.push('\n');
        }
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output
    }

    /// Format as Markdown table for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("### {}\n\n", self.title));
        output.push_str(&format!("| {} |\n", self.headers.join(" | ")));
        output.push_str(&format!(
            "|{}\n",
            self.headers.iter().map(|_| "---|").collect::<String>()
        ));
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(Cell::render).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportTable {
        let mut table = ReportTable::new("Outliers detectados", ["Provincia", "Cantidad"]);
        table.push_row([Cell::from("Chubut"), Cell::from(100.0)]);
        table.push_row([Cell::from("Cordoba"), Cell::from(None)]);
        table
    }

    #[test]
    fn test_markdown_renders_na_for_undefined() {
        let md = sample().to_markdown();
        assert!(md.contains("| Chubut | 100.00 |"));
        assert!(md.contains("| Cordoba | N/A |"));
        assert!(md.starts_with("### Outliers detectados"));
    }

    #[test]
    fn test_ascii_table_headers_and_placeholder() {
        let table = ReportTable::new("Vacia", ["A", "B"]);
        let ascii = table.to_ascii_table();
        assert!(ascii.contains("Vacia"));
        assert!(ascii.contains("(no data)"));
    }
}
