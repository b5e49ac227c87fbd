//! Declared sheet schemas.
//!
//! Sheet and column names are an exact-match contract with the source
//! workbook: renaming either in the file breaks loading with a
//! [`DataError::MissingColumn`](crate::DataError::MissingColumn) rather
//! than a type error surfacing later inside a computation.

use serde::{Deserialize, Serialize};

/// Declared type of a sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit integer (years, quarters, counts stored as whole numbers)
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 text (provinces, technologies)
    Text,
}

impl ColumnType {
    /// Human-readable name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

/// A single column declaration: exact header name plus expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Exact header cell text
    pub name: &'static str,
    /// Expected type of every data cell in the column
    pub dtype: ColumnType,
}

/// Schema of one named sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSchema {
    /// Exact sheet name inside the workbook
    pub sheet: &'static str,
    /// Required columns; extra columns in the file are ignored
    pub columns: &'static [ColumnSpec],
}

/// Well-known column names shared across sheets.
pub mod columns {
    /// Province name, the join key for every KPI.
    pub const PROVINCE: &str = "Provincia";
    /// Access technology (ADSL, cablemodem, fibra optica, ...).
    pub const TECHNOLOGY: &str = "Tecnologia";
    /// Number of access lines.
    pub const ACCESSES: &str = "Cantidad";
    /// Mean download speed in Mbps.
    pub const SPEED: &str = "Velocidad";
    /// Calendar year.
    pub const YEAR: &str = "Anio";
    /// Quarter within the year, 1 through 4.
    pub const QUARTER: &str = "Trimestre";
    /// Revenue in thousands of pesos.
    pub const REVENUE: &str = "Ingresos";
    /// Fixed internet accesses per 100 households.
    pub const PENETRATION: &str = "Accesos_por_100_hogares";
}

/// Accesses by technology and locality, the main fact sheet.
pub const TECHNOLOGY_ACCESSES: SheetSchema = SheetSchema {
    sheet: "Accesos_tecnologia_localidad",
    columns: &[
        ColumnSpec { name: columns::PROVINCE, dtype: ColumnType::Text },
        ColumnSpec { name: columns::TECHNOLOGY, dtype: ColumnType::Text },
        ColumnSpec { name: columns::ACCESSES, dtype: ColumnType::Float },
        ColumnSpec { name: columns::SPEED, dtype: ColumnType::Float },
        ColumnSpec { name: columns::YEAR, dtype: ColumnType::Int },
        ColumnSpec { name: columns::QUARTER, dtype: ColumnType::Int },
    ],
};

/// Operator revenue by province and quarter.
pub const REVENUE: SheetSchema = SheetSchema {
    sheet: "Ingresos",
    columns: &[
        ColumnSpec { name: columns::PROVINCE, dtype: ColumnType::Text },
        ColumnSpec { name: columns::YEAR, dtype: ColumnType::Int },
        ColumnSpec { name: columns::QUARTER, dtype: ColumnType::Int },
        ColumnSpec { name: columns::REVENUE, dtype: ColumnType::Float },
    ],
};

/// Penetration per 100 households by province and quarter.
pub const PENETRATION: SheetSchema = SheetSchema {
    sheet: "Penetracion",
    columns: &[
        ColumnSpec { name: columns::PROVINCE, dtype: ColumnType::Text },
        ColumnSpec { name: columns::YEAR, dtype: ColumnType::Int },
        ColumnSpec { name: columns::QUARTER, dtype: ColumnType::Int },
        ColumnSpec { name: columns::PENETRATION, dtype: ColumnType::Float },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_keyed_on_province() {
        for schema in [TECHNOLOGY_ACCESSES, REVENUE, PENETRATION] {
            assert!(
                schema.columns.iter().any(|c| c.name == columns::PROVINCE),
                "sheet '{}' lacks the join key",
                schema.sheet
            );
        }
    }

    #[test]
    fn test_column_type_names() {
        assert_eq!(ColumnType::Int.as_str(), "integer");
        assert_eq!(ColumnType::Float.as_str(), "float");
        assert_eq!(ColumnType::Text.as_str(), "text");
    }
}
