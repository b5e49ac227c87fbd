//! Workbook reader: calamine sheets into typed polars frames.
//!
//! A [`Workbook`] wraps an open xlsx file. [`Workbook::load`] reads one
//! named sheet, matches its header row against a declared
//! [`SheetSchema`] and materializes the declared columns as a
//! [`DataFrame`]. Type checking happens here, at load time; downstream
//! code never sees an untyped cell.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use polars::prelude::*;
use tracing::debug;

use crate::error::{DataError, Result};
use crate::schema::{ColumnSpec, ColumnType, SheetSchema};

/// An open spreadsheet file.
pub struct Workbook {
    path: PathBuf,
    reader: Xlsx<BufReader<File>>,
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Workbook {
    /// Open a workbook file.
    ///
    /// Fails with [`DataError::NotFound`] if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(DataError::NotFound { path });
        }
        let reader = open_workbook(&path)?;
        Ok(Self { path, reader })
    }

    /// Path this workbook was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load one sheet and validate it against `schema`.
    ///
    /// Columns not named by the schema are ignored. Column order in the
    /// returned frame follows the schema, not the file. Row order
    /// follows the file.
    pub fn load(&mut self, schema: &SheetSchema) -> Result<DataFrame> {
        if !self.reader.sheet_names().iter().any(|s| s == schema.sheet) {
            return Err(DataError::SheetNotFound {
                sheet: schema.sheet.to_string(),
                path: self.path.clone(),
            });
        }
        let range = self.reader.worksheet_range(schema.sheet)?;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(|| DataError::EmptySheet {
            sheet: schema.sheet.to_string(),
        })?;

        // Resolve each declared column to its position in the header row.
        let mut indices = Vec::with_capacity(schema.columns.len());
        for spec in schema.columns {
            let idx = header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s.as_str() == spec.name))
                .ok_or_else(|| DataError::MissingColumn {
                    sheet: schema.sheet.to_string(),
                    column: spec.name.to_string(),
                })?;
            indices.push(idx);
        }

        let mut builders: Vec<ColumnBuilder> = schema
            .columns
            .iter()
            .map(|spec| ColumnBuilder::new(spec.dtype))
            .collect();

        for (row_idx, row) in rows.enumerate() {
            for ((spec, &col_idx), builder) in
                schema.columns.iter().zip(&indices).zip(&mut builders)
            {
                let cell = row.get(col_idx).unwrap_or(&Data::Empty);
                builder.push(cell).map_err(|found| DataError::MalformedCell {
                    sheet: schema.sheet.to_string(),
                    column: spec.name.to_string(),
                    row: row_idx + 1,
                    found,
                    expected: spec.dtype.as_str(),
                })?;
            }
        }

        let columns: Vec<Column> = schema
            .columns
            .iter()
            .zip(builders)
            .map(|(spec, builder)| builder.finish(spec))
            .collect();
        let df = DataFrame::new(columns)?;

        debug!(
            sheet = schema.sheet,
            rows = df.height(),
            "loaded sheet from {}",
            self.path.display()
        );
        Ok(df)
    }
}

/// Per-column accumulator, typed by the schema.
enum ColumnBuilder {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnBuilder {
    fn new(dtype: ColumnType) -> Self {
        match dtype {
            ColumnType::Int => Self::Int(Vec::new()),
            ColumnType::Float => Self::Float(Vec::new()),
            ColumnType::Text => Self::Text(Vec::new()),
        }
    }

    /// Append one cell, coercing the calamine value to the declared type.
    ///
    /// Returns a description of the cell on a type mismatch. Empty cells
    /// become nulls in every column type.
    fn push(&mut self, cell: &Data) -> std::result::Result<(), String> {
        match self {
            Self::Int(values) => match cell {
                Data::Int(i) => values.push(Some(*i)),
                // xlsx stores most numbers as floats, whole values included
                Data::Float(f) if f.fract() == 0.0 => values.push(Some(*f as i64)),
                Data::Empty => values.push(None),
                other => return Err(describe(other)),
            },
            Self::Float(values) => match cell {
                Data::Float(f) => values.push(Some(*f)),
                Data::Int(i) => values.push(Some(*i as f64)),
                Data::Empty => values.push(None),
                other => return Err(describe(other)),
            },
            Self::Text(values) => match cell {
                Data::String(s) => values.push(Some(s.clone())),
                Data::Empty => values.push(None),
                other => return Err(describe(other)),
            },
        }
        Ok(())
    }

    fn finish(self, spec: &ColumnSpec) -> Column {
        match self {
            Self::Int(values) => Series::new(spec.name.into(), values).into(),
            Self::Float(values) => Series::new(spec.name.into(), values).into(),
            Self::Text(values) => Series::new(spec.name.into(), values).into(),
        }
    }
}

fn describe(cell: &Data) -> String {
    match cell {
        Data::Int(i) => format!("integer {i}"),
        Data::Float(f) => format!("float {f}"),
        Data::String(s) => format!("text '{s}'"),
        Data::Bool(b) => format!("bool {b}"),
        Data::DateTime(_) | Data::DateTimeIso(_) => "a datetime".to_string(),
        Data::DurationIso(_) => "a duration".to_string(),
        Data::Error(e) => format!("cell error {e:?}"),
        Data::Empty => "an empty cell".to_string(),
    }
}
