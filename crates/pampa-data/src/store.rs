//! Session table cache.
//!
//! Each sheet is parsed at most once per session. The cache has no
//! invalidation: the source workbook is static for the lifetime of the
//! process. After a sheet is populated the cached frame is immutable
//! and handed out as a shared [`Arc`], so a `WorkbookStore` behind a
//! shared reference is safe to use from concurrent readers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use polars::prelude::DataFrame;
use tracing::trace;

use crate::error::Result;
use crate::schema::SheetSchema;
use crate::workbook::Workbook;

/// Load-once cache of sheets from a single workbook.
#[derive(Debug)]
pub struct WorkbookStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    workbook: Workbook,
    sheets: HashMap<&'static str, Arc<DataFrame>>,
}

impl WorkbookStore {
    /// Open the workbook at `path` with an empty cache.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let workbook = Workbook::open(path)?;
        Ok(Self {
            path: workbook.path().to_path_buf(),
            inner: Mutex::new(Inner {
                workbook,
                sheets: HashMap::new(),
            }),
        })
    }

    /// Path of the underlying workbook.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch a sheet, loading and validating it on first access.
    ///
    /// Subsequent calls for the same schema return the cached frame.
    pub fn sheet(&self, schema: &SheetSchema) -> Result<Arc<DataFrame>> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(df) = inner.sheets.get(schema.sheet) {
            trace!(sheet = schema.sheet, "cache hit");
            return Ok(Arc::clone(df));
        }
        let df = Arc::new(inner.workbook.load(schema)?);
        inner.sheets.insert(schema.sheet, Arc::clone(&df));
        Ok(df)
    }

    /// Number of sheets currently cached.
    pub fn cached_sheets(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sheets
            .len()
    }
}
