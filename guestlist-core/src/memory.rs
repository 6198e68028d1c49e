//! In-memory [`SheetStore`] that records writes.
//!
//! Reads follow the Sheets API convention of dropping trailing empty cells
//! and trailing empty rows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{GuestListError, GuestListResult};
use crate::layout::{CellRange, Column, FIRST_DATA_ROW};
use crate::store::SheetStore;

/// A committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub sheet: String,
    pub range: CellRange,
    pub values: Vec<Vec<String>>,
}

#[derive(Default)]
struct Inner {
    /// Data rows per sheet, header excluded.
    sheets: HashMap<String, Vec<Vec<String>>>,
    writes: Vec<WriteRecord>,
    attempted_writes: usize,
    fail_write_at: Option<usize>,
    fail_fetch: bool,
}

#[derive(Clone, Default)]
pub struct MemorySheet {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with one sheet holding `rows` as its data rows.
    pub fn with_rows(sheet: &str, rows: &[&[&str]]) -> Self {
        let store = Self::new();
        store.set_rows(sheet, rows);
        store
    }

    pub fn set_rows(&self, sheet: &str, rows: &[&[&str]]) {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self.lock().sheets.insert(sheet.to_string(), rows);
    }

    /// Make the write with this 0-based attempt number fail, and every one after.
    pub fn fail_writes_from(&self, attempt: usize) {
        self.lock().fail_write_at = Some(attempt);
    }

    pub fn fail_fetches(&self) {
        self.lock().fail_fetch = true;
    }

    /// Successful writes in the order they were applied.
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.lock().writes.clone()
    }

    /// Current value of a single cell, `None` when never set.
    pub fn cell(&self, sheet: &str, column: Column, row: u32) -> Option<String> {
        let inner = self.lock();
        let index = row.checked_sub(FIRST_DATA_ROW)? as usize;
        inner
            .sheets
            .get(sheet)?
            .get(index)?
            .get(column.index())
            .cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Top-left corner of a range as (data row index, column index).
fn origin(range: CellRange) -> (usize, usize) {
    match range {
        CellRange::Cell { column, row } => (row.scan_index(), column.index()),
        CellRange::Span { first, .. } => (0, first.index()),
    }
}

fn trim_row(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|c| c.is_empty()) {
        row.pop();
    }
    row
}

fn read_range(rows: &[Vec<String>], range: CellRange) -> Vec<Vec<String>> {
    let (row_span, first, last) = match range {
        CellRange::Cell { column, row } => {
            let index = row.scan_index();
            (index..index + 1, column.index(), column.index())
        }
        CellRange::Span { first, last } => (0..rows.len(), first.index(), last.index()),
    };

    let mut values: Vec<Vec<String>> = row_span
        .map(|index| {
            let row = rows.get(index).map(Vec::as_slice).unwrap_or_default();
            let cells = (first..=last)
                .map(|col| row.get(col).cloned().unwrap_or_default())
                .collect();
            trim_row(cells)
        })
        .collect();

    while values.last().is_some_and(|row| row.is_empty()) {
        values.pop();
    }
    values
}

impl SheetStore for MemorySheet {
    async fn fetch(&self, sheet: &str, range: CellRange) -> GuestListResult<Vec<Vec<String>>> {
        let inner = self.lock();
        if inner.fail_fetch {
            return Err(GuestListError::Store(format!(
                "fetch of {}!{} failed",
                sheet, range
            )));
        }

        let rows = inner.sheets.get(sheet).map(Vec::as_slice).unwrap_or_default();
        Ok(read_range(rows, range))
    }

    async fn write(
        &self,
        sheet: &str,
        range: CellRange,
        values: Vec<Vec<String>>,
    ) -> GuestListResult<()> {
        let mut inner = self.lock();

        let attempt = inner.attempted_writes;
        inner.attempted_writes += 1;
        if inner.fail_write_at.is_some_and(|at| attempt >= at) {
            return Err(GuestListError::Store(format!(
                "write to {}!{} failed",
                sheet, range
            )));
        }

        let (row0, col0) = origin(range);
        let rows = inner.sheets.entry(sheet.to_string()).or_default();
        for (dr, value_row) in values.iter().enumerate() {
            let row_index = row0 + dr;
            if rows.len() <= row_index {
                rows.resize(row_index + 1, Vec::new());
            }
            let row = &mut rows[row_index];
            for (dc, value) in value_row.iter().enumerate() {
                let col = col0 + dc;
                if row.len() <= col {
                    row.resize(col + 1, String::new());
                }
                row[col] = value.clone();
            }
        }

        inner.writes.push(WriteRecord {
            sheet: sheet.to_string(),
            range,
            values,
        });
        Ok(())
    }
}
