//! In-memory tabular store.
//!
//! Reference implementation of [`TabularStore`] backed by plain vectors.
//! Intended for tests and embedded use; it also supports injecting a write
//! failure after N successful writes, so chunk-abort behavior can be
//! exercised deterministically.

use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::store::traits::{SheetData, StoreError, TabularStore};

/// Growable in-memory sheet collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: BTreeMap<String, Vec<Vec<Cell>>>,
    fail_writes_after: Option<usize>,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet with the given grid (builder style, for tests).
    #[must_use]
    pub fn with_sheet(mut self, name: &str, grid: Vec<Vec<Cell>>) -> Self {
        self.sheets.insert(name.to_string(), grid);
        self
    }

    /// Borrows a sheet's raw grid, if present.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<&Vec<Vec<Cell>>> {
        self.sheets.get(name)
    }

    /// Makes every `write_range` call after the first `n` fail with a
    /// backend error.
    pub fn fail_writes_after(&mut self, n: usize) {
        self.fail_writes_after = Some(n);
    }

    /// Number of `write_range` calls accepted so far.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl TabularStore for MemoryStore {
    fn read_all(&self, sheet: &str) -> Result<SheetData, StoreError> {
        let grid = self
            .sheets
            .get(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;

        let mut iter = grid.iter();
        let header = iter
            .next()
            .map(|row| row.iter().map(Cell::to_string).collect())
            .unwrap_or_default();
        let rows = iter.cloned().collect();

        Ok(SheetData { header, rows })
    }

    fn write_range(
        &mut self,
        sheet: &str,
        row_offset: usize,
        col_offset: usize,
        grid: &[Vec<Cell>],
    ) -> Result<(), StoreError> {
        if let Some(limit) = self.fail_writes_after {
            if self.writes >= limit {
                return Err(StoreError::Backend("injected write failure".to_string()));
            }
        }

        let target = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;

        for (i, row) in grid.iter().enumerate() {
            let row_index = row_offset + i;
            if target.len() <= row_index {
                target.resize(row_index + 1, Vec::new());
            }
            let target_row = &mut target[row_index];
            let needed = col_offset + row.len();
            if target_row.len() < needed {
                target_row.resize(needed, Cell::Empty);
            }
            target_row[col_offset..needed].clone_from_slice(row);
        }

        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self, sheet: &str) -> Result<(), StoreError> {
        let target = self
            .sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        target.clear();
        Ok(())
    }

    fn insert_sheet(&mut self, name: &str) -> Result<(), StoreError> {
        if self.sheets.contains_key(name) {
            return Err(StoreError::SheetExists(name.to_string()));
        }
        self.sheets.insert(name.to_string(), Vec::new());
        Ok(())
    }

    fn last_row(&self, sheet: &str) -> Result<usize, StoreError> {
        self.sheets
            .get(sheet)
            .map(Vec::len)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))
    }
}
