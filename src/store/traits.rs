//! Abstract tabular store trait.
//!
//! A store is a set of named sheets, each a row/column grid of cells
//! addressable by (row, column) index. The pipeline needs exactly five
//! operations: bulk read of a whole sheet, bulk write of a rectangular
//! range, clear, sheet creation, and the populated row count.

use thiserror::Error;

use crate::cell::Cell;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named sheet does not exist.
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// A sheet with this name already exists.
    #[error("sheet already exists: {0}")]
    SheetExists(String),

    /// Backend failure (rate limit, quota, connectivity).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A full-sheet snapshot: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    /// The first row, as column titles.
    pub header: Vec<String>,

    /// All rows below the header.
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    /// Positional index of a column title, case-sensitive exact match.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Number of columns in the header.
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Contract for tabular store backends.
pub trait TabularStore {
    /// Reads an entire sheet: header row plus data rows.
    ///
    /// # Errors
    /// `StoreError::SheetNotFound` if the sheet does not exist.
    fn read_all(&self, sheet: &str) -> Result<SheetData, StoreError>;

    /// Writes a rectangular grid at the given 0-based offsets.
    ///
    /// The sheet grows as needed to fit the grid.
    ///
    /// # Errors
    /// `StoreError::SheetNotFound` if the sheet does not exist, or a
    /// backend error for a failed write.
    fn write_range(
        &mut self,
        sheet: &str,
        row_offset: usize,
        col_offset: usize,
        grid: &[Vec<Cell>],
    ) -> Result<(), StoreError>;

    /// Removes all content from a sheet, header included.
    ///
    /// # Errors
    /// `StoreError::SheetNotFound` if the sheet does not exist.
    fn clear(&mut self, sheet: &str) -> Result<(), StoreError>;

    /// Creates a new empty sheet.
    ///
    /// # Errors
    /// `StoreError::SheetExists` if the name is already taken.
    fn insert_sheet(&mut self, name: &str) -> Result<(), StoreError>;

    /// Number of populated rows, header included. 0 for an empty sheet.
    ///
    /// # Errors
    /// `StoreError::SheetNotFound` if the sheet does not exist.
    fn last_row(&self, sheet: &str) -> Result<usize, StoreError>;
}
