//! Chunked bulk writes.
//!
//! A result grid is never written in one unbounded call. Chunk size derives
//! from a cell budget, so wide tables automatically get smaller chunks; a
//! fixed pause follows every chunk except the last, letting a rate-limited
//! store recover capacity. A failed chunk aborts the whole operation with
//! no retry; the store may keep the prefix already written, since there is
//! no multi-chunk transaction.

use std::time::Duration;

use log::{debug, info, warn};

use crate::cell::Cell;
use crate::config::ChunkPolicy;
use crate::error::WriteError;
use crate::store::TabularStore;

/// Timing seam for the inter-chunk pause.
///
/// Production uses [`ThreadPacer`]; tests substitute a recorder so chunk
/// pacing is observable without real sleeps.
pub trait Pacer {
    /// Yield for the given duration.
    fn pause(&mut self, delay: Duration);
}

/// Pacer that blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Row partitioning for one grid under a [`ChunkPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    rows_per_chunk: usize,
    total_rows: usize,
}

impl ChunkPlan {
    /// Computes the plan:
    /// `rows_per_chunk = max(min_rows_per_chunk, max_cells_per_chunk / total_cols)`,
    /// floored at one row so progress is always possible.
    #[must_use]
    pub fn new(total_rows: usize, total_cols: usize, policy: &ChunkPolicy) -> Self {
        let by_cells = if total_cols == 0 {
            0
        } else {
            policy.max_cells_per_chunk / total_cols
        };
        let rows_per_chunk = policy.min_rows_per_chunk.max(by_cells).max(1);
        Self {
            rows_per_chunk,
            total_rows,
        }
    }

    /// Rows in every chunk but possibly the last.
    #[must_use]
    pub const fn rows_per_chunk(&self) -> usize {
        self.rows_per_chunk
    }

    /// Number of chunk writes the plan produces.
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        (self.total_rows + self.rows_per_chunk - 1) / self.rows_per_chunk
    }

    /// Sequential, non-overlapping row ranges covering the grid.
    pub fn ranges(&self) -> impl Iterator<Item = std::ops::Range<usize>> {
        let rows_per_chunk = self.rows_per_chunk;
        let total_rows = self.total_rows;
        (0..self.chunk_count()).map(move |i| {
            let start = i * rows_per_chunk;
            let end = (start + rows_per_chunk).min(total_rows);
            start..end
        })
    }
}

/// Progress of a bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteState {
    /// Nothing started yet.
    Idle,
    /// Assembling the result grid.
    Building,
    /// Writing chunk `chunk` of `of`.
    Writing {
        /// 1-based index of the chunk being written.
        chunk: usize,
        /// Total number of chunks.
        of: usize,
    },
    /// All chunks written.
    Done,
    /// A chunk write failed; rows before `start` may be committed.
    Failed {
        /// First row of the failing chunk.
        start: usize,
        /// One past the last row of the failing chunk.
        end: usize,
    },
}

/// A derived column appended to the original rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColumn {
    /// Column title, appended to the header row.
    pub name: String,

    /// One value per original row; missing tail values become empty cells.
    pub values: Vec<Cell>,
}

impl DerivedColumn {
    /// Creates a derived column.
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Concatenates original rows with derived columns into a complete grid,
/// header row first.
#[must_use]
pub fn assemble_grid(
    header: &[String],
    rows: &[Vec<Cell>],
    derived: &[DerivedColumn],
) -> Vec<Vec<Cell>> {
    let mut grid = Vec::with_capacity(rows.len() + 1);

    let mut header_row: Vec<Cell> = header.iter().map(Cell::text).collect();
    header_row.extend(derived.iter().map(|c| Cell::text(&c.name)));
    grid.push(header_row);

    for (i, row) in rows.iter().enumerate() {
        let mut complete = row.clone();
        complete.extend(
            derived
                .iter()
                .map(|c| c.values.get(i).cloned().unwrap_or(Cell::Empty)),
        );
        grid.push(complete);
    }

    grid
}

/// Chunked writer for complete result grids.
#[derive(Debug)]
pub struct BulkWriter<P = ThreadPacer> {
    policy: ChunkPolicy,
    pacer: P,
    state: WriteState,
}

impl BulkWriter<ThreadPacer> {
    /// Creates a writer that pauses by sleeping the current thread.
    #[must_use]
    pub fn new(policy: ChunkPolicy) -> Self {
        Self::with_pacer(policy, ThreadPacer)
    }
}

impl<P: Pacer> BulkWriter<P> {
    /// Creates a writer with a custom pacing seam.
    #[must_use]
    pub fn with_pacer(policy: ChunkPolicy, pacer: P) -> Self {
        Self {
            policy,
            pacer,
            state: WriteState::Idle,
        }
    }

    /// Current progress.
    #[must_use]
    pub const fn state(&self) -> &WriteState {
        &self.state
    }

    /// Assembles original rows plus derived columns and writes the complete
    /// grid in chunks.
    ///
    /// # Errors
    /// [`WriteError::Chunk`] naming the failing row range; earlier chunks
    /// stay committed.
    pub fn write_complete<S: TabularStore + ?Sized>(
        &mut self,
        store: &mut S,
        sheet: &str,
        header: &[String],
        rows: &[Vec<Cell>],
        derived: &[DerivedColumn],
    ) -> Result<(), WriteError> {
        self.state = WriteState::Building;
        let grid = assemble_grid(header, rows, derived);
        self.write_grid(store, sheet, &grid)
    }

    /// Writes an already assembled grid (header row included) in chunks.
    ///
    /// # Errors
    /// [`WriteError::Chunk`] naming the failing row range.
    pub fn write_grid<S: TabularStore + ?Sized>(
        &mut self,
        store: &mut S,
        sheet: &str,
        grid: &[Vec<Cell>],
    ) -> Result<(), WriteError> {
        let total_rows = grid.len();
        let total_cols = grid.first().map_or(0, Vec::len);

        if total_rows == 0 || total_cols == 0 {
            debug!("nothing to write to '{sheet}'");
            self.state = WriteState::Done;
            return Ok(());
        }

        let plan = ChunkPlan::new(total_rows, total_cols, &self.policy);
        let chunks = plan.chunk_count();
        debug!(
            "writing {total_rows} rows × {total_cols} cols to '{sheet}': \
             {chunks} chunk(s) of up to {} rows",
            plan.rows_per_chunk()
        );

        for (i, range) in plan.ranges().enumerate() {
            self.state = WriteState::Writing {
                chunk: i + 1,
                of: chunks,
            };

            if let Err(source) = store.write_range(sheet, range.start, 0, &grid[range.clone()]) {
                warn!(
                    "chunk {}/{chunks} failed on '{sheet}' (rows {}..{})",
                    i + 1,
                    range.start,
                    range.end
                );
                self.state = WriteState::Failed {
                    start: range.start,
                    end: range.end,
                };
                return Err(WriteError::Chunk {
                    start: range.start,
                    end: range.end,
                    source,
                });
            }

            if i + 1 < chunks {
                self.pacer
                    .pause(Duration::from_millis(self.policy.inter_chunk_delay_ms));
            }
        }

        info!("wrote {total_rows} rows to '{sheet}' in {chunks} chunk(s)");
        self.state = WriteState::Done;
        Ok(())
    }
}
