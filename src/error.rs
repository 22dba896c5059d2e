//! Error types for the tenure pipeline.
//!
//! Degraded configuration (an unresolvable column name) is a logged warning,
//! not an error: the run continues with visibly empty output for the
//! affected fields. Errors here are the conditions that terminate a run.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by the chunked bulk writer.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A chunk write failed. The run is aborted; rows before `start` may
    /// already be committed (no multi-chunk transaction).
    #[error("chunk write failed for rows {start}..{end}: {source}")]
    Chunk {
        /// First row of the failing chunk (0-based, header row included).
        start: usize,
        /// One past the last row of the failing chunk.
        end: usize,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },
}

impl WriteError {
    /// The row range of the failing chunk.
    #[must_use]
    pub fn failed_rows(&self) -> std::ops::Range<usize> {
        match self {
            Self::Chunk { start, end, .. } => *start..*end,
        }
    }
}

/// Top-level error type for a pipeline run.
///
/// A run either completes with a written grid or terminates with the first
/// fatal condition encountered, wrapped in this enum.
#[derive(Debug, Error)]
pub enum TenureError {
    /// A required sheet was missing or the store itself failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The bulk write aborted mid-run.
    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

impl TenureError {
    /// Returns true if this is a store error.
    #[must_use]
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns true if this is a write error.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }
}

/// Result type alias for pipeline operations.
pub type TenureResult<T> = Result<T, TenureError>;
