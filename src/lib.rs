//! # Tenure: temporal assignment resolution over tabular snapshots
//!
//! Tenure answers one question for every (entity, month) observation in a
//! snapshot: which assignment intervals were valid during that month? It
//! flags ambiguous and unmatched observations, detects overlapping
//! assignments between different responsible parties, and materializes the
//! enriched result grid through a chunked, delay-spaced bulk-write pipeline
//! that respects a rate-limited store's per-call capacity.
//!
//! ## Core Concepts
//!
//! - **Entity key**: the business identifier joining observations to
//!   assignments
//! - **Assignment**: a responsible party valid over a closed date interval
//! - **Resolution**: the matched parties for one observation, with an
//!   ambiguity flag (exactly one match is the only clean state)
//! - **Tabular Store**: the external row/column grid the pipeline reads
//!   from and writes to
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tenure::{MemoryStore, Pipeline, RunConfig};
//!
//! let config = RunConfig::from_json(r#"{
//!     "skip_entities": ["", "Terminated"],
//!     "exceptions": {"Bench": "Bench Lead"}
//! }"#)?;
//!
//! let mut store = /* a TabularStore backed by your sheet service */;
//! let pipeline = Pipeline::new(config);
//! let summary = pipeline.run(&mut store)?;
//! println!("{} observations, {} flagged", summary.observations, summary.inconsistencies);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod columns;
pub mod config;
pub mod context;
pub mod error;
pub mod index;
pub mod model;
pub mod overlap;
pub mod pipeline;
pub mod report;
pub mod resolve;
pub mod span;
pub mod store;
pub mod writer;

// Re-export primary types at crate root for convenience
pub use cell::Cell;
pub use columns::{AssignmentBindings, ColumnRef, ObservationBindings};
pub use config::{
    AssignmentColumns, ChunkPolicy, ObservationColumns, OutputColumns, RunConfig, SheetNames,
};
pub use context::RunContext;
pub use error::{TenureError, TenureResult, WriteError};
pub use index::{CategoryIndex, IntervalIndex};
pub use model::{Assignment, InconsistencyRecord, IssueKind, Observation, ResolvedAssignment};
pub use overlap::{detect_overlaps, OverlapGroup, OverlapRecord};
pub use pipeline::{OverlapSummary, Pipeline, RunSummary};
pub use resolve::{resolve, resolve_all, ResolutionOutcome, ResolutionSet};
pub use span::{parse_month, DateSpan};
pub use store::{MemoryStore, SheetData, StoreError, TabularStore};
pub use writer::{
    assemble_grid, BulkWriter, ChunkPlan, DerivedColumn, Pacer, ThreadPacer, WriteState,
};
