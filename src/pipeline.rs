//! The full batch run.
//!
//! One run is strictly sequential: read the snapshot, resolve every
//! observation, clear the target, write the enriched grid in chunks, then
//! materialize the inconsistency report. The overlap audit is an
//! independent pass over the same inputs, invoked separately.

use log::info;

use crate::cell::Cell;
use crate::config::RunConfig;
use crate::context::RunContext;
use crate::error::TenureResult;
use crate::overlap::detect_overlaps;
use crate::report::{inconsistency_grid, overlap_grid};
use crate::resolve::resolve_all;
use crate::store::{StoreError, TabularStore};
use crate::writer::{BulkWriter, DerivedColumn};

/// Counters from a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Observations processed.
    pub observations: usize,

    /// Observations flagged as ambiguous or unmatched.
    pub inconsistencies: usize,

    /// Rows written to the target sheet, header included.
    pub rows_written: usize,
}

/// Counters from a completed overlap audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapSummary {
    /// Entities with at least one cross-party overlap.
    pub entities: usize,

    /// Implicated intervals across all entities.
    pub records: usize,
}

/// Batch pipeline over a tabular store.
#[derive(Debug)]
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Resolves the snapshot and materializes the enriched grid plus the
    /// inconsistency report.
    ///
    /// # Errors
    /// A missing input sheet or a failed chunk write terminates the run;
    /// nothing is retried.
    pub fn run<S: TabularStore>(&self, store: &mut S) -> TenureResult<RunSummary> {
        let ctx = RunContext::build(store, self.config.clone())?;
        let config = &ctx.config;

        let resolution = resolve_all(&ctx.observations, &ctx.index, config);

        let assignee_column = DerivedColumn::new(
            &config.output_columns.assignee,
            resolution
                .resolved
                .iter()
                .map(|r| {
                    if r.assignees.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(r.joined(&config.separator))
                    }
                })
                .collect(),
        );
        let category_column = DerivedColumn::new(
            &config.output_columns.category,
            ctx.observations
                .iter()
                .map(|o| {
                    let label = ctx.category_for(&o.entity);
                    if label.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(label)
                    }
                })
                .collect(),
        );

        let mut writer = BulkWriter::new(config.chunking.clone());

        prepare_sheet(store, &config.sheets.target)?;
        writer.write_complete(
            store,
            &config.sheets.target,
            &ctx.source.header,
            &ctx.source.rows,
            &[assignee_column, category_column],
        )?;
        let rows_written = store.last_row(&config.sheets.target)?;

        prepare_sheet(store, &config.sheets.inconsistencies)?;
        let report = inconsistency_grid(&resolution.inconsistencies, config);
        writer.write_grid(store, &config.sheets.inconsistencies, &report)?;

        let summary = RunSummary {
            observations: ctx.observations.len(),
            inconsistencies: resolution.inconsistencies.len(),
            rows_written,
        };
        info!(
            "run complete: {} observations, {} flagged, {} rows written",
            summary.observations, summary.inconsistencies, summary.rows_written
        );
        Ok(summary)
    }

    /// Detects cross-party overlaps and materializes the overlap report.
    ///
    /// Independent of [`run`](Self::run): it reads the same snapshot and
    /// can execute on its own.
    ///
    /// # Errors
    /// Same failure modes as [`run`](Self::run).
    pub fn overlap_audit<S: TabularStore>(&self, store: &mut S) -> TenureResult<OverlapSummary> {
        let ctx = RunContext::build(store, self.config.clone())?;
        let config = &ctx.config;

        let groups = detect_overlaps(&ctx.index);

        prepare_sheet(store, &config.sheets.overlaps)?;
        let report = overlap_grid(&groups, config);
        let mut writer = BulkWriter::new(config.chunking.clone());
        writer.write_grid(store, &config.sheets.overlaps, &report)?;

        Ok(OverlapSummary {
            entities: groups.len(),
            records: groups.iter().map(|g| g.records.len()).sum(),
        })
    }
}

/// Clears an output sheet, creating it first if absent.
fn prepare_sheet<S: TabularStore + ?Sized>(store: &mut S, name: &str) -> Result<(), StoreError> {
    match store.clear(name) {
        Ok(()) => Ok(()),
        Err(StoreError::SheetNotFound(_)) => store.insert_sheet(name),
        Err(other) => Err(other),
    }
}
