//! Per-run context.
//!
//! Everything a run needs (configuration, the source snapshot, both
//! lookup indexes) is built exactly once here, passed by reference to the
//! resolver, overlap detector, and writer, and dropped when the run ends.
//! There is no ambient state and nothing to clear between runs.

use log::{info, warn};

use crate::columns::{AssignmentBindings, ObservationBindings};
use crate::config::RunConfig;
use crate::index::{CategoryIndex, IntervalIndex};
use crate::model::Observation;
use crate::store::{SheetData, StoreError, TabularStore};

/// Snapshot-backed state for one run.
#[derive(Debug)]
pub struct RunContext {
    /// The run configuration.
    pub config: RunConfig,

    /// The observation sheet as read, for the complete-grid write.
    pub source: SheetData,

    /// Extracted observations, one per source row.
    pub observations: Vec<Observation>,

    /// Entity → assignment intervals.
    pub index: IntervalIndex,

    /// Value → category column lookup.
    pub categories: CategoryIndex,
}

impl RunContext {
    /// Reads the three input sheets and builds both indexes.
    ///
    /// Column names resolve to positional indices here, once; a missing
    /// column logs a warning and degrades to empty extracted fields. A
    /// missing *sheet* is fatal, before anything is written.
    ///
    /// # Errors
    /// `StoreError::SheetNotFound` for any absent input sheet.
    pub fn build<S: TabularStore + ?Sized>(
        store: &S,
        config: RunConfig,
    ) -> Result<Self, StoreError> {
        let source = store.read_all(&config.sheets.observations)?;
        let assignment_data = store.read_all(&config.sheets.assignments)?;
        let category_data = store.read_all(&config.sheets.categories)?;

        if source.rows.len() > config.max_snapshot_rows {
            warn!(
                "observation snapshot has {} rows, above the advisory limit of {}",
                source.rows.len(),
                config.max_snapshot_rows
            );
        }

        let observation_bindings =
            ObservationBindings::resolve(&source.header, &config.observation_columns);
        let assignment_bindings =
            AssignmentBindings::resolve(&assignment_data.header, &config.assignment_columns);

        let observations = source
            .rows
            .iter()
            .map(|row| observation_bindings.observation(row))
            .collect();

        let assignments = assignment_data
            .rows
            .iter()
            .map(|row| assignment_bindings.assignment(row))
            .collect();

        let index = IntervalIndex::build(assignments);
        let categories = CategoryIndex::build(&category_data);

        info!(
            "run context ready: {} observations, {} assigned entities",
            source.rows.len(),
            index.len()
        );

        Ok(Self {
            config,
            source,
            observations,
            index,
            categories,
        })
    }

    /// The category label for an entity: empty when skip-listed or
    /// unmatched.
    #[must_use]
    pub fn category_for(&self, entity: &str) -> String {
        if self.config.is_skipped(entity) {
            return String::new();
        }
        self.categories
            .resolve(entity)
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    fn store_with_inputs() -> MemoryStore {
        MemoryStore::new()
            .with_sheet(
                "Observations",
                vec![
                    row(&["Account", "Month", "Assignment Id", "Name"]),
                    row(&["Acme", "February 2024", "r1", "Widget QA"]),
                ],
            )
            .with_sheet(
                "Assignments",
                vec![
                    row(&["Account", "Name", "Start Date", "End Date", "Position name"]),
                    row(&["Acme", "Alice", "2024-01-01", "2024-03-31", "Lead"]),
                ],
            )
            .with_sheet(
                "Categories",
                vec![row(&["Payed", "Internal Dev"]), row(&["Acme", ""])],
            )
    }

    #[test]
    fn build_extracts_observations_and_indexes() {
        let ctx = RunContext::build(&store_with_inputs(), RunConfig::default()).unwrap();

        assert_eq!(ctx.observations.len(), 1);
        assert_eq!(ctx.observations[0].entity, "Acme");
        assert_eq!(ctx.observations[0].period, Some(d(2024, 2, 1)));

        let acme = ctx.index.lookup("Acme");
        assert_eq!(acme.len(), 1);
        assert_eq!(acme[0].assignee, "Alice");
        assert_eq!(acme[0].role.as_deref(), Some("Lead"));

        assert_eq!(ctx.category_for("Acme"), "Payed");
        assert_eq!(ctx.category_for("Unknown"), "");
    }

    #[test]
    fn missing_input_sheet_is_fatal() {
        let store = MemoryStore::new();
        let err = RunContext::build(&store, RunConfig::default()).unwrap_err();
        assert!(matches!(err, StoreError::SheetNotFound(_)));
    }

    #[test]
    fn skip_listed_entity_has_no_category() {
        let mut config = RunConfig::default();
        config.skip_entities.push("Acme".to_string());
        let ctx = RunContext::build(&store_with_inputs(), config).unwrap();
        assert_eq!(ctx.category_for("Acme"), "");
    }
}
