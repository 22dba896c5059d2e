//! Run configuration.
//!
//! Loaded once at process start and owned by the run context. Every field
//! has a default, so embedders override only what differs from the common
//! deployment: sheet names, column titles, the skip-list, forced exception
//! mappings, and the chunked-write knobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Chunked-write parameters for the bulk writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkPolicy {
    /// Cell budget per write call. Chunk row counts derive from this, so
    /// wide tables automatically get smaller chunks.
    pub max_cells_per_chunk: usize,

    /// Floor on rows per chunk, to avoid a storm of tiny writes.
    pub min_rows_per_chunk: usize,

    /// Pause between chunks, letting a rate-limited store recover.
    pub inter_chunk_delay_ms: u64,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            max_cells_per_chunk: 15_000,
            min_rows_per_chunk: 100,
            inter_chunk_delay_ms: 200,
        }
    }
}

/// Names of the sheets a run reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetNames {
    /// Input: one row per (entity, month) observation.
    pub observations: String,
    /// Input: assignment intervals.
    pub assignments: String,
    /// Input: wide categorical table, one column per category.
    pub categories: String,
    /// Output: the complete enriched grid.
    pub target: String,
    /// Output: ambiguous and unmatched observations.
    pub inconsistencies: String,
    /// Output: cross-party overlapping assignments.
    pub overlaps: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            observations: "Observations".to_string(),
            assignments: "Assignments".to_string(),
            categories: "Categories".to_string(),
            target: "Resolved".to_string(),
            inconsistencies: "Assignment inconsistencies".to_string(),
            overlaps: "Assignment overlaps".to_string(),
        }
    }
}

/// Column titles of the observation sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationColumns {
    /// The entity key joining observations to assignments.
    pub entity: String,
    /// The observation month.
    pub period: String,
    /// Stable identifier of the observation row.
    pub observation_id: String,
    /// Display name of the observed subject.
    pub subject: String,
}

impl Default for ObservationColumns {
    fn default() -> Self {
        Self {
            entity: "Account".to_string(),
            period: "Month".to_string(),
            observation_id: "Assignment Id".to_string(),
            subject: "Name".to_string(),
        }
    }
}

/// Column titles of the assignment sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentColumns {
    /// The entity key.
    pub entity: String,
    /// The responsible party.
    pub assignee: String,
    /// Interval start date.
    pub start: String,
    /// Interval end date.
    pub end: String,
    /// Optional role description.
    pub role: String,
}

impl Default for AssignmentColumns {
    fn default() -> Self {
        Self {
            entity: "Account".to_string(),
            assignee: "Name".to_string(),
            start: "Start Date".to_string(),
            end: "End Date".to_string(),
            role: "Position name".to_string(),
        }
    }
}

/// Titles of the derived columns appended to the target grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputColumns {
    /// Resolved assignee names, joined.
    pub assignee: String,
    /// Resolved category label.
    pub category: String,
}

impl Default for OutputColumns {
    fn default() -> Self {
        Self {
            assignee: "Assignee".to_string(),
            category: "Category".to_string(),
        }
    }
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Entities resolved to an intentionally blank output, in precedence
    /// over everything else. The blank entity key is skipped by default.
    pub skip_entities: Vec<String>,

    /// Forced output literals per entity, bypassing interval resolution.
    pub exceptions: BTreeMap<String, String>,

    /// Separator for joining multiple matched assignee names.
    pub separator: String,

    /// Chunked-write parameters.
    pub chunking: ChunkPolicy,

    /// Sheet names.
    pub sheets: SheetNames,

    /// Observation sheet column titles.
    pub observation_columns: ObservationColumns,

    /// Assignment sheet column titles.
    pub assignment_columns: AssignmentColumns,

    /// Derived output column titles.
    pub output_columns: OutputColumns,

    /// Advisory snapshot size; larger snapshots log a warning.
    pub max_snapshot_rows: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            skip_entities: vec![String::new()],
            exceptions: BTreeMap::new(),
            separator: ", ".to_string(),
            chunking: ChunkPolicy::default(),
            sheets: SheetNames::default(),
            observation_columns: ObservationColumns::default(),
            assignment_columns: AssignmentColumns::default(),
            output_columns: OutputColumns::default(),
            max_snapshot_rows: 50_000,
        }
    }
}

impl RunConfig {
    /// Loads a configuration from JSON, filling unset fields with defaults.
    ///
    /// # Errors
    /// Returns the underlying deserialization error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether this entity is on the skip-list.
    #[must_use]
    pub fn is_skipped(&self, entity: &str) -> bool {
        self.skip_entities.iter().any(|s| s == entity)
    }

    /// The forced output literal for this entity, if one is configured.
    #[must_use]
    pub fn exception_for(&self, entity: &str) -> Option<&str> {
        self.exceptions.get(entity).map(String::as_str)
    }
}
