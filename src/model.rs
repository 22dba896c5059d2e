//! Snapshot data model.
//!
//! All types here are read-only snapshots owned by one run; nothing
//! survives across runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::span::DateSpan;

/// An assignment interval: a party responsible for an entity over a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The entity key this assignment applies to.
    pub entity: String,

    /// The responsible party.
    pub assignee: String,

    /// Validity interval, inclusive on both ends.
    pub span: DateSpan,

    /// Optional role description.
    pub role: Option<String>,
}

/// One (entity, month) observation row from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// The entity key.
    pub entity: String,

    /// First day of the observed month. `None` when the period cell was
    /// missing or unparseable; such observations match nothing.
    pub period: Option<NaiveDate>,

    /// Stable identifier of the observation row.
    pub observation_id: String,

    /// Display name of the observed subject.
    pub subject: String,
}

/// The resolution result for one observation.
///
/// `match_count == 1` is the only consistent state: 0 means unassigned,
/// more than 1 means ambiguous. The count reflects matching *intervals*,
/// before assignee-name deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAssignment {
    /// Identifier of the resolved observation.
    pub observation_id: String,

    /// Matched assignee names, deduplicated in first-seen order.
    pub assignees: Vec<String>,

    /// Number of matching intervals, pre-dedup.
    pub match_count: usize,
}

impl ResolvedAssignment {
    /// Exactly one interval matched.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.match_count == 1
    }

    /// The output value: assignee names joined with the separator.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.assignees.join(separator)
    }
}

/// Why an observation was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No interval matched the observation's period.
    Unassigned,
    /// More than one interval matched.
    Ambiguous,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unassigned => write!(f, "No assignee matched"),
            Self::Ambiguous => write!(f, "Multiple assignees matched"),
        }
    }
}

/// An observation whose resolution was not clean, with the intervals that
/// matched it (empty for [`IssueKind::Unassigned`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InconsistencyRecord {
    /// What went wrong.
    pub issue: IssueKind,

    /// The flagged observation.
    pub observation: Observation,

    /// Every interval that matched it.
    pub matched: Vec<Assignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistency_is_exactly_one_match() {
        let mut resolved = ResolvedAssignment {
            observation_id: "r1".to_string(),
            assignees: vec!["Alice".to_string()],
            match_count: 1,
        };
        assert!(resolved.is_consistent());

        resolved.match_count = 0;
        assert!(!resolved.is_consistent());

        resolved.match_count = 2;
        assert!(!resolved.is_consistent());
    }

    #[test]
    fn joined_uses_the_separator() {
        let resolved = ResolvedAssignment {
            observation_id: "r1".to_string(),
            assignees: vec!["Alice".to_string(), "Bob".to_string()],
            match_count: 2,
        };
        assert_eq!(resolved.joined(", "), "Alice, Bob");
        assert_eq!(resolved.joined(" / "), "Alice / Bob");
    }

    #[test]
    fn issue_labels() {
        assert_eq!(IssueKind::Unassigned.to_string(), "No assignee matched");
        assert_eq!(IssueKind::Ambiguous.to_string(), "Multiple assignees matched");
    }
}
