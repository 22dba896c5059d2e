//! Temporal assignment resolution.
//!
//! For each observation: the skip-list wins first, then the forced
//! exception map, then interval matching against the index. A match count
//! other than exactly one is an ambiguity, recorded as data rather than
//! raised as an error. Skip-listed entities are exempt: their blank output
//! is intentional.

use log::info;

use crate::config::RunConfig;
use crate::index::IntervalIndex;
use crate::model::{Assignment, InconsistencyRecord, IssueKind, Observation, ResolvedAssignment};

/// The outcome of resolving a single observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionOutcome {
    /// The resolution itself.
    pub resolved: ResolvedAssignment,

    /// Present when the observation is ambiguous or unmatched and not
    /// skip-listed.
    pub inconsistency: Option<InconsistencyRecord>,
}

/// Resolves one observation against the interval index.
#[must_use]
pub fn resolve(
    observation: &Observation,
    index: &IntervalIndex,
    config: &RunConfig,
) -> ResolutionOutcome {
    // Skip-listed entities are intentionally blank, never inconsistent.
    if config.is_skipped(&observation.entity) {
        return ResolutionOutcome {
            resolved: ResolvedAssignment {
                observation_id: observation.observation_id.clone(),
                assignees: Vec::new(),
                match_count: 0,
            },
            inconsistency: None,
        };
    }

    // Forced exception mappings bypass interval lookup entirely.
    if let Some(forced) = config.exception_for(&observation.entity) {
        return ResolutionOutcome {
            resolved: ResolvedAssignment {
                observation_id: observation.observation_id.clone(),
                assignees: vec![forced.to_string()],
                match_count: 1,
            },
            inconsistency: None,
        };
    }

    let matched: Vec<&Assignment> = index
        .lookup(&observation.entity)
        .iter()
        .filter(|a| {
            observation
                .period
                .is_some_and(|period| a.span.contains(period))
        })
        .collect();

    let match_count = matched.len();

    let mut assignees: Vec<String> = Vec::new();
    for assignment in &matched {
        if !assignees.iter().any(|name| name == &assignment.assignee) {
            assignees.push(assignment.assignee.clone());
        }
    }

    let inconsistency = if match_count == 1 {
        None
    } else {
        Some(InconsistencyRecord {
            issue: if match_count == 0 {
                IssueKind::Unassigned
            } else {
                IssueKind::Ambiguous
            },
            observation: observation.clone(),
            matched: matched.into_iter().cloned().collect(),
        })
    };

    ResolutionOutcome {
        resolved: ResolvedAssignment {
            observation_id: observation.observation_id.clone(),
            assignees,
            match_count,
        },
        inconsistency,
    }
}

/// Resolution results for a whole snapshot, in observation order.
#[derive(Debug, Default)]
pub struct ResolutionSet {
    /// One resolution per observation.
    pub resolved: Vec<ResolvedAssignment>,

    /// Records for every flagged observation.
    pub inconsistencies: Vec<InconsistencyRecord>,
}

/// Resolves every observation, collecting flagged ones as they occur.
#[must_use]
pub fn resolve_all(
    observations: &[Observation],
    index: &IntervalIndex,
    config: &RunConfig,
) -> ResolutionSet {
    let mut set = ResolutionSet::default();

    for observation in observations {
        let outcome = resolve(observation, index, config);
        set.resolved.push(outcome.resolved);
        if let Some(record) = outcome.inconsistency {
            set.inconsistencies.push(record);
        }
    }

    info!(
        "resolved {} observations, {} flagged",
        set.resolved.len(),
        set.inconsistencies.len()
    );
    set
}
