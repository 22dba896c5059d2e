//! Cross-party overlap detection.
//!
//! Two parties assigned to the same entity over intersecting intervals is a
//! data disagreement worth surfacing. Overlapping intervals of the *same*
//! party are fine (renewals, corrections) and are never reported.
//!
//! The scan is quadratic per entity in parties and intervals. Real fan-out
//! per entity is small, so no sweep-line is needed at this data scale.

use std::collections::BTreeSet;

use log::info;

use crate::index::IntervalIndex;
use crate::model::Assignment;
use crate::span::DateSpan;

/// One interval implicated in a cross-party overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapRecord {
    /// The contested entity.
    pub entity: String,

    /// The responsible party of this interval.
    pub assignee: String,

    /// The interval itself.
    pub span: DateSpan,
}

/// All implicated intervals of one entity, in snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapGroup {
    /// The contested entity.
    pub entity: String,

    /// Implicated intervals, each reported once.
    pub records: Vec<OverlapRecord>,
}

/// Finds every cross-party overlap in the index.
///
/// Entities appear in index (first-seen) order; within a group, intervals
/// keep their snapshot order. An interval touched by several overlaps is
/// still reported once.
#[must_use]
pub fn detect_overlaps(index: &IntervalIndex) -> Vec<OverlapGroup> {
    let mut groups = Vec::new();

    for entity in index.entities() {
        let assignments = index.lookup(entity);
        if assignments.len() < 2 {
            continue;
        }

        // Partition interval positions by party, first-seen party order.
        let mut parties: Vec<(&str, Vec<usize>)> = Vec::new();
        for (position, assignment) in assignments.iter().enumerate() {
            match parties
                .iter_mut()
                .find(|(party, _)| *party == assignment.assignee)
            {
                Some((_, positions)) => positions.push(position),
                None => parties.push((assignment.assignee.as_str(), vec![position])),
            }
        }

        // A single party cannot disagree with itself.
        if parties.len() < 2 {
            continue;
        }

        let mut implicated = BTreeSet::new();
        for i in 0..parties.len() {
            for j in (i + 1)..parties.len() {
                for &a in &parties[i].1 {
                    for &b in &parties[j].1 {
                        if assignments[a].span.overlaps(&assignments[b].span) {
                            implicated.insert(a);
                            implicated.insert(b);
                        }
                    }
                }
            }
        }

        if implicated.is_empty() {
            continue;
        }

        groups.push(OverlapGroup {
            entity: entity.to_string(),
            records: implicated
                .into_iter()
                .map(|position| record_for(entity, &assignments[position]))
                .collect(),
        });
    }

    info!(
        "overlap sweep: {} entities with cross-party overlaps",
        groups.len()
    );
    groups
}

fn record_for(entity: &str, assignment: &Assignment) -> OverlapRecord {
    OverlapRecord {
        entity: entity.to_string(),
        assignee: assignment.assignee.clone(),
        span: assignment.span,
    }
}
