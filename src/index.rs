//! Build-once lookup indexes for a run.
//!
//! Both indexes are constructed from the full snapshot before any row is
//! resolved, then read many times. Neither merges, sorts, or drops
//! intervals at build time: overlap detection must see every original
//! interval, redundant or not.

use std::collections::HashMap;

use log::debug;

use crate::model::Assignment;
use crate::store::SheetData;

/// Entity key → assignment intervals, in snapshot order.
#[derive(Debug, Default)]
pub struct IntervalIndex {
    by_entity: HashMap<String, Vec<Assignment>>,
    order: Vec<String>,
}

impl IntervalIndex {
    /// Groups assignments by entity key. O(n); input order is preserved
    /// both within an entity's list and across entities (first-seen).
    #[must_use]
    pub fn build(assignments: Vec<Assignment>) -> Self {
        let mut index = Self::default();
        for assignment in assignments {
            match index.by_entity.get_mut(&assignment.entity) {
                Some(list) => list.push(assignment),
                None => {
                    index.order.push(assignment.entity.clone());
                    index
                        .by_entity
                        .insert(assignment.entity.clone(), vec![assignment]);
                }
            }
        }
        debug!(
            "interval index built: {} entities, {} assignments",
            index.order.len(),
            index.by_entity.values().map(Vec::len).sum::<usize>()
        );
        index
    }

    /// All assignments for an entity; empty for an unseen key.
    #[must_use]
    pub fn lookup(&self, entity: &str) -> &[Assignment] {
        self.by_entity.get(entity).map_or(&[], Vec::as_slice)
    }

    /// Entity keys in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no assignments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Trimmed cell value → category column names, in table column order.
///
/// The category table has one column per category; any non-blank cell in a
/// column puts that cell's value into the category. A value appearing under
/// several columns keeps them all, but lookups return only the first: later
/// columns are shadowed, and that ordering is a contract.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    by_value: HashMap<String, Vec<String>>,
}

impl CategoryIndex {
    /// Builds the index: columns outer (header order), rows inner, blank
    /// header titles and blank cells skipped, cell values trimmed.
    #[must_use]
    pub fn build(table: &SheetData) -> Self {
        let mut by_value: HashMap<String, Vec<String>> = HashMap::new();

        for (col, title) in table.header.iter().enumerate() {
            if title.trim().is_empty() {
                continue;
            }
            for row in &table.rows {
                let Some(cell) = row.get(col) else { continue };
                let value = cell.to_string();
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                by_value
                    .entry(value.to_string())
                    .or_default()
                    .push(title.clone());
            }
        }

        debug!("category index built: {} distinct values", by_value.len());
        Self { by_value }
    }

    /// The first category column recorded for this value, if any. The
    /// lookup key is trimmed.
    #[must_use]
    pub fn resolve(&self, value: &str) -> Option<&str> {
        self.by_value
            .get(value.trim())
            .and_then(|columns| columns.first())
            .map(String::as_str)
    }
}
