//! Column bindings: names resolved to positional indices, once per run.
//!
//! A binding that fails to resolve is a configuration warning, not an
//! error: the column stays unbound, lookups through it yield nothing, and
//! the run completes with visibly empty output for the affected fields.

use log::warn;

use crate::cell::Cell;
use crate::config::{AssignmentColumns, ObservationColumns};
use crate::model::{Assignment, Observation};
use crate::span::DateSpan;

/// A column title resolved against a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef(Option<usize>);

impl ColumnRef {
    /// A reference that never resolves a cell.
    pub const UNBOUND: Self = Self(None);

    /// Resolves a title against a header, case-sensitive exact match.
    /// Logs a warning and returns an unbound reference when absent.
    #[must_use]
    pub fn bind(header: &[String], name: &str) -> Self {
        match header.iter().position(|h| h == name) {
            Some(index) => Self(Some(index)),
            None => {
                warn!("column '{name}' not found in header {header:?}");
                Self(None)
            }
        }
    }

    /// Whether the title resolved to an index.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    /// The resolved positional index, if bound.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.0
    }

    /// The referenced cell of a row, if bound and present.
    #[must_use]
    pub fn cell<'r>(&self, row: &'r [Cell]) -> Option<&'r Cell> {
        self.0.and_then(|i| row.get(i))
    }

    /// The referenced cell rendered as text; empty when unbound or absent.
    #[must_use]
    pub fn text(&self, row: &[Cell]) -> String {
        self.cell(row).map(Cell::to_string).unwrap_or_default()
    }
}

/// Resolved bindings for the observation sheet.
#[derive(Debug, Clone, Copy)]
pub struct ObservationBindings {
    /// Entity key column.
    pub entity: ColumnRef,
    /// Observation month column.
    pub period: ColumnRef,
    /// Observation id column.
    pub observation_id: ColumnRef,
    /// Subject name column.
    pub subject: ColumnRef,
}

impl ObservationBindings {
    /// Resolves all observation columns against a header.
    #[must_use]
    pub fn resolve(header: &[String], columns: &ObservationColumns) -> Self {
        Self {
            entity: ColumnRef::bind(header, &columns.entity),
            period: ColumnRef::bind(header, &columns.period),
            observation_id: ColumnRef::bind(header, &columns.observation_id),
            subject: ColumnRef::bind(header, &columns.subject),
        }
    }

    /// Extracts an [`Observation`] from a row.
    #[must_use]
    pub fn observation(&self, row: &[Cell]) -> Observation {
        Observation {
            entity: self.entity.text(row),
            period: self.period.cell(row).and_then(Cell::as_month),
            observation_id: self.observation_id.text(row),
            subject: self.subject.text(row),
        }
    }
}

/// Resolved bindings for the assignment sheet.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentBindings {
    /// Entity key column.
    pub entity: ColumnRef,
    /// Assignee name column.
    pub assignee: ColumnRef,
    /// Interval start column.
    pub start: ColumnRef,
    /// Interval end column.
    pub end: ColumnRef,
    /// Role column.
    pub role: ColumnRef,
}

impl AssignmentBindings {
    /// Resolves all assignment columns against a header.
    #[must_use]
    pub fn resolve(header: &[String], columns: &AssignmentColumns) -> Self {
        Self {
            entity: ColumnRef::bind(header, &columns.entity),
            assignee: ColumnRef::bind(header, &columns.assignee),
            start: ColumnRef::bind(header, &columns.start),
            end: ColumnRef::bind(header, &columns.end),
            role: ColumnRef::bind(header, &columns.role),
        }
    }

    /// Extracts an [`Assignment`] from a row.
    ///
    /// Missing or unparseable boundary dates produce a span that never
    /// matches; the row stays in the index rather than being dropped.
    #[must_use]
    pub fn assignment(&self, row: &[Cell]) -> Assignment {
        let span = match (
            self.start.cell(row).and_then(Cell::as_date),
            self.end.cell(row).and_then(Cell::as_date),
        ) {
            (Some(start), Some(end)) => DateSpan::new(start, end),
            _ => DateSpan::never(),
        };

        let role = self.role.text(row);

        Assignment {
            entity: self.entity.text(row),
            assignee: self.assignee.text(row),
            span,
            role: if role.is_empty() { None } else { Some(role) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn header(titles: &[&str]) -> Vec<String> {
        titles.iter().map(|t| (*t).to_string()).collect()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn bind_resolves_exact_titles_only() {
        let header = header(&["Account", "Month"]);
        assert_eq!(ColumnRef::bind(&header, "Month").index(), Some(1));
        assert!(!ColumnRef::bind(&header, "month").is_bound());
        assert!(!ColumnRef::bind(&header, "Quarter").is_bound());
    }

    #[test]
    fn unbound_reference_yields_nothing() {
        let row = vec![Cell::text("Acme")];
        assert_eq!(ColumnRef::UNBOUND.cell(&row), None);
        assert_eq!(ColumnRef::UNBOUND.text(&row), "");
    }

    #[test]
    fn observation_extraction() {
        let titles = header(&["Account", "Month", "Assignment Id", "Name"]);
        let bindings =
            ObservationBindings::resolve(&titles, &crate::config::ObservationColumns::default());

        let row = vec![
            Cell::text("Acme"),
            Cell::text("February 2024"),
            Cell::text("r-17"),
            Cell::text("Widget QA"),
        ];
        let obs = bindings.observation(&row);
        assert_eq!(obs.entity, "Acme");
        assert_eq!(obs.period, Some(d(2024, 2, 1)));
        assert_eq!(obs.observation_id, "r-17");
        assert_eq!(obs.subject, "Widget QA");
    }

    #[test]
    fn assignment_with_bad_dates_never_matches() {
        let titles = header(&["Account", "Name", "Start Date", "End Date", "Position name"]);
        let bindings =
            AssignmentBindings::resolve(&titles, &crate::config::AssignmentColumns::default());

        let row = vec![
            Cell::text("Acme"),
            Cell::text("Alice"),
            Cell::text("soon"),
            Cell::text("2024-12-31"),
            Cell::Empty,
        ];
        let assignment = bindings.assignment(&row);
        assert_eq!(assignment.span, DateSpan::never());
        assert_eq!(assignment.role, None);
        assert!(!assignment.span.contains(d(2024, 6, 1)));
    }

    #[test]
    fn missing_columns_degrade_to_empty_fields() {
        let titles = header(&["Wrong", "Titles"]);
        let bindings =
            ObservationBindings::resolve(&titles, &crate::config::ObservationColumns::default());

        let obs = bindings.observation(&[Cell::text("x"), Cell::text("y")]);
        assert_eq!(obs.entity, "");
        assert_eq!(obs.period, None);
        assert_eq!(obs.observation_id, "");
    }
}
