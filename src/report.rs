//! Report grids for flagged data.
//!
//! Inconsistency and overlap findings are materialized as their own sheets.
//! Both grids group related rows and separate groups with a single-space
//! row (a space, not an empty string, so stores that trim trailing blank
//! rows keep the separator visible).

use crate::cell::Cell;
use crate::config::RunConfig;
use crate::model::InconsistencyRecord;
use crate::overlap::OverlapGroup;

/// Header row of the inconsistency report.
#[must_use]
pub fn inconsistency_header(config: &RunConfig) -> Vec<String> {
    let obs = &config.observation_columns;
    let asg = &config.assignment_columns;
    vec![
        "Issue".to_string(),
        obs.period.clone(),
        obs.observation_id.clone(),
        obs.subject.clone(),
        obs.entity.clone(),
        asg.assignee.clone(),
        asg.entity.clone(),
        asg.start.clone(),
        asg.end.clone(),
        asg.role.clone(),
    ]
}

/// Builds the inconsistency report grid: header, then one row per matched
/// interval of each record (or one mostly blank row for unmatched ones),
/// with a separator row between records of different observations.
#[must_use]
pub fn inconsistency_grid(records: &[InconsistencyRecord], config: &RunConfig) -> Vec<Vec<Cell>> {
    let header = inconsistency_header(config);
    let width = header.len();
    let mut grid = vec![header.into_iter().map(Cell::Text).collect::<Vec<_>>()];

    let mut previous_id: Option<&str> = None;
    for record in records {
        if previous_id.is_some_and(|id| id != record.observation.observation_id) {
            grid.push(separator_row(width));
        }
        previous_id = Some(&record.observation.observation_id);

        let observation_cells = |issue: String| {
            let obs = &record.observation;
            vec![
                Cell::Text(issue),
                obs.period.map_or(Cell::Empty, Cell::Date),
                Cell::text(&obs.observation_id),
                Cell::text(&obs.subject),
                Cell::text(&obs.entity),
            ]
        };

        if record.matched.is_empty() {
            let mut row = observation_cells(record.issue.to_string());
            row.resize(width, Cell::Empty);
            grid.push(row);
            continue;
        }

        for assignment in &record.matched {
            let mut row = observation_cells(record.issue.to_string());
            row.push(Cell::text(&assignment.assignee));
            row.push(Cell::text(&assignment.entity));
            row.push(Cell::Date(assignment.span.start));
            row.push(Cell::Date(assignment.span.end));
            row.push(
                assignment
                    .role
                    .as_ref()
                    .map_or(Cell::Empty, Cell::text),
            );
            grid.push(row);
        }
    }

    grid
}

/// Header row of the overlap report.
#[must_use]
pub fn overlap_header(config: &RunConfig) -> Vec<String> {
    let asg = &config.assignment_columns;
    vec![
        asg.entity.clone(),
        asg.assignee.clone(),
        asg.start.clone(),
        asg.end.clone(),
    ]
}

/// Builds the overlap report grid: header, then each entity's implicated
/// intervals followed by a separator row.
#[must_use]
pub fn overlap_grid(groups: &[OverlapGroup], config: &RunConfig) -> Vec<Vec<Cell>> {
    let header = overlap_header(config);
    let width = header.len();
    let mut grid = vec![header.into_iter().map(Cell::Text).collect::<Vec<_>>()];

    for group in groups {
        for record in &group.records {
            grid.push(vec![
                Cell::text(&record.entity),
                Cell::text(&record.assignee),
                Cell::Date(record.span.start),
                Cell::Date(record.span.end),
            ]);
        }
        grid.push(separator_row(width));
    }

    grid
}

fn separator_row(width: usize) -> Vec<Cell> {
    vec![Cell::text(" "); width]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, IssueKind, Observation};
    use crate::overlap::OverlapRecord;
    use crate::span::DateSpan;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn observation(id: &str) -> Observation {
        Observation {
            entity: "Acme".to_string(),
            period: Some(d(2024, 2, 1)),
            observation_id: id.to_string(),
            subject: "subject".to_string(),
        }
    }

    fn matched(assignee: &str) -> Assignment {
        Assignment {
            entity: "Acme".to_string(),
            assignee: assignee.to_string(),
            span: DateSpan::new(d(2024, 1, 1), d(2024, 3, 31)),
            role: Some("Lead".to_string()),
        }
    }

    fn is_separator(row: &[Cell]) -> bool {
        !row.is_empty() && row.iter().all(|c| *c == Cell::text(" "))
    }

    #[test]
    fn ambiguous_record_emits_one_row_per_matched_interval() {
        let records = vec![InconsistencyRecord {
            issue: IssueKind::Ambiguous,
            observation: observation("r1"),
            matched: vec![matched("Alice"), matched("Bob")],
        }];

        let grid = inconsistency_grid(&records, &RunConfig::default());
        assert_eq!(grid.len(), 3); // header + 2 rows
        assert_eq!(grid[1][0], Cell::text("Multiple assignees matched"));
        assert_eq!(grid[1][5], Cell::text("Alice"));
        assert_eq!(grid[2][5], Cell::text("Bob"));
        assert_eq!(grid[1][9], Cell::text("Lead"));
    }

    #[test]
    fn unmatched_record_emits_a_single_padded_row() {
        let records = vec![InconsistencyRecord {
            issue: IssueKind::Unassigned,
            observation: observation("r1"),
            matched: vec![],
        }];

        let grid = inconsistency_grid(&records, &RunConfig::default());
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[1][0], Cell::text("No assignee matched"));
        assert_eq!(grid[1].len(), grid[0].len());
        assert_eq!(grid[1][5], Cell::Empty);
    }

    #[test]
    fn separator_sits_between_distinct_observations_only() {
        let records = vec![
            InconsistencyRecord {
                issue: IssueKind::Ambiguous,
                observation: observation("r1"),
                matched: vec![matched("Alice"), matched("Bob")],
            },
            InconsistencyRecord {
                issue: IssueKind::Unassigned,
                observation: observation("r2"),
                matched: vec![],
            },
        ];

        let grid = inconsistency_grid(&records, &RunConfig::default());
        // header, r1 twice, separator, r2, and no trailing separator.
        assert_eq!(grid.len(), 5);
        assert!(is_separator(&grid[3]));
        assert!(!is_separator(&grid[4]));
    }

    #[test]
    fn overlap_grid_appends_a_separator_after_each_group() {
        let groups = vec![OverlapGroup {
            entity: "Acme".to_string(),
            records: vec![
                OverlapRecord {
                    entity: "Acme".to_string(),
                    assignee: "Alice".to_string(),
                    span: DateSpan::new(d(2024, 1, 1), d(2024, 3, 31)),
                },
                OverlapRecord {
                    entity: "Acme".to_string(),
                    assignee: "Bob".to_string(),
                    span: DateSpan::new(d(2024, 3, 1), d(2024, 6, 30)),
                },
            ],
        }];

        let grid = overlap_grid(&groups, &RunConfig::default());
        assert_eq!(grid.len(), 4); // header + 2 records + separator
        assert_eq!(grid[1][1], Cell::text("Alice"));
        assert_eq!(grid[2][1], Cell::text("Bob"));
        assert!(is_separator(&grid[3]));
    }

    #[test]
    fn empty_reports_are_header_only_grids() {
        let config = RunConfig::default();
        assert_eq!(inconsistency_grid(&[], &config).len(), 1);
        assert_eq!(overlap_grid(&[], &config).len(), 1);
    }
}
