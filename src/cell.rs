//! Cell values for tabular data.
//!
//! A sheet is a grid of loosely typed cells. Dates may arrive as real date
//! values or as text, depending on how the upstream store serialized them;
//! the accessors here absorb that difference.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::span::{first_of_month, parse_month};

/// A single cell of a tabular sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Free-form text.
    Text(String),
    /// A numeric value.
    Number(f64),
    /// A calendar date.
    Date(NaiveDate),
    /// An empty cell.
    #[default]
    Empty,
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns `true` for `Empty`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` for `Empty` and for text that trims to nothing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Borrows the text content, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Reads this cell as a calendar date.
    ///
    /// Date cells pass through; text cells are parsed as ISO `YYYY-MM-DD`.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    /// Reads this cell as a month, normalized to the first day.
    ///
    /// Date cells truncate to their month; text cells go through
    /// [`parse_month`](crate::span::parse_month).
    #[must_use]
    pub fn as_month(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(first_of_month(*d)),
            Self::Text(s) => parse_month(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn blank_detection() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::text("   ").is_blank());
        assert!(!Cell::text("x").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn as_date_handles_date_and_text() {
        assert_eq!(Cell::Date(d(2024, 1, 15)).as_date(), Some(d(2024, 1, 15)));
        assert_eq!(Cell::text("2024-01-15").as_date(), Some(d(2024, 1, 15)));
        assert_eq!(Cell::text(" 2024-01-15 ").as_date(), Some(d(2024, 1, 15)));
        assert_eq!(Cell::text("15/01/2024").as_date(), None);
        assert_eq!(Cell::Empty.as_date(), None);
    }

    #[test]
    fn as_month_truncates_dates_and_parses_labels() {
        assert_eq!(Cell::Date(d(2024, 3, 20)).as_month(), Some(d(2024, 3, 1)));
        assert_eq!(Cell::text("March 2024").as_month(), Some(d(2024, 3, 1)));
        assert_eq!(Cell::Number(42.0).as_month(), None);
    }

    #[test]
    fn display_round_trips_the_useful_cases() {
        assert_eq!(Cell::text("Acme").to_string(), "Acme");
        assert_eq!(Cell::Number(3.0).to_string(), "3");
        assert_eq!(Cell::Date(d(2024, 1, 1)).to_string(), "2024-01-01");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn serialization_is_tagged() {
        let json = serde_json::to_string(&Cell::text("x")).unwrap();
        assert!(json.contains("\"text\""));
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Cell::text("x"));
    }
}
