//! Closed calendar-date intervals and month-label parsing.
//!
//! Assignments are valid over a closed range `[start, end]`; both boundary
//! dates count as inside. Observation periods are whole months, normalized
//! to the first day of the month.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A closed date range `[start, end]`, inclusive on both ends.
///
/// A span whose `start` is after its `end` is tolerated: it contains no
/// dates and overlaps nothing, but it is never rejected at load time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tenure::DateSpan;
///
/// let span = DateSpan::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// );
/// assert!(span.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    /// Start of the range (inclusive).
    pub start: NaiveDate,

    /// End of the range (inclusive).
    pub end: NaiveDate,
}

impl DateSpan {
    /// Creates a span from two dates. No ordering is enforced; an inverted
    /// span simply never matches.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A span that contains no dates and overlaps nothing.
    ///
    /// Used for assignments whose boundary cells are missing or unparseable;
    /// such rows stay in the index but can never match.
    #[must_use]
    pub const fn never() -> Self {
        Self {
            start: NaiveDate::MAX,
            end: NaiveDate::MIN,
        }
    }

    /// Returns `true` if `start` is after `end`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Check whether a date falls within this span, boundaries included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Check whether two spans intersect: `s1 <= e2 && s2 <= e1`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl std::fmt::Display for DateSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} → {}]", self.start, self.end)
    }
}

static ISO_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{1,2})(?:-(\d{1,2}))?$").expect("valid month regex")
});

/// Parses a month label into the first day of that month.
///
/// Accepts `"January 2024"`, `"Jan 2024"`, `"2024-01"`, and full ISO dates
/// (`"2024-01-15"` normalizes to `2024-01-01`). Returns `None` for anything
/// else; an unparseable period means the observation matches nothing.
#[must_use]
pub fn parse_month(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Some(caps) = ISO_MONTH_RE.captures(label) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    // "January 2024" / "Jan 2024": pad with a day-of-month and let chrono parse.
    let padded = format!("{label} 1");
    for fmt in ["%B %Y %d", "%b %Y %d"] {
        if let Ok(date) = NaiveDate::parse_from_str(&padded, fmt) {
            return Some(date);
        }
    }

    None
}

/// Normalizes any date to the first day of its month.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}
