//! Date parsing for the NAV log
//!
//! The log is maintained by hand and by scripts, so the date column mixes
//! formats. Parsing is permissive: ISO forms first, then month-first, and
//! day-first only when month-first cannot apply. Four-digit years are tried
//! before two-digit ones. A cell that matches no
//! format becomes [`ParsedDate::Missing`] instead of failing the load.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

const DATE_FORMATS: [&str; 19] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
];

/// `%Y` also accepts one to three digit years. Dates before this are
/// treated as a short year read by the wrong pattern.
const MIN_YEAR: i32 = 1000;

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Outcome of parsing one date cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDate {
    Valid(NaiveDate),
    /// Cell matched no known format; the original text is kept
    Missing { raw: String },
}

impl ParsedDate {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        match parse_date(trimmed) {
            Some(date) => ParsedDate::Valid(date),
            None => ParsedDate::Missing {
                raw: trimmed.to_string(),
            },
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ParsedDate::Valid(date) => Some(*date),
            ParsedDate::Missing { .. } => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ParsedDate::Missing { .. })
    }

    /// Ascending order with missing dates after every valid date
    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Descending order, missing dates still placed last
    pub fn cmp_descending(&self, other: &Self) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => b.cmp(&a),
            _ => self.cmp_ascending(other),
        }
    }
}

impl fmt::Display for ParsedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedDate::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ParsedDate::Missing { raw } => write!(f, "invalid date ({:?})", raw),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }

    let dates = DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok());
    let datetimes = DATETIME_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date());
    // Timestamps with offsets keep their local calendar date
    let rfc3339 = DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive());

    dates
        .chain(datetimes)
        .chain(rfc3339)
        .find(|date| date.year() >= MIN_YEAR)
}
