//! NAV Log Loader
//!
//! Reads the externally maintained NAV log. The file is a CSV whose header
//! must carry `date`, `nav` and `return`; other columns are ignored.

use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::date::ParsedDate;
use super::error::{HistoryError, HistoryResult};
use super::{NavHistory, NavRecord};

pub const DATE_COLUMN: &str = "date";
pub const NAV_COLUMN: &str = "nav";
pub const RETURN_COLUMN: &str = "return";

/// CSV reader for the NAV log
#[derive(Debug, Clone)]
pub struct HistoryLoader {
    delimiter: u8,
}

impl Default for HistoryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLoader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load the NAV log from a file. A missing file is an error.
    pub fn load(&self, path: &Path) -> HistoryResult<NavHistory> {
        let file = File::open(path).map_err(|source| HistoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let history = self.read(file)?;

        tracing::info!(
            path = %path.display(),
            rows = history.len(),
            undated = history.undated_count(),
            "Loaded NAV history"
        );

        Ok(history)
    }

    /// Load the NAV log from CSV text
    pub fn load_str(&self, csv_data: &str) -> HistoryResult<NavHistory> {
        self.read(csv_data.as_bytes())
    }

    fn read<R: Read>(&self, input: R) -> HistoryResult<NavHistory> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::resolve(&headers)?;

        let mut records = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(row as u64 + 2);

            let date = ParsedDate::parse(record.get(columns.date).unwrap_or(""));
            if let ParsedDate::Missing { raw } = &date {
                tracing::warn!(line, value = %raw, "Unparseable date in NAV log");
            }

            let nav = parse_decimal(record.get(columns.nav), line, NAV_COLUMN)?;
            let daily_return = parse_decimal(record.get(columns.daily_return), line, RETURN_COLUMN)?;

            records.push(NavRecord {
                date,
                nav,
                daily_return,
                line,
            });
        }

        Ok(NavHistory::from_records(records))
    }
}

/// Positions of the three semantic columns in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    date: usize,
    nav: usize,
    daily_return: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> HistoryResult<Self> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        match (
            position(DATE_COLUMN),
            position(NAV_COLUMN),
            position(RETURN_COLUMN),
        ) {
            (Some(date), Some(nav), Some(daily_return)) => Ok(Self {
                date,
                nav,
                daily_return,
            }),
            (date, nav, daily_return) => {
                let missing = [
                    (DATE_COLUMN, date),
                    (NAV_COLUMN, nav),
                    (RETURN_COLUMN, daily_return),
                ]
                .into_iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| name.to_string())
                .collect();

                Err(HistoryError::SchemaMismatch {
                    missing,
                    found: headers.iter().map(str::to_string).collect(),
                })
            }
        }
    }
}

/// Parse a numeric cell. Empty and `NaN` cells are absent values.
fn parse_decimal(
    cell: Option<&str>,
    line: u64,
    column: &'static str,
) -> HistoryResult<Option<Decimal>> {
    let value = cell.unwrap_or("").trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map(Some)
        .map_err(|_| HistoryError::InvalidNumber {
            line,
            column,
            value: value.to_string(),
        })
}
