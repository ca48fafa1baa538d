//! NAV History
//!
//! The historical NAV log, loaded from a flat CSV file and held in ascending
//! date order. Rows whose date could not be parsed stay in the history as
//! [`ParsedDate::Missing`] and sort after every dated row; callers decide
//! what to do with them through [`UndatedPolicy`].

pub mod date;
pub mod error;
pub mod loader;

pub use date::ParsedDate;
pub use error::{HistoryError, HistoryResult};
pub use loader::HistoryLoader;

use rust_decimal::Decimal;
use serde::Deserialize;

/// One row of the NAV log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRecord {
    pub date: ParsedDate,
    pub nav: Option<Decimal>,
    pub daily_return: Option<Decimal>,
    /// Line in the source file
    pub line: u64,
}

/// What to do with rows whose date failed to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndatedPolicy {
    /// Keep them, sorted after all dated rows
    Keep,
    /// Drop them before any slicing
    #[default]
    Exclude,
    /// Refuse the whole log
    Reject,
}

/// NAV records in ascending date order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavHistory {
    records: Vec<NavRecord>,
}

impl NavHistory {
    /// Build a history, sorting ascending by date.
    ///
    /// The sort is stable, so rows sharing a date (and all undated rows)
    /// keep their file order.
    pub fn from_records(mut records: Vec<NavRecord>) -> Self {
        records.sort_by(|a, b| a.date.cmp_ascending(&b.date));
        Self { records }
    }

    pub fn records(&self) -> &[NavRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows with an unparseable date
    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_missing()).count()
    }

    /// Last `n` records in chronological order
    pub fn tail(&self, n: usize) -> &[NavRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Last `n` records, newest first
    pub fn tail_descending(&self, n: usize) -> Vec<&NavRecord> {
        let mut rows: Vec<&NavRecord> = self.tail(n).iter().collect();
        rows.sort_by(|a, b| a.date.cmp_descending(&b.date));
        rows
    }

    /// Most recent dated record
    pub fn latest(&self) -> Option<&NavRecord> {
        self.records.iter().rev().find(|r| !r.date.is_missing())
    }

    /// Apply an undated-row policy, returning the resulting history and the
    /// number of rows it excluded.
    pub fn apply_policy(self, policy: UndatedPolicy) -> HistoryResult<(NavHistory, usize)> {
        let undated = self.undated_count();

        match policy {
            UndatedPolicy::Keep => Ok((self, 0)),
            UndatedPolicy::Reject if undated > 0 => {
                Err(HistoryError::UndatedRows { count: undated })
            }
            UndatedPolicy::Reject => Ok((self, 0)),
            UndatedPolicy::Exclude => {
                if undated > 0 {
                    tracing::warn!(excluded = undated, "Excluding NAV rows with unparseable dates");
                }
                let records = self
                    .records
                    .into_iter()
                    .filter(|r| !r.date.is_missing())
                    .collect();
                Ok((NavHistory { records }, undated))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily_history(days: usize) -> NavHistory {
        let start = ymd(2024, 1, 1);
        let records = (0..days)
            .map(|i| NavRecord {
                date: ParsedDate::Valid(start + Duration::days(i as i64)),
                nav: Some(Decimal::new(100 + i as i64, 0)),
                daily_return: Some(Decimal::new(1, 2)),
                line: i as u64 + 2,
            })
            .collect();
        NavHistory::from_records(records)
    }

    #[test]
    fn test_tail_shorter_than_window_is_whole_history() {
        let history = daily_history(45);
        assert_eq!(history.tail(90), history.records());

        let empty = NavHistory::default();
        assert!(empty.tail(90).is_empty());
    }

    #[test]
    fn test_tail_keeps_latest_in_order() {
        let history = daily_history(120);
        let tail = history.tail(90);

        assert_eq!(tail.len(), 90);
        assert_eq!(tail[0].date.date(), Some(ymd(2024, 1, 1) + Duration::days(30)));
        assert_eq!(tail[89].date.date(), Some(ymd(2024, 1, 1) + Duration::days(119)));
    }

    #[test]
    fn test_tail_descending_latest_thirty() {
        let history = daily_history(100);
        let rows = history.tail_descending(30);

        assert_eq!(rows.len(), 30);
        assert_eq!(rows[0].date.date(), Some(ymd(2024, 1, 1) + Duration::days(99)));
        assert_eq!(rows[29].date.date(), Some(ymd(2024, 1, 1) + Duration::days(70)));
        assert!(rows
            .windows(2)
            .all(|w| w[0].date.date() > w[1].date.date()));
    }

    #[test]
    fn test_two_row_example() {
        let history = HistoryLoader::new()
            .load_str("date,nav,return\n2024-01-01,100,0.01\n2024-01-02,101,0.0099")
            .unwrap();

        let rows: Vec<_> = history
            .tail_descending(30)
            .into_iter()
            .map(|r| (r.date.date().unwrap(), r.nav.unwrap(), r.daily_return.unwrap()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (ymd(2024, 1, 2), Decimal::new(101, 0), Decimal::new(99, 4)),
                (ymd(2024, 1, 1), Decimal::new(100, 0), Decimal::new(1, 2)),
            ]
        );
    }

    #[test]
    fn test_undated_rows_sort_last_and_policies() {
        let csv_data = "date,nav,return
garbage,1,0
2024-01-02,101,0.0099
2024-01-01,100,0.01";
        let history = HistoryLoader::new().load_str(csv_data).unwrap();

        // Missing dates trail every dated row, including in the tail
        assert!(history.tail(1)[0].date.is_missing());
        assert!(history.tail_descending(3)[2].date.is_missing());
        assert_eq!(history.latest().unwrap().date.date(), Some(ymd(2024, 1, 2)));

        let (kept, excluded) = history.clone().apply_policy(UndatedPolicy::Keep).unwrap();
        assert_eq!((kept.len(), excluded), (3, 0));

        let (filtered, excluded) = history.clone().apply_policy(UndatedPolicy::Exclude).unwrap();
        assert_eq!((filtered.len(), excluded), (2, 1));
        assert_eq!(filtered.undated_count(), 0);

        assert!(matches!(
            history.apply_policy(UndatedPolicy::Reject),
            Err(HistoryError::UndatedRows { count: 1 })
        ));
    }
}
