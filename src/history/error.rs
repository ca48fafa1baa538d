//! History loader error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the NAV log
#[derive(Error, Debug)]
pub enum HistoryError {
    /// NAV log could not be opened or read
    #[error("Failed to read NAV log {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV structure error (bad quoting, unreadable header)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header does not carry the required columns
    #[error("NAV log is missing required column(s) {missing:?} (found {found:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A numeric cell could not be parsed
    #[error("Line {line}: invalid {column} value {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// Undated rows present while the policy forbids them
    #[error("{count} row(s) in the NAV log have unparseable dates")]
    UndatedRows { count: usize },
}

/// Result type alias for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;
