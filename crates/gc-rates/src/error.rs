//! Dataset errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations.
pub type RateResult<T> = Result<T, RateError>;

/// Errors raised while building, reading or checking a rate dataset.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("Cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported dataset version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid temperature grid: {what}")]
    InvalidGrid { what: &'static str },

    #[error("Table {table} has {found} entries, expected {expected}")]
    TableLength {
        table: String,
        found: usize,
        expected: usize,
    },

    #[error("Table {table} has a negative or non-finite entry at {index}")]
    InvalidEntry { table: String, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RateError::TableLength {
            table: "k1".into(),
            found: 3,
            expected: 600,
        };
        assert!(err.to_string().contains("k1"));
        assert!(err.to_string().contains("600"));
    }
}
