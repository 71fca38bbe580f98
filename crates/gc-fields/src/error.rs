//! Field-state errors.

use crate::species::FieldName;
use thiserror::Error;

/// Result type for field-state setup.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while shaping or populating a grid field state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("grid rank must be 1, 2 or 3 (got {rank})")]
    InvalidRank { rank: usize },

    #[error("{what} has {found} entries for a rank-{rank} grid")]
    AxisCount {
        what: &'static str,
        found: usize,
        rank: usize,
    },

    #[error("axis {axis}: {what}")]
    InvalidAxis { axis: usize, what: &'static str },

    #[error("field {field} has {found} cells, grid volume is {expected}")]
    SizeMismatch {
        field: FieldName,
        found: usize,
        expected: usize,
    },

    #[error("primordial chemistry level must be 0..=3 (got {level})")]
    InvalidLevel { level: u8 },
}

/// The state lacks arrays the active network needs.
///
/// Lists every missing field, in required-field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required fields: {}", display_list(.missing))]
pub struct MissingFieldError {
    pub missing: Vec<FieldName>,
}

fn display_list(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
