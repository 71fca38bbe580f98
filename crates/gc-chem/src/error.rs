//! Error types for configuration and solver operations.

use gc_fields::{FieldName, MissingFieldError};
use gc_rates::RateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or finalizing a chemistry configuration.
///
/// Finalization is all-or-nothing: when one of these is returned, nothing
/// usable was produced and the configuration value is unchanged.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("use_chemistry is set but no rate_data_source was given")]
    MissingDataSource,

    #[error("primordial_chemistry must be 0..=3 (got {level})")]
    InvalidLevel { level: u8 },

    #[error("invalid parameter {what}: {reason}")]
    InvalidParameter {
        what: &'static str,
        reason: &'static str,
    },

    #[error("unreadable rate table: {0}")]
    UnreadableTable(#[from] RateError),

    #[error("rate dataset lacks table {table} required by the active network")]
    MissingTable { table: &'static str },

    #[error("configuration was already finalized with a different unit system")]
    AlreadyFinalized,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by solver operations.
///
/// Every precondition failure is reported before any cell is touched, and a
/// failed step leaves the grid state exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("unit system differs from the one the configuration was finalized with")]
    UnitsMismatch,

    #[error("grid state is bound to configuration {bound}, not {given}")]
    ConfigMismatch { bound: String, given: String },

    #[error("invalid expansion factor {value}")]
    InvalidExpansionFactor { value: f64 },

    #[error("timestep must be positive and finite (got {dt})")]
    InvalidTimestep { dt: f64 },

    #[error(transparent)]
    MissingFields(#[from] MissingFieldError),

    #[error("output buffer has {found} entries; expected {active} (active cells) or {volume} (grid volume)")]
    BufferSize {
        found: usize,
        volume: usize,
        active: usize,
    },

    #[error("non-physical {field} = {value} at cell {index}")]
    NonPhysical {
        field: FieldName,
        index: usize,
        value: f64,
    },

    #[error("cell {index} did not converge within {subcycles} subcycles")]
    ConvergenceFailed { index: usize, subcycles: usize },
}

pub type SolverResult<T> = Result<T, SolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_transparent() {
        let err = SolverError::from(MissingFieldError {
            missing: vec![FieldName::H2I],
        });
        assert_eq!(err.to_string(), "missing required fields: H2I_density");
    }

    #[test]
    fn rate_errors_convert() {
        let err: ConfigError = RateError::UnsupportedVersion { version: 7 }.into();
        assert!(matches!(err, ConfigError::UnreadableTable(_)));
    }
}
