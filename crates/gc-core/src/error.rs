use thiserror::Error;

/// A unit system that cannot describe a physical conversion.
///
/// Fatal to the unit system being built; no other object is affected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidUnitsError {
    #[error("{what} must be positive and finite (got {value})")]
    NonPositive { what: &'static str, value: f64 },

    #[error(
        "velocity_units ({velocity_units}) must equal length_units / time_units ({expected})"
    )]
    VelocityMismatch { velocity_units: f64, expected: f64 },
}
