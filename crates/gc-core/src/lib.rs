//! gc-core: stable foundation for gascool.
//!
//! Contains:
//! - numeric (Real precision switch)
//! - units (uom SI types + constructors)
//! - constants (CGS physical constants used by the chemistry network)
//! - code_units (the simulation <-> CGS unit system)
//! - token (identity of a finalized configuration)
//! - error (shared error types)

pub mod code_units;
pub mod constants;
pub mod error;
pub mod numeric;
pub mod token;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use code_units::UnitSystem;
pub use error::InvalidUnitsError;
pub use numeric::*;
pub use token::ReadyToken;
