//! gc-chem: non-equilibrium chemistry and radiative cooling solver.
//!
//! Provides:
//! - `ChemistryConfiguration` (editable switches) and `FinalizedConfig`
//!   (immutable, with code-unit rate tables and a ready token)
//! - YAML run files bundling a unit system and a configuration
//! - The primordial H/He/H2/D network with metal-line cooling and a UV
//!   background
//! - A subcycled backward-difference integrator, run cell-parallel
//! - The solver protocol: `evolve_step` and the derived-quantity queries

pub mod cell;
pub mod config;
pub mod error;
pub mod finalized;
pub mod integrator;
pub mod network;
pub mod solver;
pub mod tables;
pub mod thermo;

pub use config::{ChemistryConfiguration, RunFile};
pub use error::{ConfigError, ConfigResult, SolverError, SolverResult};
pub use finalized::{FinalizedConfig, compute_token};
pub use solver::{
    StepStats, evolve_step, query_cooling_time, query_gamma, query_pressure, query_temperature,
};
