//! gc-rates: reaction-rate and cooling datasets for gascool.
//!
//! Provides:
//! - Reaction and cooling-channel identifiers
//! - Log-temperature grids with linear interpolation
//! - Analytic CGS fits and the builtin dataset generated from them
//! - UV background photoionization/photoheating tables
//! - JSON dataset files (`RateDataset::load` / `RateDataset::save`)
//!
//! Datasets are plain tables in CGS units. Rescaling into code units happens
//! when a chemistry configuration is finalized.

pub mod builtin;
pub mod dataset;
pub mod error;
pub mod fits;
pub mod grid;
pub mod reaction;
pub mod source;
pub mod uvb;

pub use dataset::{DATASET_VERSION, RateDataset};
pub use error::{RateError, RateResult};
pub use grid::{GridPoint, TemperatureGrid};
pub use reaction::{CoolingChannel, Reaction};
pub use source::RateDataSource;
pub use uvb::{PhotoRates, UvbTable};
