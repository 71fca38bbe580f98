//! Chemistry configuration and run files.

use crate::error::{ConfigError, ConfigResult};
use crate::finalized::FinalizedConfig;
use gc_core::UnitSystem;
use gc_fields::{MetalCooling, NetworkVariant, PrimordialLevel};
use gc_rates::{RateDataSource, TemperatureGrid};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Physics switches and parameters for one run.
///
/// A plain value: edit it freely, then [`finalize`](Self::finalize) it
/// against a unit system to get the immutable form solver calls take.
/// Every field has a default, so partial YAML documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemistryConfiguration {
    pub use_chemistry: bool,
    pub with_radiative_cooling: bool,
    /// 0 (equilibrium cooling only) to 3 (with deuterium).
    pub primordial_chemistry: u8,
    pub metal_cooling: bool,
    pub uv_background: bool,
    pub hydrogen_fraction_by_mass: f64,
    pub solar_metal_fraction_by_mass: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_data_source: Option<RateDataSource>,

    /// Adiabatic index of the monatomic gas.
    pub gamma: f64,
    /// Lower bound on the gas temperature while cooling [K].
    pub temperature_floor: f64,
    /// Also floor at the CMB temperature of the current redshift.
    pub cmb_temperature_floor: bool,
    /// Builtin-table grid; file datasets carry their own.
    pub temperature_bins: usize,
    pub temperature_start: f64,
    pub temperature_end: f64,
    /// Subcycles allowed per cell per step before the step fails.
    pub max_subcycles: usize,
    /// Largest relative change of e-, HI or energy per subcycle.
    pub subcycle_fraction: f64,
}

impl Default for ChemistryConfiguration {
    fn default() -> Self {
        Self {
            use_chemistry: false,
            with_radiative_cooling: false,
            primordial_chemistry: 0,
            metal_cooling: false,
            uv_background: false,
            hydrogen_fraction_by_mass: 0.76,
            solar_metal_fraction_by_mass: 0.01295,
            rate_data_source: None,
            gamma: 5.0 / 3.0,
            temperature_floor: 1.0,
            cmb_temperature_floor: true,
            temperature_bins: 600,
            temperature_start: 1.0,
            temperature_end: 1.0e9,
            max_subcycles: 10_000,
            subcycle_fraction: 0.1,
        }
    }
}

fn check(ok: bool, what: &'static str, reason: &'static str) -> ConfigResult<()> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { what, reason })
    }
}

impl ChemistryConfiguration {
    /// Reset every field to its default. Never fails.
    pub fn set_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml_string(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn level(&self) -> ConfigResult<PrimordialLevel> {
        PrimordialLevel::try_from(self.primordial_chemistry).map_err(|_| {
            ConfigError::InvalidLevel {
                level: self.primordial_chemistry,
            }
        })
    }

    /// Network variant selected by the level and metal switch.
    pub fn variant(&self) -> ConfigResult<NetworkVariant> {
        Ok(NetworkVariant::new(
            self.level()?,
            MetalCooling::from(self.metal_cooling),
        ))
    }

    /// Grid used when tables are generated from the builtin fits.
    pub fn temperature_grid(&self) -> TemperatureGrid {
        TemperatureGrid {
            start: self.temperature_start,
            end: self.temperature_end,
            bins: self.temperature_bins,
        }
    }

    /// Check level, numeric parameters and the data-source requirement.
    pub fn validate(&self) -> ConfigResult<()> {
        self.level()?;
        let x = self.hydrogen_fraction_by_mass;
        check(
            x.is_finite() && x > 0.0 && x <= 1.0,
            "hydrogen_fraction_by_mass",
            "must lie in (0, 1]",
        )?;
        let zsun = self.solar_metal_fraction_by_mass;
        check(
            zsun.is_finite() && zsun > 0.0 && zsun < 1.0,
            "solar_metal_fraction_by_mass",
            "must lie in (0, 1)",
        )?;
        check(
            self.gamma.is_finite() && self.gamma > 1.0,
            "gamma",
            "must be finite and above 1",
        )?;
        check(
            self.temperature_floor.is_finite() && self.temperature_floor > 0.0,
            "temperature_floor",
            "must be positive and finite",
        )?;
        check(
            self.temperature_bins >= 2,
            "temperature_bins",
            "at least two bins are required",
        )?;
        check(
            self.temperature_start.is_finite() && self.temperature_start > 0.0,
            "temperature_start",
            "must be positive and finite",
        )?;
        check(
            self.temperature_end.is_finite() && self.temperature_end > self.temperature_start,
            "temperature_end",
            "must be finite and above temperature_start",
        )?;
        check(self.max_subcycles >= 1, "max_subcycles", "must be at least 1")?;
        let f = self.subcycle_fraction;
        check(
            f.is_finite() && f > 0.0 && f <= 1.0,
            "subcycle_fraction",
            "must lie in (0, 1]",
        )?;
        if self.use_chemistry && self.rate_data_source.is_none() {
            return Err(ConfigError::MissingDataSource);
        }
        Ok(())
    }

    /// Validate, load the rate data and produce the immutable configuration.
    ///
    /// `self` is left untouched whatever the outcome. Finalizing equal
    /// configurations against equal unit systems yields equal tokens.
    pub fn finalize(&self, units: &UnitSystem) -> ConfigResult<FinalizedConfig> {
        FinalizedConfig::build(self, units)
    }
}

/// Human-written run description: unit system plus chemistry switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub units: UnitSystem,
    #[serde(default)]
    pub chemistry: ChemistryConfiguration,
}

impl RunFile {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}
