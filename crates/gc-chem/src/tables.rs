//! Rate tables rescaled into code units at finalization.

use crate::config::ChemistryConfiguration;
use crate::error::{ConfigError, ConfigResult};
use gc_core::UnitSystem;
use gc_rates::{
    CoolingChannel, GridPoint, PhotoRates, RateDataset, Reaction, TemperatureGrid, UvbTable,
};
use std::collections::BTreeMap;

/// Tables the active network reads, in the units the integrator works in.
///
/// Two-body rate coefficients are stored as `k * (density_units / m_H) *
/// time_units`, so that `k * n_a * n_b` with code number densities yields a
/// code rate at `a = 1`. Cooling tables stay in CGS.
#[derive(Debug, Clone)]
pub struct RateTables {
    grid: TemperatureGrid,
    rates: Vec<Vec<f64>>,
    cooling: BTreeMap<CoolingChannel, Vec<f64>>,
    uvb: Option<UvbTable>,
}

/// Two-body rate coefficients at one temperature, in code units.
#[derive(Debug, Clone, Copy)]
pub struct RateSet {
    k: [f64; Reaction::COUNT],
}

impl RateSet {
    #[inline]
    pub fn k(&self, reaction: Reaction) -> f64 {
        self.k[reaction.index()]
    }
}

fn required_channels(config: &ChemistryConfiguration) -> Vec<CoolingChannel> {
    let mut channels = Vec::new();
    if !config.with_radiative_cooling {
        return channels;
    }
    if config.primordial_chemistry == 0 {
        channels.push(CoolingChannel::Equilibrium);
        if config.uv_background {
            channels.extend(CoolingChannel::EQUILIBRIUM_FRACTIONS);
        }
    } else {
        channels.extend(CoolingChannel::PRIMORDIAL);
    }
    if config.primordial_chemistry >= 2 {
        channels.push(CoolingChannel::H2);
    }
    if config.primordial_chemistry >= 3 {
        channels.push(CoolingChannel::HD);
    }
    if config.metal_cooling {
        channels.push(CoolingChannel::Metal);
    }
    channels
}

impl RateTables {
    /// Select, check and rescale the tables `config` needs from `dataset`.
    pub fn from_dataset(
        dataset: &RateDataset,
        config: &ChemistryConfiguration,
        units: &UnitSystem,
    ) -> ConfigResult<Self> {
        let scale = units.number_density_units() * units.time_units();

        let mut rates = vec![Vec::new(); Reaction::COUNT];
        for reaction in Reaction::up_to_level(config.primordial_chemistry) {
            let table = dataset.rate(reaction).ok_or(ConfigError::MissingTable {
                table: reaction.key(),
            })?;
            rates[reaction.index()] = table.iter().map(|k| k * scale).collect();
        }

        let mut cooling = BTreeMap::new();
        for channel in required_channels(config) {
            let table = dataset.cooling(channel).ok_or(ConfigError::MissingTable {
                table: channel.key(),
            })?;
            cooling.insert(channel, table.to_vec());
        }

        let uvb = if config.uv_background {
            Some(
                dataset
                    .uvb
                    .clone()
                    .ok_or(ConfigError::MissingTable { table: "uvb" })?,
            )
        } else {
            None
        };

        Ok(Self {
            grid: dataset.grid,
            rates,
            cooling,
            uvb,
        })
    }

    pub fn grid(&self) -> &TemperatureGrid {
        &self.grid
    }

    pub fn locate(&self, temperature: f64) -> GridPoint {
        self.grid.locate(temperature)
    }

    /// Rate coefficients at `at`, divided by `(a a_units)^3` for comoving runs.
    pub fn rates(&self, at: GridPoint, inv_a3: f64) -> RateSet {
        let mut k = [0.0; Reaction::COUNT];
        for (slot, table) in k.iter_mut().zip(&self.rates) {
            if !table.is_empty() {
                *slot = TemperatureGrid::interpolate(table, at) * inv_a3;
            }
        }
        RateSet { k }
    }

    /// Cooling coefficient of `channel` [CGS]; zero when not loaded.
    pub fn cooling(&self, channel: CoolingChannel, at: GridPoint) -> f64 {
        self.cooling
            .get(&channel)
            .map_or(0.0, |table| TemperatureGrid::interpolate(table, at))
    }

    /// CGS photo rates at redshift `z`; zero without a UV background.
    pub fn photo_rates(&self, z: f64) -> PhotoRates {
        self.uvb.as_ref().map_or_else(PhotoRates::default, |uvb| uvb.at(z))
    }

    pub fn has_uvb(&self) -> bool {
        self.uvb.is_some()
    }
}
