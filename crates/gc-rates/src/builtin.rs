//! Builtin dataset generated from the analytic fits.

use crate::dataset::RateDataset;
use crate::fits::{EquilibriumState, cooling_coefficient, rate_coefficient};
use crate::grid::TemperatureGrid;
use crate::reaction::{CoolingChannel, Reaction};
use crate::uvb::UvbTable;

/// Tabulate every reaction, cooling channel and the UV background on `grid`.
///
/// The equilibrium tables depend on `hydrogen_fraction` (by mass).
pub fn generate(grid: TemperatureGrid, hydrogen_fraction: f64) -> RateDataset {
    let temperatures = grid.temperatures();
    let mut dataset = RateDataset::new(grid);

    for reaction in Reaction::ALL {
        let column = temperatures
            .iter()
            .map(|&t| rate_coefficient(reaction, t))
            .collect();
        dataset.rates.insert(reaction, column);
    }

    for channel in CoolingChannel::ALL {
        if cooling_coefficient(channel, grid.start).is_none() {
            continue;
        }
        let column = temperatures
            .iter()
            .map(|&t| cooling_coefficient(channel, t).unwrap_or(0.0))
            .collect();
        dataset.cooling.insert(channel, column);
    }

    let equilibrium: Vec<EquilibriumState> = temperatures
        .iter()
        .map(|&t| EquilibriumState::at(t, hydrogen_fraction))
        .collect();
    dataset.cooling.insert(
        CoolingChannel::Equilibrium,
        equilibrium.iter().map(|e| e.lambda).collect(),
    );
    dataset.cooling.insert(
        CoolingChannel::EquilibriumHI,
        equilibrium.iter().map(|e| e.x_hi).collect(),
    );
    dataset.cooling.insert(
        CoolingChannel::EquilibriumHeI,
        equilibrium.iter().map(|e| e.x_hei).collect(),
    );
    dataset.cooling.insert(
        CoolingChannel::EquilibriumHeII,
        equilibrium.iter().map(|e| e.x_heii).collect(),
    );

    dataset.uvb = Some(UvbTable::builtin());

    tracing::debug!(bins = grid.bins, "generated builtin rate dataset");
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dataset_is_complete_and_valid() {
        let ds = generate(TemperatureGrid::default(), 0.76);
        ds.validate().unwrap();
        assert_eq!(ds.rates.len(), Reaction::ALL.len());
        assert_eq!(ds.cooling.len(), CoolingChannel::ALL.len());
        assert!(ds.uvb.is_some());
    }

    #[test]
    fn equilibrium_fractions_are_bounded() {
        let ds = generate(TemperatureGrid::default(), 0.76);
        for ch in CoolingChannel::EQUILIBRIUM_FRACTIONS {
            let column = ds.cooling(ch).unwrap();
            assert!(column.iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }
}
