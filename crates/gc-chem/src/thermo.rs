//! Mean molecular weight, adiabatic index, temperature and pressure.

use crate::cell::CellState;
use gc_fields::{NetworkVariant, PrimordialLevel, Species};

/// Thermodynamic state of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermo {
    pub mu: f64,
    pub gamma: f64,
    /// [K]
    pub temperature: f64,
}

/// Inputs shared by every cell of one call.
#[derive(Debug, Clone, Copy)]
pub struct ThermoParams {
    pub gamma: f64,
    pub hydrogen_fraction: f64,
    pub temperature_units: f64,
    pub temperature_floor: f64,
}

/// μ of neutral primordial gas.
pub fn neutral_mu(hydrogen_fraction: f64) -> f64 {
    1.0 / (hydrogen_fraction + (1.0 - hydrogen_fraction) / 4.0)
}

/// Number densities of the particles that contribute to μ, split into
/// `(molecular, monatomic)`. Deuterium is a trace and is left out.
fn particle_numbers(cell: &CellState, variant: &NetworkVariant) -> (f64, f64) {
    let mut molecular = 0.0;
    let mut monatomic = 0.0;
    for s in variant.species() {
        match s {
            Species::DI | Species::DII | Species::HDI => {}
            Species::H2I | Species::H2II => molecular += cell.n(s),
            _ => monatomic += cell.n(s),
        }
    }
    (molecular, monatomic)
}

/// `ρ / Σ n_i` from the tracked species, or the neutral value at level 0.
pub fn mean_molecular_weight(cell: &CellState, variant: &NetworkVariant, hydrogen_fraction: f64) -> f64 {
    if variant.level == PrimordialLevel::Level0 {
        return neutral_mu(hydrogen_fraction);
    }
    let (molecular, monatomic) = particle_numbers(cell, variant);
    let total = molecular + monatomic;
    if total > 0.0 {
        cell.density / total
    } else {
        neutral_mu(hydrogen_fraction)
    }
}

/// `1/(γ_H2 - 1)` including rotational and vibrational excitation.
pub fn h2_inverse_gamma_minus_one(temperature: f64) -> f64 {
    let x = 6100.0 / temperature;
    if x >= 10.0 || !x.is_finite() {
        return 2.5;
    }
    let ex = x.exp();
    0.5 * (5.0 + 2.0 * x * x * ex / ((ex - 1.0) * (ex - 1.0)))
}

/// Effective adiabatic index at `temperature`.
///
/// Levels 0 and 1 carry only monatomic gas. From level 2 on the molecular
/// contribution is mixed in by particle number.
pub fn effective_gamma(cell: &CellState, variant: &NetworkVariant, gamma: f64, temperature: f64) -> f64 {
    if variant.level < PrimordialLevel::Level2 {
        return gamma;
    }
    let (molecular, monatomic) = particle_numbers(cell, variant);
    let total = molecular + monatomic;
    if molecular <= 0.0 || total <= 0.0 {
        return gamma;
    }
    let inverse = (molecular * h2_inverse_gamma_minus_one(temperature)
        + monatomic / (gamma - 1.0))
        / total;
    1.0 + 1.0 / inverse
}

/// Temperature, μ and effective γ of `cell`.
///
/// The temperature is first estimated with the monatomic γ, then recomputed
/// with the effective γ at that estimate. It never drops below the floor.
pub fn thermo(cell: &CellState, variant: &NetworkVariant, p: &ThermoParams) -> Thermo {
    let mu = mean_molecular_weight(cell, variant, p.hydrogen_fraction);
    let base = (p.gamma - 1.0) * mu * cell.energy * p.temperature_units;
    let gamma = effective_gamma(cell, variant, p.gamma, base.max(p.temperature_floor));
    let temperature = ((gamma - 1.0) * mu * cell.energy * p.temperature_units).max(p.temperature_floor);
    Thermo {
        mu,
        gamma,
        temperature,
    }
}

/// Code pressure `(γ_eff - 1) ρ e`.
pub fn pressure(cell: &CellState, gamma_eff: f64) -> f64 {
    (gamma_eff - 1.0) * cell.density * cell.energy
}
