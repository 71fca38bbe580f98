//! Solver invocation protocol: evolve one step and query derived quantities.
//!
//! Every operation takes the finalized configuration, the unit system, the
//! grid state and the current expansion factor. Preconditions are checked in
//! a fixed order before any cell is read:
//!
//! 1. the unit system matches the finalized one,
//! 2. the grid is not bound to another configuration,
//! 3. the expansion factor is valid,
//! 4. the timestep is valid (`evolve_step` only),
//! 5. every required field is present,
//! 6. the output buffer has a usable length (queries only),
//! 7. every active cell is physical.

use crate::cell::CellState;
use crate::error::{SolverError, SolverResult};
use crate::finalized::FinalizedConfig;
use crate::integrator::{CellOutcome, evolve_cell};
use crate::network::{Environment, energy_rate};
use crate::tables::RateTables;
use crate::thermo::{ThermoParams, pressure, thermo};
use gc_core::constants::T_CMB0;
use gc_core::{Real, UnitSystem, from_f64};
use gc_fields::GridFieldState;
use gc_rates::PhotoRates;
use rayon::prelude::*;

/// Summary of one `evolve_step` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Active cells visited.
    pub cells: usize,
    /// Largest subcycle count of any cell.
    pub max_subcycles: usize,
    pub total_subcycles: usize,
}

fn check_call(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
) -> SolverResult<()> {
    if units != config.units() {
        return Err(SolverError::UnitsMismatch);
    }
    if !state.accepts(config.token()) {
        return Err(SolverError::ConfigMismatch {
            bound: state
                .bound_token()
                .map_or_else(String::new, |t| t.short().to_string()),
            given: config.token().short().to_string(),
        });
    }
    let valid = if units.comoving_coordinates() {
        expansion_factor.is_finite() && expansion_factor > 0.0
    } else {
        expansion_factor == 1.0
    };
    if !valid {
        return Err(SolverError::InvalidExpansionFactor {
            value: expansion_factor,
        });
    }
    Ok(())
}

/// Load and check every active cell.
fn load_cells(config: &FinalizedConfig, state: &GridFieldState) -> SolverResult<Vec<(usize, CellState)>> {
    let variant = config.variant();
    state
        .shape()
        .active_indices()
        .into_iter()
        .map(|i| {
            let cell = CellState::load(state, &variant, i);
            cell.check_physical(&variant, i)?;
            Ok((i, cell))
        })
        .collect()
}

fn environment(
    config: &FinalizedConfig,
    units: &UnitSystem,
    expansion_factor: f64,
) -> Environment {
    let cfg = config.config();
    let a = units.scale_factor(expansion_factor);
    let redshift = if units.comoving_coordinates() {
        units.redshift(expansion_factor)
    } else {
        0.0
    };
    let photo = match config.tables() {
        Some(tables) if cfg.uv_background => tables.photo_rates(redshift),
        _ => PhotoRates::default(),
    };
    let cmb_floor = if cfg.cmb_temperature_floor {
        T_CMB0 * (1.0 + redshift)
    } else {
        0.0
    };
    Environment {
        variant: config.variant(),
        thermo: ThermoParams {
            gamma: cfg.gamma,
            hydrogen_fraction: cfg.hydrogen_fraction_by_mass,
            temperature_units: units.temperature_units(),
            temperature_floor: cfg.temperature_floor,
        },
        with_cooling: cfg.use_chemistry && cfg.with_radiative_cooling,
        hydrogen_fraction: cfg.hydrogen_fraction_by_mass,
        solar_metal_fraction: cfg.solar_metal_fraction_by_mass,
        density_to_cgs: units.density_to_cgs(expansion_factor),
        inv_a3: 1.0 / (a * a * a),
        redshift,
        time_units: units.time_units(),
        energy_units: units.specific_energy_units(),
        photo,
        floor_temperature: cfg.temperature_floor.max(cmb_floor),
        max_subcycles: cfg.max_subcycles,
        subcycle_fraction: cfg.subcycle_fraction,
    }
}

/// Advance species and internal energy of every active cell by `dt`.
///
/// The state is modified only if every cell succeeds. With chemistry off the
/// call validates its inputs and changes nothing.
pub fn evolve_step(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &mut GridFieldState,
    expansion_factor: f64,
    dt: f64,
) -> SolverResult<StepStats> {
    check_call(config, units, state, expansion_factor)?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SolverError::InvalidTimestep { dt });
    }
    let variant = config.variant();
    state.validate(&variant)?;
    let cells = load_cells(config, state)?;

    let tables = match config.tables() {
        Some(tables) if config.config().use_chemistry => tables,
        _ => {
            state.bind(config.token());
            return Ok(StepStats {
                cells: cells.len(),
                ..Default::default()
            });
        }
    };

    let env = environment(config, units, expansion_factor);
    let results: Vec<SolverResult<CellOutcome>> = cells
        .par_iter()
        .map(|(i, cell)| evolve_cell(cell, dt, tables, &env, *i))
        .collect();
    let outcomes = match results.into_iter().collect::<SolverResult<Vec<_>>>() {
        Ok(outcomes) => outcomes,
        Err(err) => {
            tracing::warn!(error = %err, dt, "chemistry step failed; state left unchanged");
            return Err(err);
        }
    };

    let mut stats = StepStats {
        cells: cells.len(),
        ..Default::default()
    };
    for ((i, _), outcome) in cells.iter().zip(&outcomes) {
        outcome.cell.store(state, &variant, *i);
        stats.max_subcycles = stats.max_subcycles.max(outcome.subcycles);
        stats.total_subcycles += outcome.subcycles;
    }
    state.bind(config.token());

    tracing::debug!(
        cells = stats.cells,
        max_subcycles = stats.max_subcycles,
        total_subcycles = stats.total_subcycles,
        dt,
        "chemistry step"
    );
    Ok(stats)
}

/// Map from active cells to output slots.
fn output_slots(state: &GridFieldState, len: usize) -> SolverResult<bool> {
    let shape = state.shape();
    let (active, volume) = (shape.active_count(), shape.volume());
    if len == active {
        Ok(true)
    } else if len == volume {
        Ok(false)
    } else {
        Err(SolverError::BufferSize {
            found: len,
            volume,
            active,
        })
    }
}

/// Shared driver of the read-only queries.
fn query_with<F>(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
    out: &mut [Real],
    f: F,
) -> SolverResult<()>
where
    F: Fn(&CellState, &Environment, Option<&RateTables>) -> f64 + Sync,
{
    check_call(config, units, state, expansion_factor)?;
    state.validate(&config.variant())?;
    let compact = output_slots(state, out.len())?;
    let cells = load_cells(config, state)?;

    let env = environment(config, units, expansion_factor);
    let tables = config.tables();
    let values: Vec<f64> = cells.par_iter().map(|(_, c)| f(c, &env, tables)).collect();

    for (slot, ((i, _), v)) in cells.iter().zip(values).enumerate() {
        let at = if compact { slot } else { *i };
        out[at] = from_f64(v);
    }
    state.bind(config.token());
    Ok(())
}

/// Gas temperature [K] of every active cell.
pub fn query_temperature(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
    out: &mut [Real],
) -> SolverResult<()> {
    query_with(config, units, state, expansion_factor, out, |c, env, _| {
        thermo(c, &env.variant, &env.thermo).temperature
    })
}

/// Code pressure `(γ_eff - 1) ρ e` of every active cell.
pub fn query_pressure(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
    out: &mut [Real],
) -> SolverResult<()> {
    query_with(config, units, state, expansion_factor, out, |c, env, _| {
        pressure(c, thermo(c, &env.variant, &env.thermo).gamma)
    })
}

/// Effective adiabatic index of every active cell.
pub fn query_gamma(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
    out: &mut [Real],
) -> SolverResult<()> {
    query_with(config, units, state, expansion_factor, out, |c, env, _| {
        thermo(c, &env.variant, &env.thermo).gamma
    })
}

/// Cooling time `e / |de/dt|` in code time units; `+∞` without net
/// heating or cooling, which includes every cell when chemistry is off.
pub fn query_cooling_time(
    config: &FinalizedConfig,
    units: &UnitSystem,
    state: &GridFieldState,
    expansion_factor: f64,
    out: &mut [Real],
) -> SolverResult<()> {
    query_with(config, units, state, expansion_factor, out, |c, env, tables| {
        // chemistry off: energy never changes
        let Some(tables) = tables else {
            return f64::INFINITY;
        };
        let th = thermo(c, &env.variant, &env.thermo);
        let edot = energy_rate(c, &th, tables, tables.locate(th.temperature), env);
        if edot == 0.0 {
            f64::INFINITY
        } else {
            c.energy / edot.abs()
        }
    })
}
