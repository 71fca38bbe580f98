//! Per-cell subcycled rate integration.

use crate::cell::CellState;
use crate::error::{SolverError, SolverResult};
use crate::network::{Environment, SourceTerms, energy_at_temperature, energy_rate, source_terms};
use crate::tables::RateTables;
use crate::thermo::thermo;
use gc_fields::{PrimordialLevel, Species};

/// Result of integrating one cell over a full step.
#[derive(Debug, Clone, Copy)]
pub struct CellOutcome {
    pub cell: CellState,
    pub subcycles: usize,
}

/// Nuclei number densities, conserved by the network.
#[derive(Debug, Clone, Copy)]
struct Nuclei {
    hydrogen: f64,
    helium: f64,
    deuterium: f64,
}

impl Nuclei {
    fn of(c: &CellState) -> Self {
        use Species as S;
        Self {
            hydrogen: pure_hydrogen(c) + c.n(S::HDI),
            helium: c.n(S::HeI) + c.n(S::HeII) + c.n(S::HeIII),
            deuterium: c.n(S::DI) + c.n(S::DII) + c.n(S::HDI),
        }
    }
}

fn pure_hydrogen(c: &CellState) -> f64 {
    use Species as S;
    c.n(S::HI) + c.n(S::HII) + c.n(S::HM) + 2.0 * c.n(S::H2I) + 2.0 * c.n(S::H2II)
}

fn scale(c: &mut CellState, species: &[Species], factor: f64) {
    for &s in species {
        c.species[s.index()] *= factor;
    }
}

/// Restore the starting nuclei totals and set electrons by charge neutrality.
fn make_consistent(c: &mut CellState, target: &Nuclei) {
    use Species as S;

    let now = Nuclei::of(c);
    if now.helium > 0.0 {
        scale(c, &[S::HeI, S::HeII, S::HeIII], target.helium / now.helium);
    }
    if now.deuterium > 0.0 {
        scale(c, &[S::DI, S::DII, S::HDI], target.deuterium / now.deuterium);
    }
    let pure = pure_hydrogen(c);
    let wanted = target.hydrogen - c.n(S::HDI);
    if pure > 0.0 && wanted > 0.0 {
        scale(c, &[S::HI, S::HII, S::HM, S::H2I, S::H2II], wanted / pure);
    }

    let ne = c.n(S::HII) + c.n(S::HeII) + 2.0 * c.n(S::HeIII) - c.n(S::HM)
        + c.n(S::H2II)
        + c.n(S::DII);
    c.set_n(S::Electron, ne.max(0.0));
}

/// Longest subcycle keeping e-, HI and energy changes within the fraction.
fn subcycle_length(
    c: &CellState,
    src: &SourceTerms,
    edot: f64,
    skip_energy: bool,
    remaining: f64,
    env: &Environment,
) -> f64 {
    let f = env.subcycle_fraction;
    let mut h = remaining;
    if env.variant.level >= PrimordialLevel::Level1 {
        for s in [Species::Electron, Species::HI] {
            let n = c.n(s);
            let rate = src.net(s, n).abs();
            if n > 0.0 && rate > 0.0 {
                h = h.min(f * n / rate);
            }
        }
    }
    if !skip_energy && c.energy > 0.0 && edot != 0.0 {
        h = h.min(f * c.energy / edot.abs());
    }
    h
}

/// Advance one cell by `dt` code time units.
///
/// Species use the backward-difference update `n' = (n + C h) / (1 + D h)`
/// against the state at the start of each subcycle. Energy is advanced
/// explicitly and, with cooling on, kept at or above the floor temperature.
/// Without cooling, negative external heating cannot take it below the floor.
pub fn evolve_cell(
    start: &CellState,
    dt: f64,
    tables: &RateTables,
    env: &Environment,
    index: usize,
) -> SolverResult<CellOutcome> {
    let variant = env.variant;
    let tracks_species = variant.level >= PrimordialLevel::Level1;
    let nuclei = Nuclei::of(start);

    let mut c = *start;
    let mut t = 0.0;
    let mut subcycles = 0;

    while t < dt {
        if subcycles >= env.max_subcycles {
            return Err(SolverError::ConvergenceFailed { index, subcycles });
        }
        subcycles += 1;

        let th = thermo(&c, &variant, &env.thermo);
        let at = tables.locate(th.temperature);
        let edot = energy_rate(&c, &th, tables, at, env);
        let e_floor = energy_at_temperature(env.floor_temperature, &th, env);
        let at_floor = edot < 0.0 && c.energy <= e_floor;

        let src = if tracks_species {
            let rates = tables.rates(at, env.inv_a3);
            source_terms(&c, &rates, env)
        } else {
            SourceTerms::default()
        };

        let remaining = dt - t;
        let h = subcycle_length(&c, &src, edot, at_floor, remaining, env);

        if tracks_species {
            let mut next = c;
            for s in variant.species() {
                if s == Species::Electron {
                    continue;
                }
                let n = (c.n(s) + src.c(s) * h) / (1.0 + src.d(s) * h);
                next.set_n(s, n);
            }
            make_consistent(&mut next, &nuclei);
            c.species = next.species;
        }

        let mut energy = c.energy + edot * h;
        if env.with_cooling {
            energy = energy.max(e_floor);
        } else if edot < 0.0 {
            // external cooling stops at the floor and never raises cold gas
            energy = energy.max(e_floor.min(c.energy));
        }
        if !energy.is_finite() || c.species.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::ConvergenceFailed { index, subcycles });
        }
        c.energy = energy;

        if h >= remaining {
            t = dt;
        } else {
            t += h;
        }
    }

    Ok(CellOutcome { cell: c, subcycles })
}
