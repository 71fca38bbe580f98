//! Reaction network source terms and the energy equation.

use crate::cell::CellState;
use crate::tables::{RateSet, RateTables};
use crate::thermo::{Thermo, ThermoParams};
use gc_core::constants::{MH, T_CMB0};
use gc_fields::{MetalCooling, NetworkVariant, PrimordialLevel, Species};
use gc_rates::{CoolingChannel, GridPoint, PhotoRates, Reaction};

/// Compton coupling to the CMB [erg cm^-3 s^-1 K^-1 per electron].
const COMPTON_COEFFICIENT: f64 = 5.65e-36;

/// Everything a cell update needs besides the cell itself.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub variant: NetworkVariant,
    pub thermo: ThermoParams,
    pub with_cooling: bool,
    pub hydrogen_fraction: f64,
    pub solar_metal_fraction: f64,
    /// Code density to proper g cm^-3 at the current expansion factor.
    pub density_to_cgs: f64,
    /// `(a a_units)^-3`, 1 outside comoving runs.
    pub inv_a3: f64,
    pub redshift: f64,
    pub time_units: f64,
    pub energy_units: f64,
    /// CGS photo rates of the UV background at `redshift`.
    pub photo: PhotoRates,
    /// Temperature the energy may not cool below while cooling is on [K].
    pub floor_temperature: f64,
    pub max_subcycles: usize,
    pub subcycle_fraction: f64,
}

impl Environment {
    /// Photoionization rates per code time.
    fn photo_code(&self) -> (f64, f64, f64) {
        let t = self.time_units;
        (self.photo.k24 * t, self.photo.k25 * t, self.photo.k26 * t)
    }
}

/// Creation `C` and destruction coefficient `D` per species, so that
/// `dn/dt = C - D n` in code units.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceTerms {
    pub creation: [f64; Species::COUNT],
    pub destruction: [f64; Species::COUNT],
}

impl SourceTerms {
    #[inline]
    pub fn c(&self, s: Species) -> f64 {
        self.creation[s.index()]
    }

    #[inline]
    pub fn d(&self, s: Species) -> f64 {
        self.destruction[s.index()]
    }

    /// Net rate of change of `s` at number density `n`.
    #[inline]
    pub fn net(&self, s: Species, n: f64) -> f64 {
        self.c(s) - self.d(s) * n
    }

    fn set(&mut self, s: Species, creation: f64, destruction: f64) {
        self.creation[s.index()] = creation;
        self.destruction[s.index()] = destruction;
    }
}

/// Source terms of every tracked species.
pub fn source_terms(cell: &CellState, rates: &RateSet, env: &Environment) -> SourceTerms {
    use Reaction::*;
    use Species as S;

    let mut out = SourceTerms::default();
    if env.variant.level == PrimordialLevel::Level0 {
        return out;
    }
    let k = |r| rates.k(r);
    let (g24, g25, g26) = env.photo_code();
    let level = env.variant.level;

    let hi = cell.n(S::HI);
    let hii = cell.n(S::HII);
    let hei = cell.n(S::HeI);
    let heii = cell.n(S::HeII);
    let heiii = cell.n(S::HeIII);
    let e = cell.n(S::Electron);
    let hm = cell.n(S::HM);
    let h2 = cell.n(S::H2I);
    let h2p = cell.n(S::H2II);
    let d = cell.n(S::DI);
    let dp = cell.n(S::DII);
    let hd = cell.n(S::HDI);

    // Atomic hydrogen and helium
    let mut hi_c = k(K2) * hii * e;
    let mut hi_d = k(K1) * e + g24;
    let mut hii_c = k(K1) * hi * e + g24 * hi;
    let mut hii_d = k(K2) * e;
    let mut e_c = k(K1) * hi * e + k(K3) * hei * e + k(K5) * heii * e + g24 * hi + g26 * hei + g25 * heii;
    let mut e_d = k(K2) * hii + k(K4) * heii + k(K6) * heiii;

    out.set(S::HeI, k(K4) * heii * e, k(K3) * e + g26);
    out.set(
        S::HeII,
        k(K3) * hei * e + g26 * hei + k(K6) * heiii * e,
        k(K4) * e + k(K5) * e + g25,
    );
    out.set(S::HeIII, k(K5) * heii * e + g25 * heii, k(K6) * e);

    if level >= PrimordialLevel::Level2 {
        hi_c += 2.0 * k(K12) * h2 * e
            + 2.0 * k(K13) * h2 * hi
            + k(K14) * hm * e
            + k(K15) * hm * hi
            + 2.0 * k(K16) * hm * hii
            + 2.0 * k(K18) * h2p * e
            + k(K19) * h2p * hm
            + k(K11) * h2 * hii;
        hi_d += k(K7) * e + k(K8) * hm + k(K9) * hii + k(K10) * h2p;
        hii_c += k(K10) * h2p * hi;
        hii_d += k(K9) * hi + k(K11) * h2 + k(K16) * hm + k(K17) * hm;
        e_c += k(K8) * hm * hi + k(K14) * hm * e + k(K15) * hm * hi + k(K17) * hm * hii;
        e_d += k(K7) * hi + k(K18) * h2p;

        out.set(
            S::HM,
            k(K7) * hi * e,
            k(K8) * hi + k(K14) * e + k(K15) * hi + k(K16) * hii + k(K17) * hii + k(K19) * h2p,
        );
        out.set(
            S::H2II,
            k(K9) * hi * hii + k(K11) * h2 * hii + k(K17) * hm * hii,
            k(K10) * hi + k(K18) * e + k(K19) * hm,
        );
        let mut h2_c = k(K8) * hm * hi + k(K10) * h2p * hi + k(K19) * h2p * hm;
        let mut h2_d = k(K11) * hii + k(K12) * e + k(K13) * hi;
        if level >= PrimordialLevel::Level3 {
            h2_c += k(K53) * hd * hii;
            h2_d += k(K52) * dp;
        }
        out.set(S::H2I, h2_c, h2_d);
    }

    if level >= PrimordialLevel::Level3 {
        hi_c += k(K50) * hii * d;
        hi_d += k(K51) * dp;
        hii_c += k(K51) * hi * dp + k(K52) * h2 * dp;
        hii_d += k(K50) * d + k(K53) * hd;
        e_c += k(K1) * d * e + g24 * d;
        e_d += k(K2) * dp;

        out.set(S::DI, k(K2) * dp * e + k(K51) * hi * dp, k(K1) * e + g24 + k(K50) * hii);
        out.set(
            S::DII,
            k(K1) * d * e + g24 * d + k(K50) * hii * d + k(K53) * hd * hii,
            k(K2) * e + k(K51) * hi + k(K52) * h2,
        );
        out.set(S::HDI, k(K52) * h2 * dp, k(K53) * hii);
    }

    out.set(S::HI, hi_c, hi_d);
    out.set(S::HII, hii_c, hii_d);
    out.set(S::Electron, e_c, e_d);
    out
}

/// CGS number density of species `s`.
#[inline]
fn n_cgs(cell: &CellState, s: Species, env: &Environment) -> f64 {
    cell.n(s) * env.density_to_cgs / MH
}

/// Net radiative heating minus cooling [erg cm^-3 s^-1].
fn radiative_rate(cell: &CellState, th: &Thermo, tables: &RateTables, at: GridPoint, env: &Environment) -> f64 {
    use CoolingChannel as C;
    use Species as S;

    let rho = cell.density * env.density_to_cgs;
    let n_h = env.hydrogen_fraction * rho / MH;
    let photo = &env.photo;
    let lambda = |ch| tables.cooling(ch, at);

    let mut heating = 0.0;
    let mut cooling = 0.0;

    if env.variant.level == PrimordialLevel::Level0 {
        cooling += lambda(C::Equilibrium) * n_h * n_h;
        if tables.has_uvb() {
            let n_he = (1.0 - env.hydrogen_fraction) * rho / (4.0 * MH);
            heating += photo.pi_hi * lambda(C::EquilibriumHI) * n_h
                + photo.pi_hei * lambda(C::EquilibriumHeI) * n_he
                + photo.pi_heii * lambda(C::EquilibriumHeII) * n_he;
        }
    } else {
        let hi = n_cgs(cell, S::HI, env);
        let hii = n_cgs(cell, S::HII, env);
        let hei = n_cgs(cell, S::HeI, env);
        let heii = n_cgs(cell, S::HeII, env);
        let heiii = n_cgs(cell, S::HeIII, env);
        let ne = n_cgs(cell, S::Electron, env);

        cooling += ne
            * (hi * (lambda(C::CeHI) + lambda(C::CiHI))
                + hii * lambda(C::ReHII)
                + hei * lambda(C::CiHeI)
                + heii
                    * (lambda(C::CeHeII)
                        + lambda(C::CiHeII)
                        + lambda(C::ReHeIIRadiative)
                        + lambda(C::ReHeIIDielectronic))
                + heiii * lambda(C::ReHeIII)
                + (hii + heii + 4.0 * heiii) * lambda(C::Bremsstrahlung));

        let zp1 = 1.0 + env.redshift;
        cooling += COMPTON_COEFFICIENT * zp1.powi(4) * (th.temperature - T_CMB0 * zp1) * ne;

        if env.variant.level >= PrimordialLevel::Level2 {
            cooling += lambda(C::H2) * n_cgs(cell, S::H2I, env) * hi;
        }
        if env.variant.level >= PrimordialLevel::Level3 {
            cooling += lambda(C::HD) * n_cgs(cell, S::HDI, env) * hi;
        }
        heating += photo.pi_hi * hi + photo.pi_hei * hei + photo.pi_heii * heii;
    }

    if env.variant.metals == MetalCooling::On {
        let z_rel = cell.metal / cell.density / env.solar_metal_fraction;
        cooling += z_rel * n_h * n_h * lambda(C::Metal);
    }

    heating - cooling
}

/// Rate of change of the code specific internal energy per code time.
///
/// External heating fields always contribute; radiative terms only with
/// cooling on. Only called with chemistry on, which is when tables exist.
pub fn energy_rate(
    cell: &CellState,
    th: &Thermo,
    tables: &RateTables,
    at: GridPoint,
    env: &Environment,
) -> f64 {
    let rho = cell.density * env.density_to_cgs;
    let mut edot = cell.volumetric_heating / rho + cell.specific_heating;
    if env.with_cooling {
        edot += radiative_rate(cell, th, tables, at, env) / rho;
    }
    edot * env.time_units / env.energy_units
}

/// Code internal energy at which the gas sits at `temperature`.
pub fn energy_at_temperature(temperature: f64, th: &Thermo, env: &Environment) -> f64 {
    temperature / (env.thermo.temperature_units * th.mu * (th.gamma - 1.0))
}
