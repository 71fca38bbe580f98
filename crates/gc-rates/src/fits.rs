//! Analytic CGS fits used to generate the builtin dataset.
//!
//! Collisional H/He rates and cooling follow Cen (1992); H2 chemistry follows
//! Abel et al. (1997) and Galli & Palla (1998); the HD cooling curve is the
//! low-density limit of Lipovka et al. (2005). The metal cooling curve is a
//! smooth fit to a solar-metallicity curve and is not meant for precision work.

use crate::reaction::{CoolingChannel, Reaction};

const KELVIN_PER_EV: f64 = 11_604.5;

#[inline]
fn cen_damping(t: f64) -> f64 {
    1.0 / (1.0 + (t / 1.0e5).sqrt())
}

#[inline]
fn recombination_shape(t: f64) -> f64 {
    (t / 1.0e3).powf(-0.2) / (1.0 + (t / 1.0e6).powf(0.7))
}

/// Rate coefficient [cm^3 s^-1] of `reaction` at temperature `t` [K].
pub fn rate_coefficient(reaction: Reaction, t: f64) -> f64 {
    let sqrt_t = t.sqrt();
    let k = match reaction {
        Reaction::K1 => 5.85e-11 * sqrt_t * cen_damping(t) * (-157_809.1 / t).exp(),
        Reaction::K2 => 8.40e-11 / sqrt_t * recombination_shape(t),
        Reaction::K3 => 2.38e-11 * sqrt_t * cen_damping(t) * (-285_335.4 / t).exp(),
        Reaction::K4 => {
            1.50e-10 * t.powf(-0.6353)
                + 1.9e-3 * t.powf(-1.5) * (-470_000.0 / t).exp() * (1.0 + 0.3 * (-94_000.0 / t).exp())
        }
        Reaction::K5 => 5.68e-12 * sqrt_t * cen_damping(t) * (-631_515.0 / t).exp(),
        Reaction::K6 => 3.36e-10 / sqrt_t * recombination_shape(t),
        Reaction::K7 => 3.0e-16 * (t / 300.0).powf(0.95) * (-t / 9_320.0).exp(),
        Reaction::K8 => {
            if t < 300.0 {
                1.5e-9
            } else {
                4.0e-9 * t.powf(-0.17)
            }
        }
        Reaction::K9 => {
            if t < 6_700.0 {
                1.85e-23 * t.powf(1.8)
            } else {
                let x = t / 56_200.0;
                5.81e-16 * x.powf(-0.6657 * x.log10())
            }
        }
        Reaction::K10 => 6.0e-10,
        Reaction::K11 => 3.0e-10 * (-21_050.0 / t).exp(),
        Reaction::K12 => {
            let tc = t.min(1.0e5);
            4.4e-10 * tc.powf(0.35) * (-102_000.0 / tc).exp()
        }
        Reaction::K13 => {
            let t_ev = t / KELVIN_PER_EV;
            1.067e-10 * t_ev.powf(2.012) * (-4.463 / t_ev).exp()
                / (1.0 + 0.2472 * t_ev).powf(3.512)
        }
        Reaction::K14 => {
            let tc = t.min(1.0e5);
            4.0e-12 * tc * (-8_750.0 / tc).exp()
        }
        Reaction::K15 => {
            let tc = t.min(1.0e4);
            5.3e-20 * tc.powf(2.17) * (-8_750.0 / tc).exp()
        }
        Reaction::K16 => {
            let tc = t.min(1.0e5);
            2.4e-6 / tc.sqrt() * (1.0 + tc / 20_000.0)
        }
        Reaction::K17 => {
            if t < 1.0e4 {
                1.0e-8 * t.powf(-0.4)
            } else {
                4.0e-4 * t.powf(-1.4) * (-15_100.0 / t).exp()
            }
        }
        Reaction::K18 => {
            if t < 617.0 {
                1.0e-8
            } else {
                1.32e-6 * t.powf(-0.76)
            }
        }
        Reaction::K19 => 5.0e-7 * (100.0 / t).sqrt(),
        Reaction::K50 => {
            (2.0e-10 * t.powf(0.402) * (-37.1 / t).exp() - 3.31e-17 * t.powf(1.48)).max(0.0)
        }
        Reaction::K51 => 2.06e-10 * t.powf(0.396) * (-33.0 / t).exp() + 2.03e-9 * t.powf(-0.332),
        Reaction::K52 => 1.0e-9,
        Reaction::K53 => 1.0e-9 * (-464.0 / t).exp(),
    };
    if k.is_finite() { k.max(0.0) } else { 0.0 }
}

/// Galli & Palla (1998) low-density H2 cooling per H2-HI pair [erg cm^3 s^-1].
fn h2_cooling(t: f64) -> f64 {
    let x = t.log10().clamp(1.0, 4.0);
    let log_lambda = -103.0 + 97.59 * x - 48.05 * x * x + 10.80 * x.powi(3) - 0.9032 * x.powi(4);
    10f64.powf(log_lambda)
}

/// Lipovka et al. (2005) HD cooling, n -> 0 limit [erg cm^3 s^-1].
fn hd_cooling(t: f64) -> f64 {
    let x = t.log10().clamp(1.0, 3.5);
    let log_lambda =
        -42.576_88 + 21.933_85 * x - 10.190_97 * x * x + 2.199_06 * x.powi(3) - 0.173_34 * x.powi(4);
    10f64.powf(log_lambda)
}

/// Solar-metallicity metal-line cooling per n_H^2 [erg cm^3 s^-1].
pub fn metal_cooling_curve(t: f64) -> f64 {
    let fine_structure = 2.8e-28 * t.sqrt() * (-92.0 / t).exp();
    let z = (t.log10() - 5.35) / 0.45;
    let ion_peak = 2.5e-22 * (-0.5 * z * z).exp() * (-2.0e4 / t).exp();
    let coronal = 2.0e-23 * (t / 1.0e6).powf(-0.5) * (-1.0e6 / t).exp();
    fine_structure + ion_peak + coronal
}

/// Cooling coefficient of a per-pair channel at `t` [K].
///
/// Returns `None` for the equilibrium channels, which depend on the hydrogen
/// fraction; see [`EquilibriumState`].
pub fn cooling_coefficient(channel: CoolingChannel, t: f64) -> Option<f64> {
    let sqrt_t = t.sqrt();
    let lambda = match channel {
        CoolingChannel::CeHI => 7.50e-19 * (-118_348.0 / t).exp() * cen_damping(t),
        CoolingChannel::CeHeII => {
            5.54e-17 * t.powf(-0.397) * (-473_638.0 / t).exp() * cen_damping(t)
        }
        CoolingChannel::CiHI => 1.27e-21 * sqrt_t * cen_damping(t) * (-157_809.1 / t).exp(),
        CoolingChannel::CiHeI => 9.38e-22 * sqrt_t * cen_damping(t) * (-285_335.4 / t).exp(),
        CoolingChannel::CiHeII => 4.95e-22 * sqrt_t * cen_damping(t) * (-631_515.0 / t).exp(),
        CoolingChannel::ReHII => 8.70e-27 * sqrt_t * recombination_shape(t),
        CoolingChannel::ReHeIIRadiative => 1.55e-26 * t.powf(0.3647),
        CoolingChannel::ReHeIIDielectronic => {
            1.24e-13 * t.powf(-1.5) * (-470_000.0 / t).exp() * (1.0 + 0.3 * (-94_000.0 / t).exp())
        }
        CoolingChannel::ReHeIII => 3.48e-26 * sqrt_t * recombination_shape(t),
        CoolingChannel::Bremsstrahlung => 1.42e-27 * 1.5 * sqrt_t,
        CoolingChannel::H2 => h2_cooling(t),
        CoolingChannel::HD => hd_cooling(t),
        CoolingChannel::Metal => metal_cooling_curve(t),
        CoolingChannel::Equilibrium
        | CoolingChannel::EquilibriumHI
        | CoolingChannel::EquilibriumHeI
        | CoolingChannel::EquilibriumHeII => return None,
    };
    Some(if lambda.is_finite() { lambda.max(0.0) } else { 0.0 })
}

/// Collisional ionization equilibrium of primordial gas at one temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumState {
    /// n_HI / n_H
    pub x_hi: f64,
    /// n_HeI / n_He
    pub x_hei: f64,
    /// n_HeII / n_He
    pub x_heii: f64,
    /// Net primordial cooling per n_H^2 [erg cm^3 s^-1]
    pub lambda: f64,
}

impl EquilibriumState {
    /// Solve the two-level balances at `t` for gas with hydrogen mass
    /// fraction `hydrogen_fraction`.
    pub fn at(t: f64, hydrogen_fraction: f64) -> Self {
        let k = |r| rate_coefficient(r, t);
        let c = |ch| cooling_coefficient(ch, t).unwrap_or(0.0);

        let (k1, k2) = (k(Reaction::K1), k(Reaction::K2));
        let x_hi = if k1 + k2 > 0.0 { k2 / (k1 + k2) } else { 1.0 };
        let x_hii = 1.0 - x_hi;

        // He ladder: HeI <-> HeII <-> HeIII
        let r1 = if k(Reaction::K4) > 0.0 {
            k(Reaction::K3) / k(Reaction::K4)
        } else {
            0.0
        };
        let r2 = if k(Reaction::K6) > 0.0 {
            k(Reaction::K5) / k(Reaction::K6)
        } else {
            0.0
        };
        let norm = 1.0 + r1 + r1 * r2;
        let x_hei = 1.0 / norm;
        let x_heii = r1 / norm;
        let x_heiii = r1 * r2 / norm;

        // helium atoms per hydrogen atom
        let y = (1.0 - hydrogen_fraction) / (4.0 * hydrogen_fraction);
        let x_e = x_hii + y * (x_heii + 2.0 * x_heiii);

        let lambda = x_e
            * (x_hi * (c(CoolingChannel::CeHI) + c(CoolingChannel::CiHI))
                + x_hii * c(CoolingChannel::ReHII)
                + y * x_hei * c(CoolingChannel::CiHeI)
                + y * x_heii
                    * (c(CoolingChannel::CeHeII)
                        + c(CoolingChannel::CiHeII)
                        + c(CoolingChannel::ReHeIIRadiative)
                        + c(CoolingChannel::ReHeIIDielectronic))
                + y * x_heiii * c(CoolingChannel::ReHeIII)
                + (x_hii + y * (x_heii + 4.0 * x_heiii)) * c(CoolingChannel::Bremsstrahlung));

        Self {
            x_hi,
            x_hei,
            x_heii,
            lambda,
        }
    }
}
