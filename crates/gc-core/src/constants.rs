//! Physical constants in CGS.

/// Hydrogen mass [g].
pub const MH: f64 = 1.672_621_71e-24;

/// Boltzmann constant [erg K^-1].
pub const KBOLTZ: f64 = 1.380_650_4e-16;

/// Electron volt [erg].
pub const EV: f64 = 1.602_176_53e-12;

/// CMB temperature today [K].
pub const T_CMB0: f64 = 2.73;

/// Relative abundance floor used when seeding trace species.
pub const TINY_FRACTION: f64 = 1.0e-20;

/// Number-density floor below which a species is treated as absent.
pub const TINY_NUMBER: f64 = 1.0e-30;
