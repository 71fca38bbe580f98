//! Conversion between simulation ("code") units and CGS.

use crate::constants::{KBOLTZ, MH};
use crate::error::InvalidUnitsError;
use crate::units::{self, Temperature, Time};
use serde::{Deserialize, Serialize};

/// Code-to-CGS unit system for one run.
///
/// Built once at run start and shared by reference afterwards. Every field is
/// validated at construction; `velocity_units` is always derived as
/// `length_units / time_units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UnitSystemDef", into = "UnitSystemDef")]
pub struct UnitSystem {
    density_units: f64,
    length_units: f64,
    time_units: f64,
    velocity_units: f64,
    a_units: f64,
    comoving_coordinates: bool,
}

/// On-disk form of a unit system. `velocity_units` may be given explicitly
/// but must then match the derived value exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitSystemDef {
    pub density_units: f64,
    pub length_units: f64,
    pub time_units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_units: Option<f64>,
    #[serde(default = "default_a_units")]
    pub a_units: f64,
    #[serde(default)]
    pub comoving_coordinates: bool,
}

fn default_a_units() -> f64 {
    1.0
}

fn positive(what: &'static str, value: f64) -> Result<f64, InvalidUnitsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidUnitsError::NonPositive { what, value })
    }
}

impl UnitSystem {
    /// Build a unit system, deriving `velocity_units`.
    pub fn new(
        density_units: f64,
        length_units: f64,
        time_units: f64,
        a_units: f64,
        comoving_coordinates: bool,
    ) -> Result<Self, InvalidUnitsError> {
        let density_units = positive("density_units", density_units)?;
        let length_units = positive("length_units", length_units)?;
        let time_units = positive("time_units", time_units)?;
        let a_units = positive("a_units", a_units)?;
        Ok(Self {
            density_units,
            length_units,
            time_units,
            velocity_units: length_units / time_units,
            a_units,
            comoving_coordinates,
        })
    }

    /// Non-cosmological unit system (`a_units = 1`).
    pub fn physical(
        density_units: f64,
        length_units: f64,
        time_units: f64,
    ) -> Result<Self, InvalidUnitsError> {
        Self::new(density_units, length_units, time_units, 1.0, false)
    }

    pub fn density_units(&self) -> f64 {
        self.density_units
    }

    pub fn length_units(&self) -> f64 {
        self.length_units
    }

    pub fn time_units(&self) -> f64 {
        self.time_units
    }

    pub fn velocity_units(&self) -> f64 {
        self.velocity_units
    }

    pub fn a_units(&self) -> f64 {
        self.a_units
    }

    pub fn comoving_coordinates(&self) -> bool {
        self.comoving_coordinates
    }

    /// Temperature per unit of `(gamma - 1) * mu * internal_energy` [K].
    pub fn temperature_units(&self) -> f64 {
        let v = self.a_units * self.velocity_units;
        MH * v * v / KBOLTZ
    }

    /// CGS specific energy [erg/g] of one code unit of internal energy.
    pub fn specific_energy_units(&self) -> f64 {
        let v = self.a_units * self.velocity_units;
        v * v
    }

    /// Physical scale factor `a * a_units` (1 for non-comoving runs).
    pub fn scale_factor(&self, expansion_factor: f64) -> f64 {
        if self.comoving_coordinates {
            expansion_factor * self.a_units
        } else {
            1.0
        }
    }

    /// Redshift implied by the code expansion factor.
    pub fn redshift(&self, expansion_factor: f64) -> f64 {
        1.0 / (expansion_factor * self.a_units) - 1.0
    }

    /// Multiplier taking code densities to proper CGS densities [g cm^-3].
    pub fn density_to_cgs(&self, expansion_factor: f64) -> f64 {
        let a = self.scale_factor(expansion_factor);
        self.density_units / (a * a * a)
    }

    /// Proper CGS mass density of a code density.
    pub fn physical_density(&self, rho_code: f64, expansion_factor: f64) -> f64 {
        rho_code * self.density_to_cgs(expansion_factor)
    }

    /// Hydrogen-mass number density [cm^-3] per code density unit, at `a = 1`.
    ///
    /// Two-body rate coefficients are pre-multiplied by this and `time_units`.
    pub fn number_density_units(&self) -> f64 {
        self.density_units / MH
    }

    /// A physical duration expressed in code time units.
    pub fn code_time(&self, t: Time) -> f64 {
        units::seconds(t) / self.time_units
    }

    /// A code duration as a physical time.
    pub fn physical_time(&self, code: f64) -> Time {
        units::s(code * self.time_units)
    }

    /// Code internal energy of a gas at `temperature` with the given
    /// mean molecular weight and adiabatic index.
    pub fn internal_energy_for_temperature(&self, temperature: Temperature, mu: f64, gamma: f64) -> f64 {
        units::kelvin(temperature) / (self.temperature_units() * mu * (gamma - 1.0))
    }
}

impl TryFrom<UnitSystemDef> for UnitSystem {
    type Error = InvalidUnitsError;

    fn try_from(def: UnitSystemDef) -> Result<Self, Self::Error> {
        let units = Self::new(
            def.density_units,
            def.length_units,
            def.time_units,
            def.a_units,
            def.comoving_coordinates,
        )?;
        if let Some(v) = def.velocity_units {
            if v != units.velocity_units {
                return Err(InvalidUnitsError::VelocityMismatch {
                    velocity_units: v,
                    expected: units.velocity_units,
                });
            }
        }
        Ok(units)
    }
}

impl From<UnitSystem> for UnitSystemDef {
    fn from(u: UnitSystem) -> Self {
        Self {
            density_units: u.density_units,
            length_units: u.length_units,
            time_units: u.time_units,
            velocity_units: Some(u.velocity_units),
            a_units: u.a_units,
            comoving_coordinates: u.comoving_coordinates,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn velocity_invariant_holds(
            d in 1e-30_f64..1e10,
            l in 1e-5_f64..1e30,
            t in 1e-5_f64..1e20,
        ) {
            let u = UnitSystem::physical(d, l, t).unwrap();
            prop_assert_eq!(u.velocity_units(), u.length_units() / u.time_units());
        }
    }
}
