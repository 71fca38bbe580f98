//! Field and species identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every named array a grid field state can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldName {
    Density,
    InternalEnergy,
    XVelocity,
    YVelocity,
    ZVelocity,
    HI,
    HII,
    HeI,
    HeII,
    HeIII,
    Electron,
    HM,
    H2I,
    H2II,
    DI,
    DII,
    HDI,
    Metal,
    VolumetricHeatingRate,
    SpecificHeatingRate,
}

impl FieldName {
    pub const ALL: [FieldName; 20] = [
        FieldName::Density,
        FieldName::InternalEnergy,
        FieldName::XVelocity,
        FieldName::YVelocity,
        FieldName::ZVelocity,
        FieldName::HI,
        FieldName::HII,
        FieldName::HeI,
        FieldName::HeII,
        FieldName::HeIII,
        FieldName::Electron,
        FieldName::HM,
        FieldName::H2I,
        FieldName::H2II,
        FieldName::DI,
        FieldName::DII,
        FieldName::HDI,
        FieldName::Metal,
        FieldName::VolumetricHeatingRate,
        FieldName::SpecificHeatingRate,
    ];

    /// Fields required at every level: density, energy and velocities.
    pub const BASE: [FieldName; 5] = [
        FieldName::Density,
        FieldName::InternalEnergy,
        FieldName::XVelocity,
        FieldName::YVelocity,
        FieldName::ZVelocity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FieldName::Density => "density",
            FieldName::InternalEnergy => "internal_energy",
            FieldName::XVelocity => "x_velocity",
            FieldName::YVelocity => "y_velocity",
            FieldName::ZVelocity => "z_velocity",
            FieldName::HI => "HI_density",
            FieldName::HII => "HII_density",
            FieldName::HeI => "HeI_density",
            FieldName::HeII => "HeII_density",
            FieldName::HeIII => "HeIII_density",
            FieldName::Electron => "e_density",
            FieldName::HM => "HM_density",
            FieldName::H2I => "H2I_density",
            FieldName::H2II => "H2II_density",
            FieldName::DI => "DI_density",
            FieldName::DII => "DII_density",
            FieldName::HDI => "HDI_density",
            FieldName::Metal => "metal_density",
            FieldName::VolumetricHeatingRate => "volumetric_heating_rate",
            FieldName::SpecificHeatingRate => "specific_heating_rate",
        }
    }

    /// Whether the field holds a mass density that must be non-negative.
    pub fn is_density(&self) -> bool {
        matches!(self, FieldName::Density | FieldName::Metal) || self.species().is_some()
    }

    pub fn species(&self) -> Option<Species> {
        Species::ALL.into_iter().find(|s| s.field() == *self)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for FieldName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s.trim()))
            .ok_or("unknown field")
    }
}

/// Chemical species tracked by the non-equilibrium network.
///
/// Densities are stored as mass densities; `mass_number` converts them to
/// number densities in hydrogen masses. The electron field is stored in
/// hydrogen-mass units, so its mass number is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    HI,
    HII,
    HeI,
    HeII,
    HeIII,
    Electron,
    HM,
    H2I,
    H2II,
    DI,
    DII,
    HDI,
}

impl Species {
    pub const COUNT: usize = 12;

    pub const ALL: [Species; Species::COUNT] = [
        Species::HI,
        Species::HII,
        Species::HeI,
        Species::HeII,
        Species::HeIII,
        Species::Electron,
        Species::HM,
        Species::H2I,
        Species::H2II,
        Species::DI,
        Species::DII,
        Species::HDI,
    ];

    /// Dense index in `0..COUNT`.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn field(&self) -> FieldName {
        match self {
            Species::HI => FieldName::HI,
            Species::HII => FieldName::HII,
            Species::HeI => FieldName::HeI,
            Species::HeII => FieldName::HeII,
            Species::HeIII => FieldName::HeIII,
            Species::Electron => FieldName::Electron,
            Species::HM => FieldName::HM,
            Species::H2I => FieldName::H2I,
            Species::H2II => FieldName::H2II,
            Species::DI => FieldName::DI,
            Species::DII => FieldName::DII,
            Species::HDI => FieldName::HDI,
        }
    }

    /// Mass in hydrogen masses per particle.
    pub fn mass_number(&self) -> f64 {
        match self {
            Species::HI | Species::HII | Species::Electron | Species::HM => 1.0,
            Species::H2I | Species::H2II | Species::DI | Species::DII => 2.0,
            Species::HDI => 3.0,
            Species::HeI | Species::HeII | Species::HeIII => 4.0,
        }
    }

    /// Lowest primordial chemistry level that tracks this species.
    pub fn min_level(&self) -> u8 {
        match self {
            Species::HI
            | Species::HII
            | Species::HeI
            | Species::HeII
            | Species::HeIII
            | Species::Electron => 1,
            Species::HM | Species::H2I | Species::H2II => 2,
            Species::DI | Species::DII | Species::HDI => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_position() {
        for (i, s) in Species::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn field_keys_parse_back() {
        for f in FieldName::ALL {
            assert_eq!(f.key().parse::<FieldName>().unwrap(), f);
        }
        assert!("bogus".parse::<FieldName>().is_err());
    }

    #[test]
    fn density_classification() {
        assert!(FieldName::HI.is_density());
        assert!(FieldName::Metal.is_density());
        assert!(FieldName::Density.is_density());
        assert!(!FieldName::XVelocity.is_density());
        assert!(!FieldName::SpecificHeatingRate.is_density());
    }
}
