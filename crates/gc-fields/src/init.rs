//! Primordial initial conditions for a grid field state.

use crate::error::FieldResult;
use crate::shape::GridShape;
use crate::species::{FieldName, Species};
use crate::state::GridFieldState;
use crate::variant::{MetalCooling, NetworkVariant};
use gc_core::from_f64;

/// Uniform neutral primordial gas.
///
/// Hydrogen and helium start neutral, deuterium starts atomic, and every
/// other tracked species is set to `tiny_fraction` of the density.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimordialInit {
    /// Code density.
    pub density: f64,
    /// Code specific internal energy.
    pub internal_energy: f64,
    pub hydrogen_fraction: f64,
    /// Metal mass fraction (solar by default), used only when metal cooling
    /// is on.
    pub metal_fraction: f64,
    pub deuterium_fraction: f64,
    pub tiny_fraction: f64,
    /// Also allocate zeroed volumetric and specific heating arrays.
    pub heating_fields: bool,
}

impl Default for PrimordialInit {
    fn default() -> Self {
        Self {
            density: 1.0,
            internal_energy: 1.0e-3,
            hydrogen_fraction: 0.76,
            metal_fraction: 0.01295,
            deuterium_fraction: 2.0 * 3.4e-5,
            tiny_fraction: gc_core::constants::TINY_FRACTION,
            heating_fields: false,
        }
    }
}

impl PrimordialInit {
    fn species_density(&self, species: Species) -> f64 {
        let rho = self.density;
        match species {
            Species::HI => self.hydrogen_fraction * rho,
            Species::HeI => (1.0 - self.hydrogen_fraction) * rho,
            Species::DI => self.deuterium_fraction * rho,
            _ => self.tiny_fraction * rho,
        }
    }

    /// Fill every array `variant` requires, plus the optional heating
    /// arrays when requested.
    pub fn apply(&self, state: &mut GridFieldState, variant: &NetworkVariant) -> FieldResult<()> {
        let fill = |state: &mut GridFieldState, name: FieldName, value: f64| {
            state.fill_field(name, from_f64(value));
        };

        fill(state, FieldName::Density, self.density);
        fill(state, FieldName::InternalEnergy, self.internal_energy);
        for v in [
            FieldName::XVelocity,
            FieldName::YVelocity,
            FieldName::ZVelocity,
        ] {
            fill(state, v, 0.0);
        }
        for species in variant.species() {
            fill(state, species.field(), self.species_density(species));
        }
        if variant.metals == MetalCooling::On {
            fill(state, FieldName::Metal, self.metal_fraction * self.density);
        }
        if self.heating_fields {
            fill(state, FieldName::VolumetricHeatingRate, 0.0);
            fill(state, FieldName::SpecificHeatingRate, 0.0);
        }
        Ok(())
    }

    /// Fresh state of `shape` with these initial conditions.
    pub fn build(
        &self,
        shape: GridShape,
        variant: &NetworkVariant,
    ) -> FieldResult<GridFieldState> {
        let mut state = GridFieldState::new(shape);
        self.apply(&mut state, variant)?;
        Ok(state)
    }
}
