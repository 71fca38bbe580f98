//! Per-cell working copy of the grid fields.

use crate::error::{SolverError, SolverResult};
use gc_core::{from_f64, to_f64};
use gc_fields::{FieldName, GridFieldState, MetalCooling, NetworkVariant, Species};

const VELOCITIES: [FieldName; 3] = [
    FieldName::XVelocity,
    FieldName::YVelocity,
    FieldName::ZVelocity,
];

/// One cell's state, widened to `f64`.
///
/// Species slots hold mass densities in code units, indexed by
/// [`Species::index`]. Untracked species stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellState {
    pub density: f64,
    pub energy: f64,
    pub species: [f64; Species::COUNT],
    pub metal: f64,
    /// Checked only; chemistry never changes them.
    pub velocity: [f64; 3],
    /// erg s^-1 cm^-3
    pub volumetric_heating: f64,
    /// erg s^-1 g^-1
    pub specific_heating: f64,
}

impl CellState {
    #[inline]
    pub fn rho(&self, s: Species) -> f64 {
        self.species[s.index()]
    }

    /// Number density in code units (hydrogen masses per code volume).
    #[inline]
    pub fn n(&self, s: Species) -> f64 {
        self.species[s.index()] / s.mass_number()
    }

    #[inline]
    pub fn set_n(&mut self, s: Species, n: f64) {
        self.species[s.index()] = n * s.mass_number();
    }

    /// Read cell `index` of `state`. Fields the variant does not track, and
    /// absent heating fields, read as zero.
    pub fn load(state: &GridFieldState, variant: &NetworkVariant, index: usize) -> Self {
        let get = |name: FieldName| state.field(name).map_or(0.0, |f| to_f64(f[index]));
        let mut cell = CellState {
            density: get(FieldName::Density),
            energy: get(FieldName::InternalEnergy),
            metal: if variant.metals == MetalCooling::On {
                get(FieldName::Metal)
            } else {
                0.0
            },
            velocity: VELOCITIES.map(get),
            volumetric_heating: get(FieldName::VolumetricHeatingRate),
            specific_heating: get(FieldName::SpecificHeatingRate),
            ..Default::default()
        };
        for s in variant.species() {
            cell.species[s.index()] = get(s.field());
        }
        cell
    }

    /// Reject non-finite values, non-positive density or energy and
    /// negative densities.
    pub fn check_physical(&self, variant: &NetworkVariant, index: usize) -> SolverResult<()> {
        let bad = |field: FieldName, value: f64| SolverError::NonPhysical {
            field,
            index,
            value,
        };
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(bad(FieldName::Density, self.density));
        }
        if !(self.energy.is_finite() && self.energy > 0.0) {
            return Err(bad(FieldName::InternalEnergy, self.energy));
        }
        for (field, v) in VELOCITIES.into_iter().zip(self.velocity) {
            if !v.is_finite() {
                return Err(bad(field, v));
            }
        }
        for s in variant.species() {
            let v = self.rho(s);
            if !(v.is_finite() && v >= 0.0) {
                return Err(bad(s.field(), v));
            }
        }
        if !(self.metal.is_finite() && self.metal >= 0.0) {
            return Err(bad(FieldName::Metal, self.metal));
        }
        if !self.volumetric_heating.is_finite() {
            return Err(bad(FieldName::VolumetricHeatingRate, self.volumetric_heating));
        }
        if !self.specific_heating.is_finite() {
            return Err(bad(FieldName::SpecificHeatingRate, self.specific_heating));
        }
        Ok(())
    }

    /// Write energy and tracked species back to cell `index`.
    pub fn store(&self, state: &mut GridFieldState, variant: &NetworkVariant, index: usize) {
        if let Some(e) = state.field_mut(FieldName::InternalEnergy) {
            e[index] = from_f64(self.energy);
        }
        for s in variant.species() {
            if let Some(f) = state.field_mut(s.field()) {
                f[index] = from_f64(self.rho(s));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gc_fields::{GridShape, PrimordialInit, PrimordialLevel};

    fn variant() -> NetworkVariant {
        NetworkVariant::new(PrimordialLevel::Level2, MetalCooling::Off)
    }

    #[test]
    fn load_and_store() {
        let v = variant();
        let mut state = PrimordialInit::default()
            .build(GridShape::full(&[2]).unwrap(), &v)
            .unwrap();
        let mut cell = CellState::load(&state, &v, 1);
        assert_eq!(cell.density, 1.0);
        assert!((cell.n(Species::HeI) - 0.06).abs() < 1e-12);
        assert_eq!(cell.rho(Species::DI), 0.0);
        cell.set_n(Species::H2I, 0.25);
        cell.energy = 7.0;
        cell.store(&mut state, &v, 1);
        assert_eq!(state.field(FieldName::H2I).unwrap(), &[1.0e-20, 0.5]);
        assert_eq!(state.field(FieldName::InternalEnergy).unwrap()[0], 1.0e-3);
        assert_eq!(state.field(FieldName::InternalEnergy).unwrap()[1], 7.0);
    }

    #[test]
    fn physical_checks() {
        let v = variant();
        let state = PrimordialInit::default()
            .build(GridShape::full(&[1]).unwrap(), &v)
            .unwrap();
        let good = CellState::load(&state, &v, 0);
        good.check_physical(&v, 0).unwrap();

        let mut cell = good;
        cell.density = 0.0;
        assert!(matches!(
            cell.check_physical(&v, 3),
            Err(SolverError::NonPhysical {
                field: FieldName::Density,
                index: 3,
                ..
            })
        ));

        let mut cell = good;
        cell.species[Species::HM.index()] = -1.0;
        assert!(matches!(
            cell.check_physical(&v, 0),
            Err(SolverError::NonPhysical {
                field: FieldName::HM,
                ..
            })
        ));

        let mut cell = good;
        cell.energy = f64::NAN;
        assert!(cell.check_physical(&v, 0).is_err());

        let mut cell = good;
        cell.energy = 0.0;
        assert!(matches!(
            cell.check_physical(&v, 0),
            Err(SolverError::NonPhysical {
                field: FieldName::InternalEnergy,
                ..
            })
        ));
    }

    #[test]
    fn non_finite_velocity_is_rejected() {
        let v = variant();
        let mut state = PrimordialInit::default()
            .build(GridShape::full(&[2]).unwrap(), &v)
            .unwrap();
        state.field_mut(FieldName::YVelocity).unwrap()[1] = f64::NAN as gc_core::Real;
        CellState::load(&state, &v, 0).check_physical(&v, 0).unwrap();
        assert!(matches!(
            CellState::load(&state, &v, 1).check_physical(&v, 1),
            Err(SolverError::NonPhysical {
                field: FieldName::YVelocity,
                index: 1,
                ..
            })
        ));
    }
}
