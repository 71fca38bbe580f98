//! Network variants and their required-field sets.

use crate::error::FieldError;
use crate::species::{FieldName, Species};

/// Cumulative tier of tracked primordial species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimordialLevel {
    /// No non-equilibrium network; tabulated equilibrium cooling only.
    Level0,
    /// H, He and electrons.
    Level1,
    /// Level 1 plus H-, H2 and H2+.
    Level2,
    /// Level 2 plus D, D+ and HD.
    Level3,
}

impl PrimordialLevel {
    pub const ALL: [PrimordialLevel; 4] = [
        PrimordialLevel::Level0,
        PrimordialLevel::Level1,
        PrimordialLevel::Level2,
        PrimordialLevel::Level3,
    ];

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for PrimordialLevel {
    type Error = FieldError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(PrimordialLevel::Level0),
            1 => Ok(PrimordialLevel::Level1),
            2 => Ok(PrimordialLevel::Level2),
            3 => Ok(PrimordialLevel::Level3),
            _ => Err(FieldError::InvalidLevel { level }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetalCooling {
    On,
    Off,
}

impl From<bool> for MetalCooling {
    fn from(enabled: bool) -> Self {
        if enabled {
            MetalCooling::On
        } else {
            MetalCooling::Off
        }
    }
}

/// One of the eight `{Level0..Level3} × {On, Off}` network variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkVariant {
    pub level: PrimordialLevel,
    pub metals: MetalCooling,
}

impl NetworkVariant {
    pub fn new(level: PrimordialLevel, metals: MetalCooling) -> Self {
        Self { level, metals }
    }

    /// All eight variants.
    pub fn all() -> impl Iterator<Item = NetworkVariant> {
        PrimordialLevel::ALL.into_iter().flat_map(|level| {
            [MetalCooling::Off, MetalCooling::On]
                .into_iter()
                .map(move |metals| NetworkVariant { level, metals })
        })
    }

    /// Species evolved by this variant, in network order.
    pub fn species(&self) -> impl Iterator<Item = Species> + use<> {
        let level = self.level.as_u8();
        Species::ALL
            .into_iter()
            .filter(move |s| s.min_level() <= level)
    }

    pub fn tracks(&self, species: Species) -> bool {
        species.min_level() <= self.level.as_u8()
    }

    /// Arrays a grid field state must carry for this variant.
    pub fn required_fields(&self) -> Vec<FieldName> {
        let mut fields = FieldName::BASE.to_vec();
        fields.extend(self.species().map(|s| s.field()));
        if self.metals == MetalCooling::On {
            fields.push(FieldName::Metal);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(PrimordialLevel::try_from(3).unwrap(), PrimordialLevel::Level3);
        assert_eq!(
            PrimordialLevel::try_from(4),
            Err(FieldError::InvalidLevel { level: 4 })
        );
    }

    #[test]
    fn required_field_table() {
        use FieldName::*;
        let v = |l, m| NetworkVariant::new(l, m).required_fields();
        assert_eq!(
            v(PrimordialLevel::Level0, MetalCooling::Off),
            vec![Density, InternalEnergy, XVelocity, YVelocity, ZVelocity]
        );
        assert_eq!(
            v(PrimordialLevel::Level1, MetalCooling::Off)[5..],
            [HI, HII, HeI, HeII, HeIII, Electron]
        );
        assert_eq!(
            v(PrimordialLevel::Level2, MetalCooling::Off)[11..],
            [HM, H2I, H2II]
        );
        assert_eq!(
            v(PrimordialLevel::Level3, MetalCooling::On)[14..],
            [DI, DII, HDI, Metal]
        );
    }

    #[test]
    fn levels_are_strict_supersets() {
        let counts: Vec<usize> = PrimordialLevel::ALL
            .into_iter()
            .map(|l| NetworkVariant::new(l, MetalCooling::Off).required_fields().len())
            .collect();
        assert_eq!(counts, vec![5, 11, 14, 17]);
    }

    #[test]
    fn eight_variants() {
        assert_eq!(NetworkVariant::all().count(), 8);
    }
}
