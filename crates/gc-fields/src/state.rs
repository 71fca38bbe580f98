//! Grid field state: shape metadata plus the named arrays.

use crate::error::{FieldError, FieldResult, MissingFieldError};
use crate::shape::GridShape;
use crate::species::FieldName;
use crate::variant::NetworkVariant;
use gc_core::{ReadyToken, Real};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Per-cell arrays for one grid patch.
///
/// The state owns every array and sizes each one to the full grid volume
/// (ghost zones included). Solver operations only read and write the active
/// region. Once an operation has succeeded on it, the state is bound to that
/// configuration's ready token.
#[derive(Debug, Clone)]
pub struct GridFieldState {
    shape: GridShape,
    fields: BTreeMap<FieldName, Vec<Real>>,
    binding: OnceLock<ReadyToken>,
}

impl GridFieldState {
    /// Empty state; arrays are added with [`set_field`](Self::set_field).
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            fields: BTreeMap::new(),
            binding: OnceLock::new(),
        }
    }

    pub fn shape(&self) -> &GridShape {
        &self.shape
    }

    /// Insert or replace an array. Its length must equal the grid volume.
    pub fn set_field(&mut self, name: FieldName, data: Vec<Real>) -> FieldResult<()> {
        let expected = self.shape.volume();
        if data.len() != expected {
            return Err(FieldError::SizeMismatch {
                field: name,
                found: data.len(),
                expected,
            });
        }
        self.fields.insert(name, data);
        Ok(())
    }

    /// Builder form of [`set_field`](Self::set_field).
    pub fn with_field(mut self, name: FieldName, data: Vec<Real>) -> FieldResult<Self> {
        self.set_field(name, data)?;
        Ok(self)
    }

    /// Fill an array with one value, allocating it if absent.
    pub fn fill_field(&mut self, name: FieldName, value: Real) {
        let volume = self.shape.volume();
        self.fields
            .entry(name)
            .and_modify(|v| v.fill(value))
            .or_insert_with(|| vec![value; volume]);
    }

    pub fn remove_field(&mut self, name: FieldName) -> Option<Vec<Real>> {
        self.fields.remove(&name)
    }

    pub fn has_field(&self, name: FieldName) -> bool {
        self.fields.contains_key(&name)
    }

    pub fn field(&self, name: FieldName) -> Option<&[Real]> {
        self.fields.get(&name).map(Vec::as_slice)
    }

    /// Mutable view of an array; the length cannot change.
    pub fn field_mut(&mut self, name: FieldName) -> Option<&mut [Real]> {
        self.fields.get_mut(&name).map(Vec::as_mut_slice)
    }

    pub fn field_names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.keys().copied()
    }

    /// Check that every array `variant` needs is present.
    ///
    /// Reports all missing fields at once.
    pub fn validate(&self, variant: &NetworkVariant) -> Result<(), MissingFieldError> {
        let missing: Vec<FieldName> = variant
            .required_fields()
            .into_iter()
            .filter(|f| !self.fields.contains_key(f))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFieldError { missing })
        }
    }

    /// Token of the configuration this state is bound to, if any.
    pub fn bound_token(&self) -> Option<&ReadyToken> {
        self.binding.get()
    }

    /// Whether `token` may operate on this state.
    pub fn accepts(&self, token: &ReadyToken) -> bool {
        self.binding.get().is_none_or(|bound| bound == token)
    }

    /// Bind to `token` if not yet bound. Returns whether the state is bound to
    /// `token` afterwards.
    pub fn bind(&self, token: &ReadyToken) -> bool {
        let bound = self.binding.get_or_init(|| token.clone());
        bound == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{MetalCooling, PrimordialLevel};

    fn one_cell() -> GridFieldState {
        GridFieldState::new(GridShape::full(&[1]).unwrap())
    }

    #[test]
    fn reject_wrong_length() {
        let mut state = GridFieldState::new(GridShape::full(&[4]).unwrap());
        let err = state.set_field(FieldName::Density, vec![1.0; 3]).unwrap_err();
        assert_eq!(
            err,
            FieldError::SizeMismatch {
                field: FieldName::Density,
                found: 3,
                expected: 4
            }
        );
        assert!(!state.has_field(FieldName::Density));
    }

    #[test]
    fn validate_lists_every_missing_field() {
        let mut state = one_cell();
        for f in FieldName::BASE {
            state.fill_field(f, 1.0);
        }
        state.fill_field(FieldName::HII, 0.0);
        let variant = NetworkVariant::new(PrimordialLevel::Level1, MetalCooling::On);
        let err = state.validate(&variant).unwrap_err();
        assert_eq!(
            err.missing,
            vec![
                FieldName::HI,
                FieldName::HeI,
                FieldName::HeII,
                FieldName::HeIII,
                FieldName::Electron,
                FieldName::Metal
            ]
        );
    }

    #[test]
    fn optional_heating_fields_are_never_required() {
        let mut state = one_cell();
        for f in FieldName::BASE {
            state.fill_field(f, 1.0);
        }
        let variant = NetworkVariant::new(PrimordialLevel::Level0, MetalCooling::Off);
        state.validate(&variant).unwrap();
    }

    #[test]
    fn binding_is_sticky() {
        let state = one_cell();
        let a = ReadyToken::from_digest("aa");
        let b = ReadyToken::from_digest("bb");
        assert!(state.accepts(&a) && state.accepts(&b));
        assert!(state.bind(&a));
        assert!(state.accepts(&a));
        assert!(!state.accepts(&b));
        assert!(!state.bind(&b));
        assert_eq!(state.bound_token(), Some(&a));
    }

    #[test]
    fn fill_field_reuses_allocation() {
        let mut state = GridFieldState::new(GridShape::full(&[3]).unwrap());
        state.fill_field(FieldName::Density, 2.0);
        state.fill_field(FieldName::Density, 5.0);
        assert_eq!(state.field(FieldName::Density).unwrap(), &[5.0, 5.0, 5.0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn missing_list_is_exact(
            variant_index in 0usize..8,
            mask in prop::collection::vec(any::<bool>(), 18),
        ) {
            let variant = NetworkVariant::all().nth(variant_index).unwrap();
            let required = variant.required_fields();
            let mut state = GridFieldState::new(GridShape::full(&[2]).unwrap());
            let mut expected = Vec::new();
            for (i, f) in required.iter().enumerate() {
                if mask[i] {
                    state.fill_field(*f, 1.0);
                } else {
                    expected.push(*f);
                }
            }
            match state.validate(&variant) {
                Ok(()) => prop_assert!(expected.is_empty()),
                Err(err) => prop_assert_eq!(err.missing, expected),
            }
        }
    }
}
