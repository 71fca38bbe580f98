//! gc-fields: per-cell field arrays for the chemistry solver.
//!
//! Provides:
//! - Field and species identifiers
//! - The network variant (primordial level × metal cooling) and its
//!   required-field set
//! - Grid shape with ghost-zone aware active region
//! - `GridFieldState`, the single owner of shape metadata and arrays
//! - Uniform neutral-primordial initialization

pub mod error;
pub mod init;
pub mod shape;
pub mod species;
pub mod state;
pub mod variant;

pub use error::{FieldError, FieldResult, MissingFieldError};
pub use init::PrimordialInit;
pub use shape::GridShape;
pub use species::{FieldName, Species};
pub use state::GridFieldState;
pub use variant::{MetalCooling, NetworkVariant, PrimordialLevel};
