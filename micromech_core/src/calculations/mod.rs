//! # Micromechanics Calculations
//!
//! Effective elastic constants of a unidirectional composite.
//!
//! - [`halpin_tsai`] - Rule of mixtures and Halpin-Tsai relations
//! - [`effective`] - Vf sweep, single-index and range queries
//! - [`table`] - Ordered result table (`Vf, E1*, E2*, G12*, v12*, G23*, K23*`)
//!
//! Every operation takes a [`crate::composite::UdComposite`] and returns an
//! [`EffectiveTable`]; tables serialize to JSON as ordered column maps.

pub mod effective;
pub mod halpin_tsai;
pub mod table;

// Re-export commonly used types
pub use effective::{
    effective_properties_at, effective_properties_full, effective_properties_range, SWEEP_POINTS,
};
pub use table::{Column, EffectiveRow, EffectiveTable};
