//! # Effective Properties of a UD Composite
//!
//! Evaluates the Halpin-Tsai relations of [`super::halpin_tsai`] over the fiber
//! volume fraction. The default sweep samples Vf = 0.00, 0.01, ..., 1.00
//! (indexes 0..=100).
//!
//! Every row is evaluated from the phase constants on its own, in decimal
//! arithmetic, and each property is rounded once (3 places for moduli, 4 for
//! v12*). A single-row or range query therefore returns exactly the matching
//! rows of the full sweep.
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::calculations::effective::{
//!     effective_properties_at, effective_properties_full, effective_properties_range,
//! };
//! use micromech_core::composite::UdComposite;
//! use micromech_core::materials::{IsotropicPhase, TranstropicPhase};
//!
//! let composite = UdComposite::new(
//!     TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28).unwrap(),
//!     IsotropicPhase::new("Epoxy", 2.8, 0.3).unwrap(),
//! );
//!
//! let full = effective_properties_full(&composite).unwrap();
//! assert_eq!(full.len(), 101);
//!
//! let one = effective_properties_at(&composite, 45).unwrap();
//! assert_eq!(one.rows()[0], full.rows()[45]);
//!
//! let part = effective_properties_range(&composite, 10, 20).unwrap();
//! assert_eq!(part.len(), 11);
//!
//! assert!(effective_properties_at(&composite, 101).is_err());
//! ```

use rust_decimal::Decimal;

use crate::calculations::halpin_tsai::{
    bulk_xi, halpin_tsai, rule_of_mixtures, transverse_shear_xi, XI_AXIAL_SHEAR,
    XI_TRANSVERSE_YOUNGS,
};
use crate::calculations::table::{Column, EffectiveRow, EffectiveTable};
use crate::composite::UdComposite;
use crate::errors::{MechError, MechResult};
use crate::materials::ElasticConstants;
use crate::validation::{validate_index, RawValue};

/// Largest sweep index (Vf = 1.00)
pub const MAX_INDEX: i64 = 100;

/// Number of rows in the full sweep
pub const SWEEP_POINTS: usize = 101;

/// Fiber volume fraction of a sweep index (`index / 100`).
pub fn volume_fraction(index: usize) -> Decimal {
    Decimal::new(index as i64, 2)
}

/// Full 101-row sweep over Vf = 0.00 ..= 1.00.
pub fn effective_properties_full(composite: &UdComposite) -> MechResult<EffectiveTable> {
    let table = compute_rows(composite, 0, SWEEP_POINTS - 1)?;
    tracing::debug!(label = %table.label(), rows = table.len(), "full sweep computed");
    Ok(table)
}

/// Effective properties at a single sweep index (Vf = index / 100).
///
/// The index must be an integer (type error otherwise) within 0..=100
/// (value error otherwise). Returns a one-row table carrying the headers.
pub fn effective_properties_at(
    composite: &UdComposite,
    index: impl Into<RawValue>,
) -> MechResult<EffectiveTable> {
    let index = checked_index("index", &index.into())?;
    compute_rows(composite, index, index)
}

/// Rows `start..=end` of the sweep.
///
/// Both bounds must be integers within 0..=100 and `start < end`; equal or
/// inverted bounds are value errors (use [`effective_properties_at`] for a
/// single row).
pub fn effective_properties_range(
    composite: &UdComposite,
    start: impl Into<RawValue>,
    end: impl Into<RawValue>,
) -> MechResult<EffectiveTable> {
    let start = checked_index("start", &start.into())?;
    let end = checked_index("end", &end.into())?;
    if start >= end {
        return Err(MechError::invalid_value(
            "start",
            format!("{}..{}", start, end),
            "Range start must be strictly less than range end",
        ));
    }
    compute_rows(composite, start, end)
}

/// Effective properties at an arbitrary fiber volume fraction in [0, 1].
///
/// Used by the sweep for every sample; exposed for callers that need a Vf
/// outside the 0.01 grid.
pub fn effective_row(
    fiber: &ElasticConstants,
    matrix: &ElasticConstants,
    vf: Decimal,
) -> MechResult<EffectiveRow> {
    if vf < Decimal::ZERO || vf > Decimal::ONE {
        return Err(MechError::invalid_value(
            "vf",
            vf.to_string(),
            "Fiber volume fraction must be within [0, 1]",
        ));
    }
    let overflow = |column: Column| {
        move || {
            MechError::invalid_value(
                column.symbol(),
                vf.to_string(),
                "Effective property is out of the representable decimal range",
            )
        }
    };

    let e1 = rule_of_mixtures(fiber.axial_youngs_modulus, matrix.axial_youngs_modulus, vf)
        .ok_or_else(overflow(Column::E1))?;
    let e2 = halpin_tsai(
        fiber.transverse_youngs_modulus,
        matrix.transverse_youngs_modulus,
        XI_TRANSVERSE_YOUNGS,
        vf,
    )
    .ok_or_else(overflow(Column::E2))?;
    let g12 = halpin_tsai(
        fiber.axial_shear_modulus,
        matrix.axial_shear_modulus,
        XI_AXIAL_SHEAR,
        vf,
    )
    .ok_or_else(overflow(Column::G12))?;
    let v12 = rule_of_mixtures(fiber.major_poissons_ratio, matrix.major_poissons_ratio, vf)
        .ok_or_else(overflow(Column::V12))?;
    let g23 = transverse_shear_xi(matrix)
        .and_then(|xi| {
            halpin_tsai(
                fiber.transverse_shear_modulus,
                matrix.transverse_shear_modulus,
                xi,
                vf,
            )
        })
        .ok_or_else(overflow(Column::G23))?;
    let k23 = bulk_xi(matrix)
        .and_then(|xi| {
            halpin_tsai(
                fiber.pstrain_bulk_modulus,
                matrix.pstrain_bulk_modulus,
                xi,
                vf,
            )
        })
        .ok_or_else(overflow(Column::K23))?;

    Ok(EffectiveRow {
        vf: Column::Vf.quantity().quantize(vf),
        e1: Column::E1.quantity().quantize(e1),
        e2: Column::E2.quantity().quantize(e2),
        g12: Column::G12.quantity().quantize(g12),
        v12: Column::V12.quantity().quantize(v12),
        g23: Column::G23.quantity().quantize(g23),
        k23: Column::K23.quantity().quantize(k23),
    })
}

/// Evaluate sweep rows `start..=end`, each independently.
fn compute_rows(composite: &UdComposite, start: usize, end: usize) -> MechResult<EffectiveTable> {
    let fiber = composite.fiber().elastic_constants();
    let matrix = composite.matrix().elastic_constants();
    let rows = (start..=end)
        .map(|index| effective_row(&fiber, &matrix, volume_fraction(index)))
        .collect::<MechResult<Vec<_>>>()?;
    Ok(EffectiveTable::new(composite.label(), rows))
}

/// Integer check (type) followed by the 0..=100 range check (value).
fn checked_index(field: &str, value: &RawValue) -> MechResult<usize> {
    let index = validate_index(field, value)?;
    if !(0..=MAX_INDEX).contains(&index) {
        return Err(MechError::invalid_value(
            field,
            index.to_string(),
            format!("Index must be between 0 and {}", MAX_INDEX),
        ));
    }
    Ok(index as usize)
}
