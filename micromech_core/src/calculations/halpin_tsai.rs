//! Halpin-Tsai Relations
//!
//! Closed-form estimates of the effective elastic constants of a
//! unidirectional composite as functions of the fiber volume fraction Vf.
//!
//! ```text
//! E1*  = Vf E1f + (1 - Vf) E1m                 (rule of mixtures)
//! v12* = Vf v12f + (1 - Vf) v12m               (rule of mixtures)
//!
//! M* / Mm = (1 + ξ η Vf) / (1 - η Vf),   η = (Mf / Mm - 1) / (Mf / Mm + ξ)
//!
//! E2*  : ξ = 2
//! G12* : ξ = 1
//! G23* : ξ = K23m / (K23m + 2 G23m)   (= 1 / (3 - 4 vm) for an isotropic matrix)
//! K23* : ξ = G23m / K23m              (Hill's plane-strain bulk modulus)
//! ```
//!
//! Every relation reduces to the matrix value at Vf = 0 and to the fiber value
//! at Vf = 1. The functions return `None` only on decimal overflow.

use rust_decimal::Decimal;

use crate::materials::ElasticConstants;

/// Reinforcing factor ξ for the transverse Young's modulus E2*
pub const XI_TRANSVERSE_YOUNGS: Decimal = Decimal::TWO;

/// Reinforcing factor ξ for the axial shear modulus G12*
pub const XI_AXIAL_SHEAR: Decimal = Decimal::ONE;

/// `Vf f + (1 - Vf) m`
pub fn rule_of_mixtures(fiber: Decimal, matrix: Decimal, vf: Decimal) -> Option<Decimal> {
    let fiber_part = vf.checked_mul(fiber)?;
    let matrix_part = (Decimal::ONE - vf).checked_mul(matrix)?;
    fiber_part.checked_add(matrix_part)
}

/// Halpin-Tsai estimate `Mm (1 + ξ η Vf) / (1 - η Vf)`.
///
/// Both moduli must be positive and ξ must be positive, which keeps η in
/// `(-1/ξ, 1)` and the denominator positive for every Vf in [0, 1].
pub fn halpin_tsai(fiber: Decimal, matrix: Decimal, xi: Decimal, vf: Decimal) -> Option<Decimal> {
    if vf.is_zero() {
        return Some(matrix);
    }
    let ratio = fiber.checked_div(matrix)?;
    let eta = (ratio - Decimal::ONE).checked_div(ratio.checked_add(xi)?)?;
    let eta_vf = eta.checked_mul(vf)?;
    let numerator = Decimal::ONE.checked_add(xi.checked_mul(eta_vf)?)?;
    let denominator = Decimal::ONE - eta_vf;
    matrix.checked_mul(numerator)?.checked_div(denominator)
}

/// ξ for the transverse shear modulus G23*: `K23m / (K23m + 2 G23m)`.
pub fn transverse_shear_xi(matrix: &ElasticConstants) -> Option<Decimal> {
    let k = matrix.pstrain_bulk_modulus;
    let g = matrix.transverse_shear_modulus;
    k.checked_div(k.checked_add(Decimal::TWO.checked_mul(g)?)?)
}

/// ξ for the plane-strain bulk modulus K23*: `G23m / K23m`.
pub fn bulk_xi(matrix: &ElasticConstants) -> Option<Decimal> {
    matrix
        .transverse_shear_modulus
        .checked_div(matrix.pstrain_bulk_modulus)
}
