//! # Units and Precision
//!
//! Every elastic constant is an exact base-10 [`Decimal`]. Moduli are expressed
//! in GPa and kept to 3 decimal places; Poisson's ratios of a phase are kept to
//! 3 places and the effective major Poisson's ratio v12* to 4 places.
//!
//! Rounding is half-to-even and the result is always padded to the full scale,
//! so `2.8` is stored (and printed) as `2.800`.
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::units::Quantity;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let g = Decimal::from_str("1.07692307").unwrap();
//! assert_eq!(Quantity::Modulus.quantize(g).to_string(), "1.077");
//!
//! let e = Decimal::from_str("2.8").unwrap();
//! assert_eq!(Quantity::Modulus.quantize(e).to_string(), "2.800");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept for moduli (GPa)
pub const MODULUS_DECIMAL_PLACES: u32 = 3;

/// Decimal places kept for a phase's Poisson's ratio
pub const RATIO_DECIMAL_PLACES: u32 = 3;

/// Decimal places kept for the effective major Poisson's ratio v12*
pub const EFFECTIVE_RATIO_DECIMAL_PLACES: u32 = 4;

/// Decimal places of a fiber volume fraction sample (steps of 0.01)
pub const VOLUME_FRACTION_DECIMAL_PLACES: u32 = 2;

/// Kind of stored quantity, which fixes its precision and unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    /// Young's, shear or bulk modulus in GPa
    Modulus,
    /// Poisson's ratio of a constituent phase
    Ratio,
    /// Effective major Poisson's ratio of the composite
    EffectiveRatio,
    /// Fiber volume fraction
    VolumeFraction,
}

impl Quantity {
    /// Number of decimal places kept for this quantity
    pub fn decimal_places(&self) -> u32 {
        match self {
            Quantity::Modulus => MODULUS_DECIMAL_PLACES,
            Quantity::Ratio => RATIO_DECIMAL_PLACES,
            Quantity::EffectiveRatio => EFFECTIVE_RATIO_DECIMAL_PLACES,
            Quantity::VolumeFraction => VOLUME_FRACTION_DECIMAL_PLACES,
        }
    }

    /// Unit suffix used in labels ("GPa" or empty for dimensionless values)
    pub fn unit(&self) -> &'static str {
        match self {
            Quantity::Modulus => "GPa",
            Quantity::Ratio | Quantity::EffectiveRatio | Quantity::VolumeFraction => "",
        }
    }

    /// Round half-to-even to this quantity's precision and pad to full scale.
    pub fn quantize(&self, value: Decimal) -> Decimal {
        quantize(value, self.decimal_places())
    }
}

/// Round `value` half-to-even to `decimal_places` and pad the scale.
pub fn quantize(value: Decimal, decimal_places: u32) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(decimal_places);
    rounded
}
