//! # Input Validation
//!
//! Shared checks used by every phase constructor and setter. Values can arrive
//! as integers, floats, decimals or text (interactive input, CSV cells); all of
//! them are reduced to their textual form and must then be a plain positive
//! decimal: digits with at most one decimal point, no sign, no exponent, no
//! thousands separators and no embedded whitespace. Surrounding whitespace is
//! stripped first.
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::validation::{validate_name, validate_positive_decimal, validate_ratio};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(validate_positive_decimal(" 2.8 ").unwrap(), Decimal::new(28, 1));
//! assert!(validate_positive_decimal("1,000").is_err());
//! assert!(validate_ratio(0.6).is_err());
//! assert_eq!(validate_name("  Fiberglass ").unwrap(), "Fiberglass");
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::errors::{MechError, MechResult};
use crate::units::Quantity;

/// Digits with an optional single fractional part.
static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid decimal pattern"));

/// Upper bound (inclusive) of a Poisson's ratio.
pub const MAX_POISSONS_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// A value as supplied by a caller, before validation.
///
/// Conversions exist from the common numeric types and strings, and from
/// `Option<T>` where `None` becomes [`RawValue::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// No value was supplied
    Missing,
    /// Integer input
    Integer(i64),
    /// Binary floating point input
    Float(f64),
    /// Exact decimal input
    Decimal(Decimal),
    /// Text input (prompt answer or CSV cell)
    Text(String),
}

impl RawValue {
    /// Textual form that the format rules are checked against.
    ///
    /// Returns `None` for a missing value.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Missing => None,
            RawValue::Integer(i) => Some(i.to_string()),
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Decimal(d) => Some(d.to_string()),
            RawValue::Text(s) => Some(s.clone()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "<missing>"),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        RawValue::Decimal(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        RawValue::Text(value.clone())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => RawValue::Missing,
        }
    }
}

/// Validate a strictly positive, plainly formatted decimal.
///
/// Rejects a missing or empty value, embedded whitespace, more than one
/// decimal point, any character other than digits and the point (signs,
/// exponents, thousands separators), and zero.
pub fn validate_positive_decimal(value: impl Into<RawValue>) -> MechResult<Decimal> {
    check_positive_decimal("value", &value.into())
}

/// Validate a Poisson's ratio: a positive decimal no greater than 0.5.
pub fn validate_ratio(value: impl Into<RawValue>) -> MechResult<Decimal> {
    check_ratio("value", &value.into())
}

/// Validate a constituent name.
///
/// Surrounding whitespace is stripped; the rest must be non-empty and consist
/// only of letters, digits, `_` and `-`.
pub fn validate_name(value: &str) -> MechResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MechError::invalid_value("name", value, "Name must not be empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(MechError::invalid_value(
            "name",
            value,
            "Name must not contain whitespace",
        ));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(MechError::invalid_value(
            "name",
            value,
            format!("Name may only contain letters, digits, '_' and '-' (found '{}')", bad),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a sweep index given as raw input.
///
/// Only integers are accepted; anything else (including integral-looking text
/// or floats) is a type error. The range check happens where the index is used.
pub fn validate_index(field: &str, value: &RawValue) -> MechResult<i64> {
    match value {
        RawValue::Integer(i) => Ok(*i),
        RawValue::Missing => Err(MechError::invalid_type(field, "An integer index is required")),
        other => Err(MechError::invalid_type(
            field,
            format!("Index must be an integer, got '{}'", other),
        )),
    }
}

/// Parse a prompt answer into a raw index: integral text becomes an integer,
/// anything else stays text (and is later rejected as a type error).
pub fn parse_index_input(input: &str) -> RawValue {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return RawValue::Missing;
    }
    match trimmed.parse::<i64>() {
        Ok(i) => RawValue::Integer(i),
        Err(_) => RawValue::Text(trimmed.to_string()),
    }
}

/// [`validate_positive_decimal`] with the offending field named in the error.
pub(crate) fn check_positive_decimal(field: &str, value: &RawValue) -> MechResult<Decimal> {
    let text = match value.as_text() {
        Some(text) => text,
        None => return Err(MechError::invalid_value(field, "<missing>", "A value is required")),
    };
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(MechError::invalid_value(field, text, "A value is required"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(MechError::invalid_value(
            field,
            text,
            "Value must not contain whitespace",
        ));
    }
    if trimmed.starts_with('-') {
        return Err(MechError::invalid_value(
            field,
            text,
            "Value must be greater than zero",
        ));
    }
    if trimmed.matches('.').count() > 1 {
        return Err(MechError::invalid_value(
            field,
            text,
            "Value must contain at most one decimal point",
        ));
    }
    if !DECIMAL_PATTERN.is_match(trimmed) {
        return Err(MechError::invalid_value(
            field,
            text,
            "Value may only contain digits and one decimal point",
        ));
    }

    let parsed = Decimal::from_str(trimmed)
        .map_err(|e| MechError::invalid_value(field, text.as_str(), e.to_string()))?;
    if parsed.is_zero() {
        return Err(MechError::invalid_value(
            field,
            text,
            "Value must be greater than zero",
        ));
    }
    Ok(parsed)
}

/// [`validate_ratio`] with the offending field named in the error.
pub(crate) fn check_ratio(field: &str, value: &RawValue) -> MechResult<Decimal> {
    let parsed = check_positive_decimal(field, value)?;
    if parsed > MAX_POISSONS_RATIO {
        return Err(MechError::invalid_value(
            field,
            parsed.to_string(),
            "Poisson's ratio must not exceed 0.5",
        ));
    }
    Ok(parsed)
}

/// A phase modulus, rounded to its stored precision and still positive.
pub(crate) fn check_modulus(field: &str, value: &RawValue) -> MechResult<Decimal> {
    let parsed = check_positive_decimal(field, value)?;
    check_rounded(field, parsed, Quantity::Modulus)
}

/// A phase Poisson's ratio, rounded to its stored precision and still positive.
pub(crate) fn check_phase_ratio(field: &str, value: &RawValue) -> MechResult<Decimal> {
    let parsed = check_ratio(field, value)?;
    check_rounded(field, parsed, Quantity::Ratio)
}

/// Round `value` for storage, rejecting anything that rounds to zero.
pub(crate) fn check_rounded(
    field: &str,
    value: Decimal,
    quantity: Quantity,
) -> MechResult<Decimal> {
    let rounded = quantity.quantize(value);
    if rounded.is_zero() {
        return Err(MechError::invalid_value(
            field,
            value.to_string(),
            format!(
                "Value rounds to zero at {} decimal places",
                quantity.decimal_places()
            ),
        ));
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accepts_supported_input_shapes() {
        assert_eq!(validate_positive_decimal(250).unwrap(), dec!(250));
        assert_eq!(validate_positive_decimal(2.8).unwrap(), dec!(2.8));
        assert_eq!(validate_positive_decimal(dec!(17.023)).unwrap(), dec!(17.023));
        assert_eq!(validate_positive_decimal("0.28").unwrap(), dec!(0.28));
        assert_eq!(validate_positive_decimal("\t 25 \n").unwrap(), dec!(25));
    }

    #[test]
    fn test_rejects_malformed_decimals() {
        for bad in ["", "   ", "2 5", "1.2.3", "1,000", "abc", "1e5", "+3", ".5", "5.", "-2.8"] {
            let err = validate_positive_decimal(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "input {:?}", bad);
        }
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(validate_positive_decimal(0).is_err());
        assert!(validate_positive_decimal("0.000").is_err());
        assert!(validate_positive_decimal(-1).is_err());
        assert!(validate_positive_decimal(-2.5).is_err());
        assert!(validate_positive_decimal(dec!(-3)).is_err());
    }

    #[test]
    fn test_rejects_missing_and_non_finite() {
        let missing: Option<f64> = None;
        assert_eq!(validate_positive_decimal(missing).unwrap_err().kind(), ErrorKind::Value);
        assert!(validate_positive_decimal(f64::NAN).is_err());
        assert!(validate_positive_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(validate_ratio("0.5").unwrap(), dec!(0.5));
        assert_eq!(validate_ratio(0.3).unwrap(), dec!(0.3));
        assert!(validate_ratio("0.5001").is_err());
        assert!(validate_ratio(0).is_err());
        assert!(validate_ratio(1).is_err());
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(validate_name("  Fiberglass ").unwrap(), "Fiberglass");
        assert_eq!(validate_name("T300_epoxy-2").unwrap(), "T300_epoxy-2");
        assert!(validate_name("Fiber Glass").is_err());
        assert!(validate_name("IM7*").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_index_validation() {
        assert_eq!(validate_index("index", &RawValue::Integer(45)).unwrap(), 45);
        assert_eq!(validate_index("index", &RawValue::Integer(-1)).unwrap(), -1);
        assert_eq!(
            validate_index("index", &RawValue::Missing).unwrap_err().kind(),
            ErrorKind::Type
        );
        assert_eq!(
            validate_index("index", &RawValue::Float(4.5)).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn test_parse_index_input() {
        assert_eq!(parse_index_input(" 45 "), RawValue::Integer(45));
        assert_eq!(parse_index_input("-1"), RawValue::Integer(-1));
        assert_eq!(parse_index_input(""), RawValue::Missing);
        assert_eq!(parse_index_input("4.5"), RawValue::Text("4.5".to_string()));
    }

    #[test]
    fn test_error_names_field() {
        let err = check_ratio("poissons_ratio", &RawValue::from("0.7")).unwrap_err();
        assert!(err.to_string().contains("poissons_ratio"));
    }

    #[test]
    fn test_values_rounding_to_zero_rejected() {
        let err = check_modulus("youngs_modulus", &RawValue::from("0.0004")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().contains("rounds to zero"));
        assert!(check_phase_ratio("poissons_ratio", &RawValue::from("0.0004")).is_err());

        // half-to-even: 0.0005 still rounds to zero
        assert!(check_modulus("youngs_modulus", &RawValue::from("0.0005")).is_err());
        assert_eq!(
            check_modulus("youngs_modulus", &RawValue::from("0.0006")).unwrap(),
            dec!(0.001)
        );
    }
}
