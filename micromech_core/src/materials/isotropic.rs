//! Isotropic Phase
//!
//! A constituent described by Young's modulus E and Poisson's ratio v. The
//! shear modulus G and the plane-strain bulk modulus K are derived:
//!
//! ```text
//! G = E / (2 (1 + v))
//! K = E / (2 (1 + v) (1 - 2v))
//! ```
//!
//! The phase is always fully consistent: every setter re-validates its input
//! and re-derives G and K, and explicit G/K values are only accepted when they
//! equal the derived ones at 3 decimal places.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};
use crate::file_io;
use crate::materials::info::{InfoValue, PhaseInfo};
use crate::units::Quantity;
use crate::validation::{check_modulus, check_phase_ratio, check_rounded, validate_name, RawValue};

/// Column labels of the isotropic info record.
pub const ISOTROPIC_INFO_LABELS: [&str; 5] = [
    "Constituent",
    "Young's Modulus, E (GPa)",
    "Poisson's Ratio, v",
    "Shear Modulus, G (GPa)",
    "Plane-Strain Bulk Modulus, K (GPa)",
];

/// Shear modulus G = E / (2 (1 + v)), unrounded.
pub fn shear_modulus(youngs_modulus: Decimal, poissons_ratio: Decimal) -> MechResult<Decimal> {
    let denominator = Decimal::TWO * (Decimal::ONE + poissons_ratio);
    youngs_modulus.checked_div(denominator).ok_or_else(|| {
        MechError::invalid_value(
            "shear_modulus",
            youngs_modulus.to_string(),
            "Shear modulus is out of range for this Young's modulus",
        )
    })
}

/// Plane-strain bulk modulus K = E / (2 (1 + v) (1 - 2v)), unrounded.
///
/// Unbounded for an incompressible material (v = 0.5), which is reported as an
/// invalid Poisson's ratio.
pub fn pstrain_bulk_modulus(
    youngs_modulus: Decimal,
    poissons_ratio: Decimal,
) -> MechResult<Decimal> {
    let denominator = Decimal::TWO
        * (Decimal::ONE + poissons_ratio)
        * (Decimal::ONE - Decimal::TWO * poissons_ratio);
    if denominator <= Decimal::ZERO {
        return Err(MechError::invalid_value(
            "poissons_ratio",
            poissons_ratio.to_string(),
            "Plane-strain bulk modulus is unbounded for an incompressible phase (v = 0.5)",
        ));
    }
    youngs_modulus.checked_div(denominator).ok_or_else(|| {
        MechError::invalid_value(
            "pstrain_bulk_modulus",
            youngs_modulus.to_string(),
            "Plane-strain bulk modulus is out of range for this Young's modulus",
        )
    })
}

/// Isotropic constituent (fiber or matrix).
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Epoxy",
///   "youngs_modulus": "2.800",
///   "poissons_ratio": "0.300",
///   "shear_modulus": "1.077",
///   "pstrain_bulk_modulus": "2.692"
/// }
/// ```
///
/// Deserialization re-runs validation, so a stored G or K that disagrees with
/// E and v is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IsotropicPhaseInput")]
pub struct IsotropicPhase {
    name: String,
    youngs_modulus: Decimal,
    poissons_ratio: Decimal,
    shear_modulus: Decimal,
    pstrain_bulk_modulus: Decimal,
}

/// Unvalidated isotropic phase fields, as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct IsotropicPhaseInput {
    pub name: String,
    pub youngs_modulus: Decimal,
    pub poissons_ratio: Decimal,
    #[serde(default)]
    pub shear_modulus: Option<Decimal>,
    #[serde(default)]
    pub pstrain_bulk_modulus: Option<Decimal>,
}

impl TryFrom<IsotropicPhaseInput> for IsotropicPhase {
    type Error = MechError;

    fn try_from(input: IsotropicPhaseInput) -> MechResult<Self> {
        IsotropicPhase::with_overrides(
            &input.name,
            input.youngs_modulus,
            input.poissons_ratio,
            input.shear_modulus,
            input.pstrain_bulk_modulus,
        )
    }
}

impl IsotropicPhase {
    /// Create a phase from its name, Young's modulus (GPa) and Poisson's ratio.
    ///
    /// # Example
    ///
    /// ```rust
    /// use micromech_core::materials::IsotropicPhase;
    ///
    /// let epoxy = IsotropicPhase::new("Epoxy", 2.8, "0.3").unwrap();
    /// assert_eq!(epoxy.shear_modulus().to_string(), "1.077");
    /// assert_eq!(epoxy.pstrain_bulk_modulus().to_string(), "2.692");
    /// ```
    pub fn new(
        name: &str,
        youngs_modulus: impl Into<RawValue>,
        poissons_ratio: impl Into<RawValue>,
    ) -> MechResult<Self> {
        let name = validate_name(name)?;
        let youngs_modulus = check_modulus("youngs_modulus", &youngs_modulus.into())?;
        let poissons_ratio = check_phase_ratio("poissons_ratio", &poissons_ratio.into())?;
        let (shear_modulus, pstrain_bulk_modulus) = derive(youngs_modulus, poissons_ratio)?;

        tracing::debug!(
            %name, %youngs_modulus, %poissons_ratio, %shear_modulus, %pstrain_bulk_modulus,
            "isotropic phase derived"
        );

        Ok(IsotropicPhase {
            name,
            youngs_modulus,
            poissons_ratio,
            shear_modulus,
            pstrain_bulk_modulus,
        })
    }

    /// Create a phase with optional explicit G and K.
    ///
    /// Each supplied override must match the value derived from E and v.
    pub fn with_overrides(
        name: &str,
        youngs_modulus: impl Into<RawValue>,
        poissons_ratio: impl Into<RawValue>,
        shear_modulus: Option<impl Into<RawValue>>,
        pstrain_bulk_modulus: Option<impl Into<RawValue>>,
    ) -> MechResult<Self> {
        let mut phase = IsotropicPhase::new(name, youngs_modulus, poissons_ratio)?;
        if let Some(g) = shear_modulus {
            phase.set_shear_modulus(g)?;
        }
        if let Some(k) = pstrain_bulk_modulus {
            phase.set_pstrain_bulk_modulus(k)?;
        }
        Ok(phase)
    }

    /// Read every phase from a CSV file.
    ///
    /// Rows are `name, E, v` or the exported 5-column layout with G and K
    /// last; a leading header row starting with `Constituent` is skipped.
    pub fn read(path: &Path) -> MechResult<Vec<IsotropicPhase>> {
        let rows = file_io::read_csv_rows(path)?;
        rows.iter()
            .enumerate()
            .map(|(line, row)| match row.as_slice() {
                [name, e, v] => IsotropicPhase::new(name, e, v),
                [name, e, v, g, k] => {
                    IsotropicPhase::with_overrides(name, e, v, Some(g), Some(k))
                }
                _ => Err(MechError::invalid_type(
                    format!("{} row {}", path.display(), line + 1),
                    format!(
                        "Isotropic rows need 3 or 5 columns (name, E, v[, G, K]), found {}",
                        row.len()
                    ),
                )),
            })
            .collect()
    }

    /// Constituent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Young's modulus E (GPa)
    pub fn youngs_modulus(&self) -> Decimal {
        self.youngs_modulus
    }

    /// Poisson's ratio v
    pub fn poissons_ratio(&self) -> Decimal {
        self.poissons_ratio
    }

    /// Shear modulus G (GPa)
    pub fn shear_modulus(&self) -> Decimal {
        self.shear_modulus
    }

    /// Plane-strain bulk modulus K (GPa)
    pub fn pstrain_bulk_modulus(&self) -> Decimal {
        self.pstrain_bulk_modulus
    }

    /// Rename the phase.
    pub fn set_name(&mut self, name: &str) -> MechResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Set E and re-derive G and K.
    pub fn set_youngs_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let youngs_modulus = check_modulus("youngs_modulus", &value.into())?;
        let (g, k) = derive(youngs_modulus, self.poissons_ratio)?;
        self.youngs_modulus = youngs_modulus;
        self.shear_modulus = g;
        self.pstrain_bulk_modulus = k;
        Ok(())
    }

    /// Set v and re-derive G and K.
    pub fn set_poissons_ratio(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let poissons_ratio = check_phase_ratio("poissons_ratio", &value.into())?;
        let (g, k) = derive(self.youngs_modulus, poissons_ratio)?;
        self.poissons_ratio = poissons_ratio;
        self.shear_modulus = g;
        self.pstrain_bulk_modulus = k;
        Ok(())
    }

    /// Explicitly set G. Accepted only if it equals the derived value.
    pub fn set_shear_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let supplied = check_modulus("shear_modulus", &value.into())?;
        let expected = self.derived_shear_modulus()?;
        check_override("shear_modulus", &self.name, supplied, expected)?;
        self.shear_modulus = expected;
        Ok(())
    }

    /// Explicitly set K. Accepted only if it equals the derived value.
    pub fn set_pstrain_bulk_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let supplied = check_modulus("pstrain_bulk_modulus", &value.into())?;
        let expected = self.derived_pstrain_bulk_modulus()?;
        check_override("pstrain_bulk_modulus", &self.name, supplied, expected)?;
        self.pstrain_bulk_modulus = expected;
        Ok(())
    }

    /// G from the current E and v, rounded to 3 places.
    pub fn derived_shear_modulus(&self) -> MechResult<Decimal> {
        derive(self.youngs_modulus, self.poissons_ratio).map(|(g, _)| g)
    }

    /// K from the current E and v, rounded to 3 places.
    pub fn derived_pstrain_bulk_modulus(&self) -> MechResult<Decimal> {
        derive(self.youngs_modulus, self.poissons_ratio).map(|(_, k)| k)
    }

    /// Info record (5 columns) for tables and CSV export.
    pub fn info(&self) -> PhaseInfo {
        PhaseInfo::new(vec![
            (ISOTROPIC_INFO_LABELS[0], InfoValue::Text(self.name.clone())),
            (ISOTROPIC_INFO_LABELS[1], InfoValue::Number(self.youngs_modulus)),
            (ISOTROPIC_INFO_LABELS[2], InfoValue::Number(self.poissons_ratio)),
            (ISOTROPIC_INFO_LABELS[3], InfoValue::Number(self.shear_modulus)),
            (ISOTROPIC_INFO_LABELS[4], InfoValue::Number(self.pstrain_bulk_modulus)),
        ])
    }
}

impl std::fmt::Display for IsotropicPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (isotropic: E = {} GPa, v = {})",
            self.name, self.youngs_modulus, self.poissons_ratio
        )
    }
}

/// G and K from E and v, each rounded to 3 places and still positive.
fn derive(youngs_modulus: Decimal, poissons_ratio: Decimal) -> MechResult<(Decimal, Decimal)> {
    let g = shear_modulus(youngs_modulus, poissons_ratio)?;
    let k = pstrain_bulk_modulus(youngs_modulus, poissons_ratio)?;
    Ok((
        check_rounded("shear_modulus", g, Quantity::Modulus)?,
        check_rounded("pstrain_bulk_modulus", k, Quantity::Modulus)?,
    ))
}

/// Reject an explicit value that differs from its derived counterpart.
pub(crate) fn check_override(
    field: &str,
    phase: &str,
    supplied: Decimal,
    expected: Decimal,
) -> MechResult<()> {
    if supplied != expected {
        tracing::warn!(%phase, field, %supplied, %expected, "override rejected");
        return Err(MechError::invalid_value(
            field,
            supplied.to_string(),
            format!("Value does not match the derived value {}", expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rust_decimal_macros::dec;

    fn epoxy() -> IsotropicPhase {
        IsotropicPhase::new("Epoxy", 2.8, 0.3).unwrap()
    }

    #[test]
    fn test_derived_moduli() {
        let phase = epoxy();
        assert_eq!(phase.youngs_modulus(), dec!(2.800));
        assert_eq!(phase.poissons_ratio(), dec!(0.300));
        assert_eq!(phase.shear_modulus(), dec!(1.077));
        assert_eq!(phase.pstrain_bulk_modulus(), dec!(2.692));
    }

    #[test]
    fn test_derivation_matches_formulas() {
        let cases = [
            (dec!(2.8), dec!(0.3)),
            (dec!(72), dec!(0.22)),
            (dec!(3.5), dec!(0.35)),
            (dec!(0.5), dec!(0.001)),
            (dec!(410), dec!(0.49)),
        ];
        for (e, v) in cases {
            let phase = IsotropicPhase::new("Sample", e, v).unwrap();
            let expected_g = Quantity::Modulus.quantize(e / (dec!(2) * (dec!(1) + v)));
            let expected_k =
                Quantity::Modulus.quantize(e / (dec!(2) * (dec!(1) + v) * (dec!(1) - dec!(2) * v)));
            assert_eq!(phase.shear_modulus(), expected_g, "E = {}, v = {}", e, v);
            assert_eq!(phase.pstrain_bulk_modulus(), expected_k, "E = {}, v = {}", e, v);
        }
    }

    #[test]
    fn test_setters_rederive() {
        let mut phase = epoxy();
        phase.set_youngs_modulus("3.5").unwrap();
        assert_eq!(phase.shear_modulus(), dec!(1.346));
        phase.set_poissons_ratio(dec!(0.35)).unwrap();
        assert_eq!(phase.shear_modulus(), dec!(1.296));
        assert_eq!(phase.pstrain_bulk_modulus(), dec!(4.321));
    }

    #[test]
    fn test_failed_setter_leaves_phase_unchanged() {
        let mut phase = epoxy();
        let before = phase.clone();
        assert!(phase.set_youngs_modulus("-1").is_err());
        assert!(phase.set_poissons_ratio("0.6").is_err());
        assert!(phase.set_name("bad name").is_err());
        assert_eq!(phase, before);
    }

    #[test]
    fn test_incompressible_ratio_rejected() {
        let err = IsotropicPhase::new("Rubber", 0.01, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let mut phase = epoxy();
        assert!(phase.set_poissons_ratio("0.5").is_err());
        assert_eq!(phase.poissons_ratio(), dec!(0.3));
    }

    #[test]
    fn test_matching_overrides_accepted() {
        let phase =
            IsotropicPhase::with_overrides("Epoxy", "2.8", "0.3", Some("1.077"), Some("2.692"))
                .unwrap();
        assert_eq!(phase, epoxy());

        let mut phase = epoxy();
        phase.set_shear_modulus(dec!(1.0770)).unwrap();
        phase.set_pstrain_bulk_modulus("2.692").unwrap();
    }

    #[test]
    fn test_mismatched_overrides_rejected() {
        let mut phase = epoxy();
        for wrong in ["1.076", "1.078", "1", "2.692"] {
            let err = phase.set_shear_modulus(wrong).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "G = {}", wrong);
        }
        assert!(phase.set_pstrain_bulk_modulus("2.7").is_err());
        assert!(phase.set_shear_modulus("abc").is_err());
        assert_eq!(phase.shear_modulus(), dec!(1.077));

        let missing: Option<&str> = None;
        assert!(IsotropicPhase::with_overrides("Epoxy", 2.8, 0.3, Some("1.2"), missing).is_err());
    }

    #[test]
    fn test_values_rounding_to_zero_rejected() {
        let err = IsotropicPhase::new("Soft", "0.0004", "0.3").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert!(err.to_string().contains("youngs_modulus"));

        let err = IsotropicPhase::new("Lowv", "2.8", "0.0004").unwrap_err();
        assert!(err.to_string().contains("poissons_ratio"));

        // E survives rounding but G = 0.001 / 2.6 does not
        let err = IsotropicPhase::new("Film", "0.001", "0.3").unwrap_err();
        assert!(err.to_string().contains("shear_modulus"));

        let mut phase = epoxy();
        let before = phase.clone();
        assert!(phase.set_youngs_modulus("0.0004").is_err());
        assert!(phase.set_poissons_ratio("0.0004").is_err());
        let err = phase.set_shear_modulus("0.0004").unwrap_err();
        assert!(err.to_string().contains("rounds to zero"));
        let err = phase.set_pstrain_bulk_modulus("0.0004").unwrap_err();
        assert!(err.to_string().contains("rounds to zero"));
        assert_eq!(phase, before);
    }

    #[test]
    fn test_name_is_trimmed_and_validated() {
        let phase = IsotropicPhase::new("  Fiberglass ", 72, 0.22).unwrap();
        assert_eq!(phase.name(), "Fiberglass");
        assert!(IsotropicPhase::new("Fiber Glass", 72, 0.22).is_err());
        assert!(IsotropicPhase::new("IM7*", 72, 0.22).is_err());
        assert!(IsotropicPhase::new("", 72, 0.22).is_err());
    }

    #[test]
    fn test_info_record() {
        let info = epoxy().info();
        assert_eq!(info.labels(), ISOTROPIC_INFO_LABELS.to_vec());
        assert_eq!(info.get("Constituent"), Some(&InfoValue::Text("Epoxy".to_string())));
        assert_eq!(
            info.get("Shear Modulus, G (GPa)"),
            Some(&InfoValue::Number(dec!(1.077)))
        );
        assert_eq!(
            info.get("Plane-Strain Bulk Modulus, K (GPa)"),
            Some(&InfoValue::Number(dec!(2.692)))
        );
    }

    #[test]
    fn test_debug_shows_all_fields() {
        let text = format!("{:?}", epoxy());
        assert!(text.contains("IsotropicPhase"));
        assert!(text.contains("\"Epoxy\""));
        assert!(text.contains("youngs_modulus: 2.800"));
        assert!(text.contains("poissons_ratio: 0.300"));
        assert!(text.contains("shear_modulus: 1.077"));
        assert!(text.contains("pstrain_bulk_modulus: 2.692"));
    }

    #[test]
    fn test_serialization_revalidates() {
        let phase = epoxy();
        let json = serde_json::to_string(&phase).unwrap();
        assert!(json.contains("\"shear_modulus\":\"1.077\""));
        let roundtrip: IsotropicPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, phase);

        let tampered = json.replace("1.077", "1.5");
        assert!(serde_json::from_str::<IsotropicPhase>(&tampered).is_err());
    }

    #[test]
    fn test_read_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrices.csv");
        std::fs::write(
            &path,
            "Constituent,E,v\nEpoxy,2.8,0.3\nVinylester,3.4,0.35\nPolyester,3.0,0.3,1.154,2.885\n",
        )
        .unwrap();
        let phases = IsotropicPhase::read(&path).unwrap();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0], epoxy());
        assert_eq!(phases[1].name(), "Vinylester");
        assert_eq!(phases[2].shear_modulus(), dec!(1.154));
    }

    #[test]
    fn test_read_csv_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");

        std::fs::write(&path, "Epoxy,2.8\n").unwrap();
        assert_eq!(IsotropicPhase::read(&path).unwrap_err().kind(), ErrorKind::Type);

        std::fs::write(&path, "Epoxy,2.8,0.6\n").unwrap();
        assert_eq!(IsotropicPhase::read(&path).unwrap_err().kind(), ErrorKind::Value);

        let missing = dir.path().join("missing.csv");
        assert_eq!(IsotropicPhase::read(&missing).unwrap_err().kind(), ErrorKind::NotFound);
    }
}
