//! Transversely Isotropic Phase
//!
//! A constituent with an axis of symmetry along the fiber direction (carbon,
//! aramid). Five independent constants are supplied: E1, E2, G12, G23 and the
//! major Poisson's ratio v12. The plane-strain bulk modulus in the transverse
//! plane is derived:
//!
//! ```text
//! 1 / K23 = 4 / E2 - 1 / G23 - 4 v12² / E1
//! ```
//!
//! which is the same relation as `K23 = E2 / (2 (1 - v23 - 2 v12² E2 / E1))`
//! with `v23 = E2 / (2 G23) - 1`.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};
use crate::file_io;
use crate::materials::info::{InfoValue, PhaseInfo};
use crate::materials::isotropic::check_override;
use crate::units::Quantity;
use crate::validation::{check_modulus, check_phase_ratio, check_rounded, validate_name, RawValue};

/// Column labels of the transversely isotropic info record.
pub const TRANSTROPIC_INFO_LABELS: [&str; 7] = [
    "Constituent",
    "Axial Young's Modulus, E1 (GPa)",
    "Transverse Young's Modulus, E2 (GPa)",
    "Axial Shear Modulus, G12 (GPa)",
    "Transverse Shear Modulus, G23 (GPa)",
    "Major Poisson's Ratio, v12",
    "Plane-Strain Bulk Modulus, K23 (GPa)",
];

/// Plane-strain bulk modulus K23, unrounded.
///
/// Evaluated as `E1 E2 G23 / (4 E1 G23 - E1 E2 - 4 v12² E2 G23)` to keep a
/// single division. Inputs for which the denominator is not positive do not
/// describe a stable material and are rejected.
pub fn pstrain_bulk_modulus(
    axial_youngs_modulus: Decimal,
    transverse_youngs_modulus: Decimal,
    transverse_shear_modulus: Decimal,
    major_poissons_ratio: Decimal,
) -> MechResult<Decimal> {
    let (e1, e2, g23, v12) = (
        axial_youngs_modulus,
        transverse_youngs_modulus,
        transverse_shear_modulus,
        major_poissons_ratio,
    );
    let out_of_range = || {
        MechError::invalid_value(
            "pstrain_bulk_modulus",
            format!("E1 = {}, E2 = {}, G23 = {}, v12 = {}", e1, e2, g23, v12),
            "Plane-strain bulk modulus is out of range for these constants",
        )
    };

    let numerator = e1
        .checked_mul(e2)
        .and_then(|p| p.checked_mul(g23))
        .ok_or_else(out_of_range)?;
    let denominator = Decimal::from(4)
        .checked_mul(e1)
        .and_then(|p| p.checked_mul(g23))
        .and_then(|p| p.checked_sub(e1.checked_mul(e2)?))
        .and_then(|p| {
            p.checked_sub(
                Decimal::from(4)
                    .checked_mul(v12 * v12)?
                    .checked_mul(e2)?
                    .checked_mul(g23)?,
            )
        })
        .ok_or_else(out_of_range)?;

    if denominator <= Decimal::ZERO {
        return Err(MechError::invalid_value(
            "transverse_shear_modulus",
            g23.to_string(),
            "Constants give a non-positive plane-strain bulk modulus (G23 too small for E2)",
        ));
    }
    numerator.checked_div(denominator).ok_or_else(out_of_range)
}

/// Transversely isotropic constituent (typically a fiber).
///
/// Deserialization re-runs validation, so a stored K23 that disagrees with the
/// other constants is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TranstropicPhaseInput")]
pub struct TranstropicPhase {
    name: String,
    axial_youngs_modulus: Decimal,
    transverse_youngs_modulus: Decimal,
    axial_shear_modulus: Decimal,
    transverse_shear_modulus: Decimal,
    major_poissons_ratio: Decimal,
    pstrain_bulk_modulus: Decimal,
}

/// Unvalidated transversely isotropic phase fields, as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct TranstropicPhaseInput {
    pub name: String,
    pub axial_youngs_modulus: Decimal,
    pub transverse_youngs_modulus: Decimal,
    pub axial_shear_modulus: Decimal,
    pub transverse_shear_modulus: Decimal,
    pub major_poissons_ratio: Decimal,
    #[serde(default)]
    pub pstrain_bulk_modulus: Option<Decimal>,
}

impl TryFrom<TranstropicPhaseInput> for TranstropicPhase {
    type Error = MechError;

    fn try_from(input: TranstropicPhaseInput) -> MechResult<Self> {
        let mut phase = TranstropicPhase::new(
            &input.name,
            input.axial_youngs_modulus,
            input.transverse_youngs_modulus,
            input.axial_shear_modulus,
            input.transverse_shear_modulus,
            input.major_poissons_ratio,
        )?;
        if let Some(k23) = input.pstrain_bulk_modulus {
            phase.set_pstrain_bulk_modulus(k23)?;
        }
        Ok(phase)
    }
}

impl TranstropicPhase {
    /// Create a phase from its five independent constants.
    ///
    /// # Example
    ///
    /// ```rust
    /// use micromech_core::materials::TranstropicPhase;
    ///
    /// let carbon = TranstropicPhase::new("Carbon", 250, 25, 20, 10, "0.28").unwrap();
    /// assert_eq!(carbon.pstrain_bulk_modulus().to_string(), "17.023");
    /// ```
    pub fn new(
        name: &str,
        axial_youngs_modulus: impl Into<RawValue>,
        transverse_youngs_modulus: impl Into<RawValue>,
        axial_shear_modulus: impl Into<RawValue>,
        transverse_shear_modulus: impl Into<RawValue>,
        major_poissons_ratio: impl Into<RawValue>,
    ) -> MechResult<Self> {
        let mut phase = TranstropicPhase {
            name: validate_name(name)?,
            axial_youngs_modulus: check_modulus(
                "axial_youngs_modulus",
                &axial_youngs_modulus.into(),
            )?,
            transverse_youngs_modulus: check_modulus(
                "transverse_youngs_modulus",
                &transverse_youngs_modulus.into(),
            )?,
            axial_shear_modulus: check_modulus(
                "axial_shear_modulus",
                &axial_shear_modulus.into(),
            )?,
            transverse_shear_modulus: check_modulus(
                "transverse_shear_modulus",
                &transverse_shear_modulus.into(),
            )?,
            major_poissons_ratio: check_phase_ratio(
                "major_poissons_ratio",
                &major_poissons_ratio.into(),
            )?,
            pstrain_bulk_modulus: Decimal::ZERO,
        };
        phase.pstrain_bulk_modulus = phase.derived_pstrain_bulk_modulus()?;

        tracing::debug!(
            name = %phase.name,
            k23 = %phase.pstrain_bulk_modulus,
            "transversely isotropic phase derived"
        );
        Ok(phase)
    }

    /// Create a phase with an optional explicit K23 that must match the
    /// derived value.
    pub fn with_override(
        name: &str,
        axial_youngs_modulus: impl Into<RawValue>,
        transverse_youngs_modulus: impl Into<RawValue>,
        axial_shear_modulus: impl Into<RawValue>,
        transverse_shear_modulus: impl Into<RawValue>,
        major_poissons_ratio: impl Into<RawValue>,
        pstrain_bulk_modulus: Option<impl Into<RawValue>>,
    ) -> MechResult<Self> {
        let mut phase = TranstropicPhase::new(
            name,
            axial_youngs_modulus,
            transverse_youngs_modulus,
            axial_shear_modulus,
            transverse_shear_modulus,
            major_poissons_ratio,
        )?;
        if let Some(k23) = pstrain_bulk_modulus {
            phase.set_pstrain_bulk_modulus(k23)?;
        }
        Ok(phase)
    }

    /// Read every phase from a CSV file.
    ///
    /// Rows are `name, E1, E2, G12, G23, v12` or the exported 7-column layout
    /// with K23 last; a leading header row starting with `Constituent` is
    /// skipped.
    pub fn read(path: &Path) -> MechResult<Vec<TranstropicPhase>> {
        let rows = file_io::read_csv_rows(path)?;
        rows.iter()
            .enumerate()
            .map(|(line, row)| match row.as_slice() {
                [name, e1, e2, g12, g23, v12] => TranstropicPhase::new(name, e1, e2, g12, g23, v12),
                [name, e1, e2, g12, g23, v12, k23] => {
                    TranstropicPhase::with_override(name, e1, e2, g12, g23, v12, Some(k23))
                }
                _ => Err(MechError::invalid_type(
                    format!("{} row {}", path.display(), line + 1),
                    format!(
                        "Transversely isotropic rows need 6 or 7 columns \
                         (name, E1, E2, G12, G23, v12[, K23]), found {}",
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

    /// Axial Young's modulus E1 (GPa)
    pub fn axial_youngs_modulus(&self) -> Decimal {
        self.axial_youngs_modulus
    }

    /// Transverse Young's modulus E2 (GPa)
    pub fn transverse_youngs_modulus(&self) -> Decimal {
        self.transverse_youngs_modulus
    }

    /// Axial shear modulus G12 (GPa)
    pub fn axial_shear_modulus(&self) -> Decimal {
        self.axial_shear_modulus
    }

    /// Transverse shear modulus G23 (GPa)
    pub fn transverse_shear_modulus(&self) -> Decimal {
        self.transverse_shear_modulus
    }

    /// Major Poisson's ratio v12
    pub fn major_poissons_ratio(&self) -> Decimal {
        self.major_poissons_ratio
    }

    /// Plane-strain bulk modulus K23 (GPa)
    pub fn pstrain_bulk_modulus(&self) -> Decimal {
        self.pstrain_bulk_modulus
    }

    /// Rename the phase.
    pub fn set_name(&mut self, name: &str) -> MechResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Set E1 and re-derive K23.
    pub fn set_axial_youngs_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let e1 = check_modulus("axial_youngs_modulus", &value.into())?;
        self.update(|phase| phase.axial_youngs_modulus = e1)
    }

    /// Set E2 and re-derive K23.
    pub fn set_transverse_youngs_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let e2 = check_modulus("transverse_youngs_modulus", &value.into())?;
        self.update(|phase| phase.transverse_youngs_modulus = e2)
    }

    /// Set G12. K23 does not depend on it.
    pub fn set_axial_shear_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        self.axial_shear_modulus = check_modulus("axial_shear_modulus", &value.into())?;
        Ok(())
    }

    /// Set G23 and re-derive K23.
    pub fn set_transverse_shear_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let g23 = check_modulus("transverse_shear_modulus", &value.into())?;
        self.update(|phase| phase.transverse_shear_modulus = g23)
    }

    /// Set v12 and re-derive K23.
    pub fn set_major_poissons_ratio(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let v12 = check_phase_ratio("major_poissons_ratio", &value.into())?;
        self.update(|phase| phase.major_poissons_ratio = v12)
    }

    /// Explicitly set K23. Accepted only if it equals the derived value.
    pub fn set_pstrain_bulk_modulus(&mut self, value: impl Into<RawValue>) -> MechResult<()> {
        let supplied = check_modulus("pstrain_bulk_modulus", &value.into())?;
        let expected = self.derived_pstrain_bulk_modulus()?;
        check_override("pstrain_bulk_modulus", &self.name, supplied, expected)?;
        self.pstrain_bulk_modulus = expected;
        Ok(())
    }

    /// K23 from the current constants, rounded to 3 places and still positive.
    pub fn derived_pstrain_bulk_modulus(&self) -> MechResult<Decimal> {
        let k23 = pstrain_bulk_modulus(
            self.axial_youngs_modulus,
            self.transverse_youngs_modulus,
            self.transverse_shear_modulus,
            self.major_poissons_ratio,
        )?;
        check_rounded("pstrain_bulk_modulus", k23, Quantity::Modulus)
    }

    /// Info record (7 columns) for tables and CSV export.
    pub fn info(&self) -> PhaseInfo {
        PhaseInfo::new(vec![
            (TRANSTROPIC_INFO_LABELS[0], InfoValue::Text(self.name.clone())),
            (TRANSTROPIC_INFO_LABELS[1], InfoValue::Number(self.axial_youngs_modulus)),
            (TRANSTROPIC_INFO_LABELS[2], InfoValue::Number(self.transverse_youngs_modulus)),
            (TRANSTROPIC_INFO_LABELS[3], InfoValue::Number(self.axial_shear_modulus)),
            (TRANSTROPIC_INFO_LABELS[4], InfoValue::Number(self.transverse_shear_modulus)),
            (TRANSTROPIC_INFO_LABELS[5], InfoValue::Number(self.major_poissons_ratio)),
            (TRANSTROPIC_INFO_LABELS[6], InfoValue::Number(self.pstrain_bulk_modulus)),
        ])
    }

    /// Apply a change to a copy, re-derive K23 and commit only on success.
    fn update(&mut self, change: impl FnOnce(&mut TranstropicPhase)) -> MechResult<()> {
        let mut candidate = self.clone();
        change(&mut candidate);
        candidate.pstrain_bulk_modulus = candidate.derived_pstrain_bulk_modulus()?;
        *self = candidate;
        Ok(())
    }
}

impl std::fmt::Display for TranstropicPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (transversely isotropic: E1 = {} GPa, E2 = {} GPa, v12 = {})",
            self.name,
            self.axial_youngs_modulus,
            self.transverse_youngs_modulus,
            self.major_poissons_ratio
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rust_decimal_macros::dec;

    fn carbon() -> TranstropicPhase {
        TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28).unwrap()
    }

    #[test]
    fn test_reference_k23() {
        let phase = carbon();
        assert_eq!(phase.pstrain_bulk_modulus(), dec!(17.023));
        assert_eq!(phase.axial_youngs_modulus().to_string(), "250.000");
        assert_eq!(phase.major_poissons_ratio().to_string(), "0.280");
    }

    #[test]
    fn test_k23_matches_v23_form() {
        let (e1, e2, g23, v12) = (dec!(230), dec!(15), dec!(5.5), dec!(0.2));
        let phase = TranstropicPhase::new("T300", e1, e2, dec!(15), g23, v12).unwrap();
        let v23 = e2 / (dec!(2) * g23) - dec!(1);
        let expected = e2 / (dec!(2) * (dec!(1) - v23 - dec!(2) * v12 * v12 * e2 / e1));
        assert_eq!(phase.pstrain_bulk_modulus(), Quantity::Modulus.quantize(expected));
    }

    #[test]
    fn test_setters_rederive_k23() {
        let mut phase = carbon();
        phase.set_transverse_shear_modulus("8").unwrap();
        // 50000 / (8000 - 6250 - 62.72)
        assert_eq!(phase.pstrain_bulk_modulus(), dec!(29.633));

        phase.set_axial_shear_modulus(30).unwrap();
        assert_eq!(phase.pstrain_bulk_modulus(), dec!(29.633));
        assert_eq!(phase.axial_shear_modulus(), dec!(30));
    }

    #[test]
    fn test_unstable_constants_rejected() {
        // 4 E1 G23 <= E1 E2 whenever G23 <= E2 / 4
        let err = TranstropicPhase::new("Odd", 250, 25, 20, 5, 0.28).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let mut phase = carbon();
        let before = phase.clone();
        assert!(phase.set_transverse_shear_modulus(6).is_err());
        assert_eq!(phase, before);
    }

    #[test]
    fn test_k23_override() {
        let phase =
            TranstropicPhase::with_override("Carbon", 250, 25, 20, 10, 0.28, Some("17.023"))
                .unwrap();
        assert_eq!(phase, carbon());

        let err = TranstropicPhase::with_override("Carbon", 250, 25, 20, 10, 0.28, Some("17.02"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);

        let mut phase = carbon();
        assert!(phase.set_pstrain_bulk_modulus(dec!(17.0226)).is_ok());
        assert!(phase.set_pstrain_bulk_modulus("17.1").is_err());
    }

    #[test]
    fn test_field_validation() {
        assert!(TranstropicPhase::new("Carbon", "250 000", 25, 20, 10, 0.28).is_err());
        assert!(TranstropicPhase::new("Carbon", 250, 0, 20, 10, 0.28).is_err());
        assert!(TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.51).is_err());
        assert!(TranstropicPhase::new("Car bon", 250, 25, 20, 10, 0.28).is_err());
    }

    #[test]
    fn test_values_rounding_to_zero_rejected() {
        let build = |e1: &str, e2: &str, g12: &str, g23: &str, v12: &str| {
            TranstropicPhase::new("Carbon", e1, e2, g12, g23, v12)
        };
        let cases = [
            ("axial_youngs_modulus", build("0.0004", "25", "20", "10", "0.28")),
            ("transverse_youngs_modulus", build("250", "0.0004", "20", "10", "0.28")),
            ("axial_shear_modulus", build("250", "25", "0.0004", "10", "0.28")),
            ("transverse_shear_modulus", build("250", "25", "20", "0.0004", "0.28")),
            ("major_poissons_ratio", build("250", "25", "20", "10", "0.0004")),
        ];
        for (field, result) in cases {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "{}", field);
            assert!(err.to_string().contains(field), "{}", err);
            assert!(err.to_string().contains("rounds to zero"), "{}", err);
        }

        let mut phase = carbon();
        let before = phase.clone();
        assert!(phase.set_axial_youngs_modulus("0.0004").is_err());
        assert!(phase.set_transverse_youngs_modulus("0.0004").is_err());
        assert!(phase.set_axial_shear_modulus("0.0004").is_err());
        assert!(phase.set_transverse_shear_modulus("0.0004").is_err());
        assert!(phase.set_major_poissons_ratio("0.0004").is_err());
        let err = phase.set_pstrain_bulk_modulus("0.0004").unwrap_err();
        assert!(err.to_string().contains("rounds to zero"));
        assert_eq!(phase, before);
    }

    #[test]
    fn test_info_record() {
        let info = carbon().info();
        assert_eq!(info.labels(), TRANSTROPIC_INFO_LABELS.to_vec());
        assert_eq!(
            info.get("Plane-Strain Bulk Modulus, K23 (GPa)"),
            Some(&InfoValue::Number(dec!(17.023)))
        );
    }

    #[test]
    fn test_serialization_revalidates() {
        let phase = carbon();
        let json = serde_json::to_string(&phase).unwrap();
        let roundtrip: TranstropicPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, phase);

        let tampered = json.replace("17.023", "18.000");
        assert!(serde_json::from_str::<TranstropicPhase>(&tampered).is_err());
    }

    #[test]
    fn test_read_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fibers.csv");
        std::fs::write(&path, "Carbon,250,25,20,10,0.28\nCarbon2,250,25,20,10,0.28,17.023\n")
            .unwrap();
        let phases = TranstropicPhase::read(&path).unwrap();
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0], carbon());
        assert_eq!(phases[1].pstrain_bulk_modulus(), dec!(17.023));

        std::fs::write(&path, "Carbon,250,25,20,10,0.28,17.5\n").unwrap();
        assert_eq!(TranstropicPhase::read(&path).unwrap_err().kind(), ErrorKind::Value);

        std::fs::write(&path, "Carbon,250,25\n").unwrap();
        assert_eq!(TranstropicPhase::read(&path).unwrap_err().kind(), ErrorKind::Type);
    }
}
