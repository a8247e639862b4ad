//! # Unidirectional Composite
//!
//! Pairs a fiber phase with a matrix phase. The composite stores no numbers of
//! its own; effective properties are computed on demand by
//! [`crate::calculations::effective`].
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::composite::UdComposite;
//! use micromech_core::materials::{IsotropicPhase, TranstropicPhase};
//!
//! let composite = UdComposite::new(
//!     TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28).unwrap(),
//!     IsotropicPhase::new("Epoxy", 2.8, 0.3).unwrap(),
//! );
//! assert_eq!(composite.label(), "Carbon-Epoxy");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};
use crate::materials::Phase;

/// Unidirectional fiber-reinforced composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UdComposite {
    fiber: Phase,
    matrix: Phase,
}

impl UdComposite {
    /// Combine a fiber and a matrix phase.
    pub fn new(fiber: impl Into<Phase>, matrix: impl Into<Phase>) -> Self {
        let composite = UdComposite {
            fiber: fiber.into(),
            matrix: matrix.into(),
        };
        tracing::debug!(label = %composite.label(), "composite created");
        composite
    }

    /// Combine phases that may not have been supplied yet.
    ///
    /// A missing phase is a type error, named after the missing argument.
    pub fn try_new(fiber: Option<Phase>, matrix: Option<Phase>) -> MechResult<Self> {
        let fiber = fiber.ok_or_else(|| {
            MechError::invalid_type(
                "fiber",
                "A fiber phase (isotropic or transversely isotropic) is required",
            )
        })?;
        let matrix = matrix.ok_or_else(|| {
            MechError::invalid_type(
                "matrix",
                "A matrix phase (isotropic or transversely isotropic) is required",
            )
        })?;
        Ok(UdComposite::new(fiber, matrix))
    }

    /// Fiber phase
    pub fn fiber(&self) -> &Phase {
        &self.fiber
    }

    /// Matrix phase
    pub fn matrix(&self) -> &Phase {
        &self.matrix
    }

    /// Combination label `"<fiber>-<matrix>"` used in reports and filenames
    pub fn label(&self) -> String {
        format!("{}-{}", self.fiber.name(), self.matrix.name())
    }
}

impl std::fmt::Display for UdComposite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (fiber: {}; matrix: {})", self.label(), self.fiber, self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::materials::{IsotropicPhase, PhaseKind, TranstropicPhase};

    fn carbon() -> Phase {
        TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28).unwrap().into()
    }

    fn epoxy() -> Phase {
        IsotropicPhase::new("Epoxy", 2.8, 0.3).unwrap().into()
    }

    #[test]
    fn test_label_keeps_fiber_matrix_order() {
        let composite = UdComposite::new(carbon(), epoxy());
        assert_eq!(composite.label(), "Carbon-Epoxy");
        assert_eq!(composite.fiber().kind(), PhaseKind::Transtropic);
        assert_eq!(composite.matrix().kind(), PhaseKind::Isotropic);

        let swapped = UdComposite::new(epoxy(), carbon());
        assert_eq!(swapped.label(), "Epoxy-Carbon");
    }

    #[test]
    fn test_missing_phase_is_type_error() {
        let err = UdComposite::try_new(None, Some(epoxy())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("fiber"));

        let err = UdComposite::try_new(Some(carbon()), None).unwrap_err();
        assert!(err.to_string().contains("matrix"));

        assert!(UdComposite::try_new(Some(carbon()), Some(epoxy())).is_ok());
    }

    #[test]
    fn test_composite_serialization() {
        let composite = UdComposite::new(carbon(), epoxy());
        let json = serde_json::to_string(&composite).unwrap();
        let parsed: UdComposite = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, composite);
    }
}
