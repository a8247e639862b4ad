//! # Constituent Phases
//!
//! Material phases that make up a unidirectional composite.
//!
//! ## Phase Types
//!
//! - **Isotropic**: E and v; G and K derived (glass fiber, epoxy matrix)
//! - **Transversely isotropic**: E1, E2, G12, G23, v12; K23 derived (carbon fiber)
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::materials::{IsotropicPhase, Phase, TranstropicPhase};
//!
//! let fiber: Phase = TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28).unwrap().into();
//! let matrix: Phase = IsotropicPhase::new("Epoxy", 2.8, 0.3).unwrap().into();
//!
//! // Unified constants, whatever the phase type
//! let m = matrix.elastic_constants();
//! assert_eq!(m.axial_shear_modulus, m.transverse_shear_modulus);
//! assert_eq!(fiber.elastic_constants().pstrain_bulk_modulus.to_string(), "17.023");
//! ```

pub mod info;
pub mod isotropic;
pub mod transtropic;

pub use info::{InfoValue, PhaseInfo};
pub use isotropic::{IsotropicPhase, ISOTROPIC_INFO_LABELS};
pub use transtropic::{TranstropicPhase, TRANSTROPIC_INFO_LABELS};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unified elastic constants for either phase type.
///
/// An isotropic phase maps onto the transversely isotropic set with
/// E1 = E2 = E, G12 = G23 = G, v12 = v and K23 = K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticConstants {
    /// Axial Young's modulus E1 (GPa)
    pub axial_youngs_modulus: Decimal,
    /// Transverse Young's modulus E2 (GPa)
    pub transverse_youngs_modulus: Decimal,
    /// Axial shear modulus G12 (GPa)
    pub axial_shear_modulus: Decimal,
    /// Transverse shear modulus G23 (GPa)
    pub transverse_shear_modulus: Decimal,
    /// Major Poisson's ratio v12
    pub major_poissons_ratio: Decimal,
    /// Plane-strain bulk modulus K23 (GPa)
    pub pstrain_bulk_modulus: Decimal,
}

/// Phase type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Isotropic,
    Transtropic,
}

impl PhaseKind {
    /// Short code used in export filenames ("iso" / "tra")
    pub fn code(&self) -> &'static str {
        match self {
            PhaseKind::Isotropic => "iso",
            PhaseKind::Transtropic => "tra",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PhaseKind::Isotropic => "Isotropic",
            PhaseKind::Transtropic => "Transversely Isotropic",
        }
    }
}

/// A fiber or matrix phase.
///
/// ## JSON Serialization
///
/// ```json
/// { "type": "Isotropic", "name": "Epoxy", "youngs_modulus": "2.800", ... }
/// { "type": "Transtropic", "name": "Carbon", "axial_youngs_modulus": "250.000", ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Phase {
    /// Isotropic phase
    Isotropic(IsotropicPhase),
    /// Transversely isotropic phase
    Transtropic(TranstropicPhase),
}

impl Phase {
    /// Constituent name
    pub fn name(&self) -> &str {
        match self {
            Phase::Isotropic(phase) => phase.name(),
            Phase::Transtropic(phase) => phase.name(),
        }
    }

    /// Phase type tag
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Isotropic(_) => PhaseKind::Isotropic,
            Phase::Transtropic(_) => PhaseKind::Transtropic,
        }
    }

    /// Info record (5 columns for isotropic, 7 for transversely isotropic)
    pub fn info(&self) -> PhaseInfo {
        match self {
            Phase::Isotropic(phase) => phase.info(),
            Phase::Transtropic(phase) => phase.info(),
        }
    }

    /// Elastic constants in the transversely isotropic layout
    pub fn elastic_constants(&self) -> ElasticConstants {
        match self {
            Phase::Isotropic(phase) => ElasticConstants {
                axial_youngs_modulus: phase.youngs_modulus(),
                transverse_youngs_modulus: phase.youngs_modulus(),
                axial_shear_modulus: phase.shear_modulus(),
                transverse_shear_modulus: phase.shear_modulus(),
                major_poissons_ratio: phase.poissons_ratio(),
                pstrain_bulk_modulus: phase.pstrain_bulk_modulus(),
            },
            Phase::Transtropic(phase) => ElasticConstants {
                axial_youngs_modulus: phase.axial_youngs_modulus(),
                transverse_youngs_modulus: phase.transverse_youngs_modulus(),
                axial_shear_modulus: phase.axial_shear_modulus(),
                transverse_shear_modulus: phase.transverse_shear_modulus(),
                major_poissons_ratio: phase.major_poissons_ratio(),
                pstrain_bulk_modulus: phase.pstrain_bulk_modulus(),
            },
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Isotropic(phase) => write!(f, "{}", phase),
            Phase::Transtropic(phase) => write!(f, "{}", phase),
        }
    }
}

impl From<IsotropicPhase> for Phase {
    fn from(phase: IsotropicPhase) -> Self {
        Phase::Isotropic(phase)
    }
}

impl From<TranstropicPhase> for Phase {
    fn from(phase: TranstropicPhase) -> Self {
        Phase::Transtropic(phase)
    }
}
