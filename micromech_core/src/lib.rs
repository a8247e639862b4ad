//! # micromech_core - Micromechanics of Unidirectional Composites
//!
//! `micromech_core` computes the effective elastic moduli of a unidirectional
//! fiber-reinforced composite from its fiber and matrix phases, using the rule
//! of mixtures and Halpin-Tsai relations in exact decimal arithmetic.
//!
//! ## Design Philosophy
//!
//! - **Exact**: every constant is a base-10 `Decimal`, rounded once per value
//! - **Always consistent**: phases validate on construction and re-derive
//!   dependent moduli on every change
//! - **JSON-First**: phases, composites, tables and errors serialize with serde
//! - **No side effects**: the core never writes files; it returns records and
//!   suggested filenames
//!
//! ## Quick Start
//!
//! ```rust
//! use micromech_core::calculations::effective_properties_full;
//! use micromech_core::composite::UdComposite;
//! use micromech_core::materials::{IsotropicPhase, TranstropicPhase};
//!
//! let fiber = TranstropicPhase::new("Carbon", 250, 25, 20, 10, 0.28)?;
//! let matrix = IsotropicPhase::new("Epoxy", 2.8, 0.3)?;
//! let composite = UdComposite::new(fiber, matrix);
//!
//! let table = effective_properties_full(&composite)?;
//! assert_eq!(table.rows()[100].k23.to_string(), "17.023");
//!
//! let json = serde_json::to_string_pretty(&table)?;
//! # let _ = json;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Isotropic and transversely isotropic phases
//! - [`composite`] - Fiber/matrix pairing
//! - [`calculations`] - Effective-property engine and result table
//! - [`validation`] - Input format rules shared by constructors and setters
//! - [`units`] - Precision of each kind of quantity
//! - [`report`] - Console tables and plot series
//! - [`file_io`] - CSV input and export filenames
//! - [`settings`] - Session configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod composite;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod report;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use composite::UdComposite;
pub use errors::{ErrorKind, MechError, MechResult};
pub use materials::{IsotropicPhase, Phase, PhaseKind, TranstropicPhase};
pub use settings::Settings;
