//! Interactive acquisition of the fiber and matrix phases.
//!
//! Every answer goes through the same validators as the core constructors and
//! setters; a rejected answer is reported and asked again.

use std::io::{self, BufRead, Write};
use std::path::Path;

use micromech_core::file_io::PhaseRole;
use micromech_core::validation::{validate_name, validate_positive_decimal, validate_ratio};
use micromech_core::{IsotropicPhase, MechError, MechResult, Phase, PhaseKind, TranstropicPhase};

use crate::prompt::Prompter;

/// Where the phase properties come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Manual,
    Csv,
}

/// Parse a phase type answer (`iso` / `tra`).
pub fn parse_kind(answer: &str) -> MechResult<PhaseKind> {
    match answer.to_ascii_lowercase().as_str() {
        "iso" | "i" | "isotropic" => Ok(PhaseKind::Isotropic),
        "tra" | "t" | "transtropic" => Ok(PhaseKind::Transtropic),
        _ => Err(MechError::invalid_value(
            "phase type",
            answer,
            "Enter 'iso' (isotropic) or 'tra' (transversely isotropic)",
        )),
    }
}

/// Parse a source answer (`m` / `c`).
pub fn parse_source(answer: &str) -> MechResult<Source> {
    match answer.to_ascii_lowercase().as_str() {
        "m" | "manual" => Ok(Source::Manual),
        "c" | "csv" => Ok(Source::Csv),
        _ => Err(MechError::invalid_value(
            "source",
            answer,
            "Enter 'm' (manual entry) or 'c' (CSV file)",
        )),
    }
}

/// Ask for the type and source of a phase, then its properties.
pub fn acquire_phase<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    role: PhaseRole,
) -> io::Result<Phase> {
    prompter.say(&format!("\n--- {} ---", role.as_str().to_uppercase()))?;
    let kind = prompter.ask_until(
        &format!("Is the {} isotropic or transversely isotropic? [iso/tra]: ", role),
        parse_kind,
    )?;
    let source = prompter.ask_until(
        "Enter properties manually or read a CSV file? [m/c]: ",
        parse_source,
    )?;

    let phase: Phase = match (kind, source) {
        (PhaseKind::Isotropic, Source::Manual) => manual_isotropic(prompter, role)?.into(),
        (PhaseKind::Transtropic, Source::Manual) => manual_transtropic(prompter, role)?.into(),
        (PhaseKind::Isotropic, Source::Csv) => prompter
            .ask_until("CSV file path: ", |path| {
                first_row(IsotropicPhase::read(Path::new(path))?, path)
            })?
            .into(),
        (PhaseKind::Transtropic, Source::Csv) => prompter
            .ask_until("CSV file path: ", |path| {
                first_row(TranstropicPhase::read(Path::new(path))?, path)
            })?
            .into(),
    };

    tracing::info!(role = %role, name = phase.name(), kind = phase.kind().code(), "phase acquired");
    Ok(phase)
}

/// Name, E and v; the whole set is asked again if the combination is rejected.
fn manual_isotropic<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    role: PhaseRole,
) -> io::Result<IsotropicPhase> {
    loop {
        let name = prompter.ask_until("Constituent name: ", validate_name)?;
        let e = prompter.ask_until("Young's modulus, E (GPa): ", |s| validate_positive_decimal(s))?;
        let v = prompter.ask_until("Poisson's ratio, v: ", |s| validate_ratio(s))?;
        match IsotropicPhase::new(&name, e, v) {
            Ok(phase) => return Ok(phase),
            Err(err) => rejected(prompter, role, &err)?,
        }
    }
}

/// Name, E1, E2, G12, G23 and v12; asked again as a set if K23 cannot be derived.
fn manual_transtropic<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    role: PhaseRole,
) -> io::Result<TranstropicPhase> {
    loop {
        let name = prompter.ask_until("Constituent name: ", validate_name)?;
        let e1 = prompter.ask_until("Axial Young's modulus, E1 (GPa): ", |s| {
            validate_positive_decimal(s)
        })?;
        let e2 = prompter.ask_until("Transverse Young's modulus, E2 (GPa): ", |s| {
            validate_positive_decimal(s)
        })?;
        let g12 = prompter.ask_until("Axial shear modulus, G12 (GPa): ", |s| {
            validate_positive_decimal(s)
        })?;
        let g23 = prompter.ask_until("Transverse shear modulus, G23 (GPa): ", |s| {
            validate_positive_decimal(s)
        })?;
        let v12 = prompter.ask_until("Major Poisson's ratio, v12: ", |s| validate_ratio(s))?;
        match TranstropicPhase::new(&name, e1, e2, g12, g23, v12) {
            Ok(phase) => return Ok(phase),
            Err(err) => rejected(prompter, role, &err)?,
        }
    }
}

fn rejected<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    role: PhaseRole,
    err: &MechError,
) -> io::Result<()> {
    prompter.say(&format!("  {}", err))?;
    prompter.say(&format!("  Please re-enter the {} properties.", role))
}

/// First phase of a CSV file.
fn first_row<T>(phases: Vec<T>, path: &str) -> MechResult<T> {
    phases
        .into_iter()
        .next()
        .ok_or_else(|| MechError::invalid_value("path", path, "The file contains no phase rows"))
}
