//! # File I/O Module
//!
//! CSV input for phase definitions and the export filename conventions.
//!
//! The core only reads: writers and output-folder creation live with the
//! application (`micromech_cli::export`), which takes the in-memory records
//! and the suggested filenames produced here.
//!
//! ## Filenames
//!
//! ```text
//! <Fiber>-<Matrix>_fiber_tra_moduli.csv   fiber phase info
//! <Fiber>-<Matrix>_matrix_iso_moduli.csv  matrix phase info
//! <Fiber>-<Matrix>_eff_moduli.csv         effective-property table
//! <Fiber>-<Matrix>_plot_data.json         plot series
//! ```
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::file_io::{effective_filename, phase_filename, PhaseRole};
//! use micromech_core::materials::PhaseKind;
//!
//! assert_eq!(
//!     phase_filename("Carbon-Epoxy", PhaseRole::Fiber, PhaseKind::Transtropic),
//!     "Carbon-Epoxy_fiber_tra_moduli.csv"
//! );
//! assert_eq!(effective_filename("Carbon-Epoxy"), "Carbon-Epoxy_eff_moduli.csv");
//! ```

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};
use crate::materials::PhaseKind;

/// Expected extension of phase input files
pub const CSV_EXTENSION: &str = "csv";

/// First cell of a header row written by the exporter
const HEADER_MARKER: &str = "Constituent";

/// Role of a phase inside a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseRole {
    Fiber,
    Matrix,
}

impl PhaseRole {
    /// Lowercase name used in filenames and prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseRole::Fiber => "fiber",
            PhaseRole::Matrix => "matrix",
        }
    }
}

impl std::fmt::Display for PhaseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `<label>_<role>_<iso|tra>_moduli.csv`
pub fn phase_filename(label: &str, role: PhaseRole, kind: PhaseKind) -> String {
    format!("{}_{}_{}_moduli.csv", label, role.as_str(), kind.code())
}

/// `<label>_eff_moduli.csv`
pub fn effective_filename(label: &str) -> String {
    format!("{}_eff_moduli.csv", label)
}

/// `<label>_plot_data.json`
pub fn plot_data_filename(label: &str) -> String {
    format!("{}_plot_data.json", label)
}

/// Read the data rows of a phase CSV file.
///
/// Cells are trimmed, blank lines are dropped and a leading header row whose
/// first cell is `Constituent` is skipped. Rows may have different lengths;
/// the caller decides which layouts it accepts.
///
/// # Errors
///
/// * [`MechError::InvalidType`] when the path does not end in `.csv`
/// * [`MechError::FileNotFound`] when the file does not exist
/// * [`MechError::FileError`] when the file cannot be opened or parsed
pub fn read_csv_rows(path: &Path) -> MechResult<Vec<Vec<String>>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
    if !is_csv {
        return Err(MechError::invalid_type(
            "path",
            format!("Expected a .csv file, got '{}'", path.display()),
        ));
    }
    if !path.exists() {
        return Err(MechError::file_not_found(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| MechError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            MechError::file_error("parse", path.display().to_string(), e.to_string())
        })?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(row);
    }

    if rows
        .first()
        .and_then(|row| row.first())
        .is_some_and(|cell| cell == HEADER_MARKER)
    {
        rows.remove(0);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read phase rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::fs;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_filenames_keep_fiber_matrix_order() {
        assert_eq!(
            phase_filename("Glass-Epoxy", PhaseRole::Matrix, PhaseKind::Isotropic),
            "Glass-Epoxy_matrix_iso_moduli.csv"
        );
        assert_eq!(effective_filename("Epoxy-Glass"), "Epoxy-Glass_eff_moduli.csv");
        assert_eq!(plot_data_filename("Carbon-Epoxy"), "Carbon-Epoxy_plot_data.json");
    }

    #[test]
    fn test_read_rows_trims_and_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "phases.csv",
            "Constituent,E,v\nEpoxy, 2.8 ,0.3\n\nGlass,72,0.22\n",
        );
        let rows = read_csv_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![vec!["Epoxy", "2.8", "0.3"], vec!["Glass", "72", "0.22"]]
        );
    }

    #[test]
    fn test_read_rows_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "carbon.csv", "Carbon,250,25,20,10,0.28\n");
        let rows = read_csv_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 6);
    }

    #[test]
    fn test_read_rows_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "phases.txt", "Epoxy,2.8,0.3\n");
        assert_eq!(read_csv_rows(&path).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(
            read_csv_rows(Path::new("no_extension")).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn test_read_rows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
