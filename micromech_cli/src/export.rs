//! # Export
//!
//! Writes phase records, effective tables and plot series to the output
//! folder. The folder is created when missing and existing files are
//! replaced. Every file is written to a `.tmp` sibling first and renamed into
//! place, so an interrupted write never leaves a truncated export.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use micromech_core::calculations::{Column, EffectiveTable};
use micromech_core::file_io::{effective_filename, phase_filename, plot_data_filename, PhaseRole};
use micromech_core::materials::PhaseInfo;
use micromech_core::report::PlotSeries;
use micromech_core::{MechError, MechResult, UdComposite};

/// Create the output folder (and parents) if it does not exist.
pub fn ensure_output_dir(dir: &Path) -> MechResult<()> {
    fs::create_dir_all(dir).map_err(|e| {
        MechError::file_error("create folder", dir.display().to_string(), e.to_string())
    })
}

/// Header row plus one data row.
pub fn write_phase_info(info: &PhaseInfo, path: &Path) -> MechResult<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(info.labels())?;
    writer.write_record(info.row())?;
    atomic_write(path, &finish(writer)?)
}

/// Header row plus one row per Vf sample; headers are flattened to one line.
pub fn write_effective_table(table: &EffectiveTable, path: &Path) -> MechResult<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Column::ALL.iter().map(Column::flat_header))?;
    for row in table.string_rows() {
        writer.write_record(&row)?;
    }
    atomic_write(path, &finish(writer)?)
}

/// Plot series as pretty-printed JSON.
pub fn write_plot_data(series: &[PlotSeries], path: &Path) -> MechResult<()> {
    let json = serde_json::to_string_pretty(series)?;
    atomic_write(path, json.as_bytes())
}

/// Fiber info, matrix info and the effective table, named after the composite.
///
/// Returns the written paths in that order.
pub fn save_csv_files(
    composite: &UdComposite,
    table: &EffectiveTable,
    dir: &Path,
) -> MechResult<Vec<PathBuf>> {
    ensure_output_dir(dir)?;
    let label = composite.label();

    let fiber_path = dir.join(phase_filename(&label, PhaseRole::Fiber, composite.fiber().kind()));
    write_phase_info(&composite.fiber().info(), &fiber_path)?;

    let matrix_path =
        dir.join(phase_filename(&label, PhaseRole::Matrix, composite.matrix().kind()));
    write_phase_info(&composite.matrix().info(), &matrix_path)?;

    let table_path = dir.join(effective_filename(&label));
    write_effective_table(table, &table_path)?;

    Ok(vec![fiber_path, matrix_path, table_path])
}

/// Plot series of every effective property, named after the table's label.
pub fn save_plot_data(series: &[PlotSeries], label: &str, dir: &Path) -> MechResult<PathBuf> {
    ensure_output_dir(dir)?;
    let path = dir.join(plot_data_filename(label));
    write_plot_data(series, &path)?;
    Ok(path)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> MechResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| MechError::serialization(e.to_string()))
}

/// Write to `<path>.tmp`, sync, then rename over `path`.
fn atomic_write(path: &Path, bytes: &[u8]) -> MechResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    let tmp_display = || tmp_path.display().to_string();

    let written = File::create(&tmp_path)
        .map_err(|e| MechError::file_error("create temp file", tmp_display(), e.to_string()))
        .and_then(|mut tmp_file| {
            tmp_file.write_all(bytes).map_err(|e| {
                MechError::file_error("write temp file", tmp_display(), e.to_string())
            })?;
            tmp_file
                .sync_all()
                .map_err(|e| MechError::file_error("sync temp file", tmp_display(), e.to_string()))
        })
        .and_then(|()| {
            fs::rename(&tmp_path, path).map_err(|e| {
                MechError::file_error("rename to final", path.display().to_string(), e.to_string())
            })
        });

    if let Err(err) = written {
        // the temp file may not exist if create failed
        let _ = fs::remove_file(&tmp_path);
        tracing::warn!(path = %path.display(), error = %err, "write abandoned");
        return Err(err);
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}
