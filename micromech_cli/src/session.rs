//! Interactive session: acquire both phases, then serve the results menu.

use std::io::{self, BufRead, Write};

use micromech_core::calculations::{
    effective_properties_at, effective_properties_full, effective_properties_range, EffectiveTable,
};
use micromech_core::file_io::PhaseRole;
use micromech_core::report::{plot_series, render_effective_table, render_phase_info};
use micromech_core::validation::parse_index_input;
use micromech_core::{MechError, MechResult, Settings, UdComposite};
use serde::Serialize;

use crate::acquire::acquire_phase;
use crate::export;
use crate::prompt::Prompter;

const MENU: &str = "
Select an option:
  1) Show phase properties
  2) Show effective properties (full table, Vf = 0.00 .. 1.00)
  3) Show effective properties at one Vf index (0-100)
  4) Show effective properties over an index range
  5) Save CSV files
  6) Export plot data
  7) Print JSON
  q) Quit";

/// Composite and table printed by the JSON menu entry.
#[derive(Serialize)]
struct JsonReport<'a> {
    composite: &'a UdComposite,
    effective_properties: &'a EffectiveTable,
}

/// Results menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    PhaseInfo,
    FullTable,
    AtIndex,
    Range,
    SaveCsv,
    ExportPlotData,
    PrintJson,
    Quit,
}

impl MenuAction {
    pub fn parse(answer: &str) -> MechResult<Self> {
        match answer.to_ascii_lowercase().as_str() {
            "1" => Ok(MenuAction::PhaseInfo),
            "2" => Ok(MenuAction::FullTable),
            "3" => Ok(MenuAction::AtIndex),
            "4" => Ok(MenuAction::Range),
            "5" => Ok(MenuAction::SaveCsv),
            "6" => Ok(MenuAction::ExportPlotData),
            "7" => Ok(MenuAction::PrintJson),
            "q" | "quit" | "0" => Ok(MenuAction::Quit),
            _ => Err(MechError::invalid_value(
                "menu option",
                answer,
                "Enter 1-7, or q to quit",
            )),
        }
    }
}

/// Run a full session.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    settings: &Settings,
) -> io::Result<()> {
    prompter.say("Micromech - Effective Moduli of Unidirectional Composites")?;
    prompter.say("=========================================================")?;

    let fiber = acquire_phase(prompter, PhaseRole::Fiber)?;
    let matrix = acquire_phase(prompter, PhaseRole::Matrix)?;
    let composite = UdComposite::new(fiber, matrix);
    tracing::info!(label = %composite.label(), "composite ready");

    let table = match effective_properties_full(&composite) {
        Ok(table) => table,
        Err(err) => {
            prompter.say(&format!("Cannot compute effective properties: {}", err))?;
            return Ok(());
        }
    };

    menu(prompter, &composite, &table, settings)
}

/// Serve the menu until the user quits.
pub fn menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    composite: &UdComposite,
    table: &EffectiveTable,
    settings: &Settings,
) -> io::Result<()> {
    loop {
        prompter.say(MENU)?;
        let action = prompter.ask_until("> ", MenuAction::parse)?;
        match action {
            MenuAction::PhaseInfo => {
                prompter.say(&format!("\nFiber: {}", composite.fiber().kind().display_name()))?;
                prompter.say(&render_phase_info(&composite.fiber().info()))?;
                prompter.say(&format!("Matrix: {}", composite.matrix().kind().display_name()))?;
                prompter.say(&render_phase_info(&composite.matrix().info()))?;
            }
            MenuAction::FullTable => {
                prompter.say(&render_effective_table(table))?;
            }
            MenuAction::AtIndex => {
                let row = prompter.ask_until("Vf index (0-100): ", |answer| {
                    effective_properties_at(composite, parse_index_input(answer))
                })?;
                prompter.say(&render_effective_table(&row))?;
            }
            MenuAction::Range => {
                let rows = ask_range(prompter, composite)?;
                prompter.say(&render_effective_table(&rows))?;
            }
            MenuAction::SaveCsv => {
                match export::save_csv_files(composite, table, &settings.output_dir) {
                    Ok(paths) => {
                        for path in paths {
                            prompter.say(&format!("Saved {}", path.display()))?;
                        }
                    }
                    Err(err) => report_failure(prompter, "Saving CSV files failed", &err)?,
                }
            }
            MenuAction::ExportPlotData => {
                let series = plot_series(table);
                match export::save_plot_data(&series, table.label(), &settings.output_dir) {
                    Ok(path) => prompter.say(&format!(
                        "Saved {} series to {}",
                        series.len(),
                        path.display()
                    ))?,
                    Err(err) => report_failure(prompter, "Exporting plot data failed", &err)?,
                }
            }
            MenuAction::PrintJson => {
                let report = JsonReport {
                    composite,
                    effective_properties: table,
                };
                match serde_json::to_string_pretty(&report) {
                    Ok(text) => prompter.say(&text)?,
                    Err(err) => report_failure(prompter, "JSON output failed", &err.into())?,
                }
            }
            MenuAction::Quit => {
                prompter.say("Goodbye.")?;
                return Ok(());
            }
        }
    }
}

/// Ask for start and end until they form a valid range.
fn ask_range<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    composite: &UdComposite,
) -> io::Result<EffectiveTable> {
    loop {
        let start = prompter.ask("Start index (0-99): ")?;
        let end = prompter.ask("End index (1-100): ")?;
        let range = effective_properties_range(
            composite,
            parse_index_input(&start),
            parse_index_input(&end),
        );
        match range {
            Ok(rows) => return Ok(rows),
            Err(err) => prompter.say(&format!("  {}", err))?,
        }
    }
}

fn report_failure<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    context: &str,
    err: &MechError,
) -> io::Result<()> {
    tracing::warn!(error = %err, code = err.error_code(), "{}", context);
    prompter.say(&format!("{}: {}", context, err))
}
