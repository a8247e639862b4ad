//! # Report Rendering
//!
//! Plain-text tables for the console and plot series for charting tools.
//! Both consume the ordered records produced by the engine and never touch
//! the formulas.
//!
//! ## Example
//!
//! ```rust
//! use micromech_core::report::render_table;
//!
//! let table = render_table(
//!     &["Vf", "E1*\n(GPa)"],
//!     &[vec!["0.00".to_string(), "2.800".to_string()]],
//! );
//! let lines: Vec<Vec<&str>> = table.lines().map(|l| l.split_whitespace().collect()).collect();
//! assert_eq!(lines[0], ["Vf", "E1*"]);
//! assert_eq!(lines[1], ["(GPa)"]);
//! assert!(lines[2].iter().all(|rule| rule.chars().all(|c| c == '-')));
//! assert_eq!(lines[3], ["0.00", "2.800"]);
//! ```

use prettytable::format::{Alignment, FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::table::{Column, EffectiveTable};
use crate::materials::PhaseInfo;

/// Axis label shared by every plot
pub const VF_AXIS_LABEL: &str = "Fiber Volume Fraction, Vf";

/// Borderless layout with a dashed rule under the column titles.
fn console_format() -> TableFormat {
    FormatBuilder::new()
        .column_separator(' ')
        .separator(LinePosition::Title, LineSeparator::new('-', ' ', ' ', ' '))
        .padding(1, 1)
        .build()
}

fn right_aligned(text: &str) -> Cell {
    Cell::new_align(text, Alignment::RIGHT)
}

/// Render headers and rows as a right-aligned text table.
///
/// A header containing `\n` is stacked over several lines. Rows shorter than
/// the header list are padded with blank cells.
pub fn render_table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.set_format(console_format());
    table.set_titles(Row::new(
        headers.iter().map(|header| right_aligned(header.as_ref())).collect(),
    ));
    for row in rows {
        let cells = (0..headers.len())
            .map(|i| right_aligned(row.get(i).map(String::as_str).unwrap_or("")))
            .collect();
        table.add_row(Row::new(cells));
    }
    table.to_string()
}

/// One-row table of a phase info record.
pub fn render_phase_info(info: &PhaseInfo) -> String {
    let headers: Vec<String> = info.labels().iter().map(|label| wrap_label(label)).collect();
    render_table(&headers, &[info.row()])
}

/// Effective-property table with the composite label as a title line.
pub fn render_effective_table(table: &EffectiveTable) -> String {
    let mut output = format!("Effective properties of {}\n", table.label());
    output.push_str(&render_table(&table.headers(), &table.string_rows()));
    output
}

/// Break a `"Name, Symbol (unit)"` info label after the comma so it stacks.
fn wrap_label(label: &str) -> String {
    label.replacen(", ", ",\n", 1)
}

/// Data for one chart: an effective property against Vf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotSeries {
    /// Property symbol (E1, E2, G12, v12, G23, K23)
    pub property: String,
    /// Chart title
    pub title: String,
    /// Horizontal axis label
    pub x_label: String,
    /// Vertical axis label
    pub y_label: String,
    /// Suggested image filename `<label>_<property>.png`
    pub filename: String,
    /// Vf samples
    pub x: Vec<Decimal>,
    /// Property values, one per sample
    pub y: Vec<Decimal>,
}

/// Series for each of the six effective properties, in column order.
pub fn plot_series(table: &EffectiveTable) -> Vec<PlotSeries> {
    let x = table.column(Column::Vf);
    Column::PROPERTIES
        .iter()
        .map(|column| PlotSeries {
            property: column.symbol().to_string(),
            title: format!("{}: {}", table.label(), column.description()),
            x_label: VF_AXIS_LABEL.to_string(),
            y_label: column.flat_header(),
            filename: format!("{}_{}.png", table.label(), column.symbol()),
            x: x.clone(),
            y: table.column(*column),
        })
        .collect()
}
