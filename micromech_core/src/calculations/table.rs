//! Effective-property table: ordered columns `Vf, E1*, E2*, G12*, v12*, G23*,
//! K23*`, one row per sampled fiber volume fraction.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::units::Quantity;

/// A column of the effective-property table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Fiber volume fraction
    Vf,
    /// Effective axial Young's modulus
    E1,
    /// Effective transverse Young's modulus
    E2,
    /// Effective axial shear modulus
    G12,
    /// Effective major Poisson's ratio
    V12,
    /// Effective transverse shear modulus
    G23,
    /// Effective plane-strain bulk modulus
    K23,
}

impl Column {
    /// All columns in table order
    pub const ALL: [Column; 7] = [
        Column::Vf,
        Column::E1,
        Column::E2,
        Column::G12,
        Column::V12,
        Column::G23,
        Column::K23,
    ];

    /// The six effective-property columns (everything except Vf)
    pub const PROPERTIES: [Column; 6] = [
        Column::E1,
        Column::E2,
        Column::G12,
        Column::V12,
        Column::G23,
        Column::K23,
    ];

    /// Table header; moduli carry their unit on a second line.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Vf => "Vf",
            Column::E1 => "E1*\n(GPa)",
            Column::E2 => "E2*\n(GPa)",
            Column::G12 => "G12*\n(GPa)",
            Column::V12 => "v12*",
            Column::G23 => "G23*\n(GPa)",
            Column::K23 => "K23*\n(GPa)",
        }
    }

    /// Single-line header for CSV files
    pub fn flat_header(&self) -> String {
        self.header().replace('\n', " ")
    }

    /// Short symbol without unit (used in plot filenames)
    pub fn symbol(&self) -> &'static str {
        match self {
            Column::Vf => "Vf",
            Column::E1 => "E1",
            Column::E2 => "E2",
            Column::G12 => "G12",
            Column::V12 => "v12",
            Column::G23 => "G23",
            Column::K23 => "K23",
        }
    }

    /// Long descriptive name
    pub fn description(&self) -> &'static str {
        match self {
            Column::Vf => "Fiber Volume Fraction",
            Column::E1 => "Effective Axial Young's Modulus",
            Column::E2 => "Effective Transverse Young's Modulus",
            Column::G12 => "Effective Axial Shear Modulus",
            Column::V12 => "Effective Major Poisson's Ratio",
            Column::G23 => "Effective Transverse Shear Modulus",
            Column::K23 => "Effective Plane-Strain Bulk Modulus",
        }
    }

    /// Precision class of the column's values
    pub fn quantity(&self) -> Quantity {
        match self {
            Column::Vf => Quantity::VolumeFraction,
            Column::V12 => Quantity::EffectiveRatio,
            _ => Quantity::Modulus,
        }
    }
}

/// One sampled fiber volume fraction with its effective properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EffectiveRow {
    /// Fiber volume fraction Vf
    pub vf: Decimal,
    /// E1* (GPa)
    pub e1: Decimal,
    /// E2* (GPa)
    pub e2: Decimal,
    /// G12* (GPa)
    pub g12: Decimal,
    /// v12*
    pub v12: Decimal,
    /// G23* (GPa)
    pub g23: Decimal,
    /// K23* (GPa)
    pub k23: Decimal,
}

impl EffectiveRow {
    /// Value of one column
    pub fn get(&self, column: Column) -> Decimal {
        match column {
            Column::Vf => self.vf,
            Column::E1 => self.e1,
            Column::E2 => self.e2,
            Column::G12 => self.g12,
            Column::V12 => self.v12,
            Column::G23 => self.g23,
            Column::K23 => self.k23,
        }
    }

    /// All 7 values in column order
    pub fn values(&self) -> [Decimal; 7] {
        Column::ALL.map(|column| self.get(column))
    }
}

/// Ordered effective-property table.
///
/// Holds 101 rows for a full sweep, one row for a single query or
/// `end - start + 1` rows for a range. Serializes as an ordered column map:
///
/// ```json
/// { "Vf": ["0.00", ...], "E1*\n(GPa)": ["2.800", ...], ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveTable {
    label: String,
    rows: Vec<EffectiveRow>,
}

impl EffectiveTable {
    pub(crate) fn new(label: impl Into<String>, rows: Vec<EffectiveRow>) -> Self {
        EffectiveTable {
            label: label.into(),
            rows,
        }
    }

    /// Composite label the table was computed for
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Column headers in order
    pub fn headers(&self) -> [&'static str; 7] {
        Column::ALL.map(|column| column.header())
    }

    /// Rows in ascending Vf order
    pub fn rows(&self) -> &[EffectiveRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order
    pub fn column(&self, column: Column) -> Vec<Decimal> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }

    /// Rows `start..=end` of this table as a new table.
    ///
    /// Returns `None` when the bounds fall outside the table.
    pub fn slice(&self, start: usize, end: usize) -> Option<EffectiveTable> {
        let rows = self.rows.get(start..=end)?;
        Some(EffectiveTable::new(self.label.clone(), rows.to_vec()))
    }

    /// Rows rendered as strings at each column's precision
    pub fn string_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.values().iter().map(ToString::to_string).collect())
            .collect()
    }
}

impl Serialize for EffectiveTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::ALL.len()))?;
        for column in Column::ALL {
            map.serialize_entry(column.header(), &self.column(column))?;
        }
        map.end()
    }
}
