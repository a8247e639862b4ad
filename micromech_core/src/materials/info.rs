//! Phase info records: ordered label → value pairs handed to the table
//! renderer and the CSV writer.

use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One cell of an info record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    /// Constituent name
    Text(String),
    /// Modulus or ratio at its stored precision
    Number(Decimal),
}

impl std::fmt::Display for InfoValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfoValue::Text(text) => write!(f, "{}", text),
            InfoValue::Number(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for InfoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Ordered record describing one phase.
///
/// Isotropic phases produce 5 columns, transversely isotropic phases 7.
/// Serializes as a JSON object whose keys keep the column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseInfo {
    columns: Vec<(&'static str, InfoValue)>,
}

impl PhaseInfo {
    pub(crate) fn new(columns: Vec<(&'static str, InfoValue)>) -> Self {
        PhaseInfo { columns }
    }

    /// Column labels in order
    pub fn labels(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(label, _)| *label).collect()
    }

    /// Cell values in column order
    pub fn values(&self) -> impl Iterator<Item = &InfoValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Look up a cell by label
    pub fn get(&self, label: &str) -> Option<&InfoValue> {
        self.columns
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, value)| value)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the record has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cells rendered as strings, in column order
    pub fn row(&self) -> Vec<String> {
        self.values().map(ToString::to_string).collect()
    }
}

impl Serialize for PhaseInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (label, value) in &self.columns {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
