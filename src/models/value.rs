//! Tagged scalar cells for raw measurement rows.
//!
//! Vendor exports arrive as loosely typed spreadsheets: a velocity column may
//! contain numbers, numeric strings, or blanks, and an outcome column may
//! contain numbers where text was expected. Coercion happens exactly once, at
//! the ingestion boundary, by tagging every cell as number, text, or missing
//! so downstream code never re-guesses types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One parsed cell from a vendor export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Numeric view of the cell.
    ///
    /// Text cells are parsed leniently (surrounding whitespace ignored);
    /// unparseable text and missing cells yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Missing => None,
        }
    }

    /// Text view of the cell.
    ///
    /// Always yields a string: numbers are formatted, missing cells become
    /// the empty string. Downstream comparisons rely on this never being a
    /// non-string type.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Missing => String::new(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => CellValue::Number(f),
                None => CellValue::Missing,
            },
            serde_json::Value::String(s) => CellValue::Text(s),
            serde_json::Value::Bool(b) => CellValue::Text(b.to_string()),
            serde_json::Value::Null => CellValue::Missing,
            other => CellValue::Text(other.to_string()),
        }
    }
}

/// One raw export row: column name -> tagged cell.
///
/// Keyed with a sorted map so row serialization is deterministic; column
/// *order* is irrelevant once headers have been mapped to canonical fields.
pub type RawRow = BTreeMap<String, CellValue>;

/// Build a [`RawRow`] from a JSON object, tagging every cell.
///
/// Non-object values produce an empty row.
pub fn row_from_json(value: &serde_json::Value) -> RawRow {
    match value.as_object() {
        Some(map) => map
            .iter()
            .map(|(k, v)| (k.clone(), CellValue::from(v.clone())))
            .collect(),
        None => RawRow::new(),
    }
}
