//! Row normalization: vendor rows into canonical [`Swing`] records.
//!
//! Normalization is deliberately tolerant: upstream exports routinely carry
//! blank cells and junk text, and rejecting a whole batch over one bad cell
//! would lose an entire session. Numeric fields that fail to parse become
//! 0.0 (with a log line), string fields are always coerced to text, and an
//! empty row set yields an empty swing list rather than an error.

use log::warn;

use crate::ingest::detect::FieldMapping;
use crate::models::lookup::find_field;
use crate::models::value::{row_from_json, RawRow};
use crate::models::Swing;

/// Resolve a numeric field through the lookup chain, defaulting to 0.0.
fn numeric_field(row: &RawRow, header: &str, canonical: &str) -> f64 {
    let cell = find_field(row, header);
    match cell.as_f64() {
        Some(v) => v,
        None => {
            if !cell.is_missing() {
                warn!(
                    "unparseable {} cell {:?}, defaulting to 0",
                    canonical,
                    cell.as_text()
                );
            }
            0.0
        }
    }
}

/// Resolve an optional numeric field; a missing cell stays absent while an
/// unparseable one defaults to 0.0 like every other numeric.
fn optional_numeric_field(row: &RawRow, header: &str, canonical: &str) -> Option<f64> {
    let cell = find_field(row, header);
    if cell.is_missing() {
        return None;
    }
    match cell.as_f64() {
        Some(v) => Some(v),
        None => {
            warn!(
                "unparseable {} cell {:?}, defaulting to 0",
                canonical,
                cell.as_text()
            );
            Some(0.0)
        }
    }
}

/// Resolve a string field, coercing whatever the cell held to text.
fn text_field(row: &RawRow, header: Option<&String>) -> String {
    match header {
        Some(h) => find_field(row, h).as_text(),
        None => String::new(),
    }
}

/// Normalize one raw row with a field mapping.
pub fn normalize_row(row: &RawRow, mapping: &FieldMapping) -> Swing {
    let distance = mapping
        .distance
        .as_ref()
        .and_then(|h| optional_numeric_field(row, h, "distance"));

    Swing {
        exit_velo: numeric_field(row, &mapping.exit_velo, "exitVelo"),
        launch_angle: numeric_field(row, &mapping.launch_angle, "launchAngle"),
        distance,
        result: text_field(row, mapping.result.as_ref()),
        hit_type: text_field(row, mapping.hit_type.as_ref()),
        user: text_field(row, mapping.user.as_ref()),
    }
}

/// Normalize an ordered row set into canonical swings, preserving order.
///
/// An empty row set returns an empty list, never an error.
pub fn normalize_rows(rows: &[RawRow], mapping: &FieldMapping) -> Vec<Swing> {
    rows.iter().map(|row| normalize_row(row, mapping)).collect()
}

/// Convenience wrapper: normalize rows that are still `serde_json` objects,
/// tagging cells on the way through.
pub fn normalize_json_rows(rows: &[serde_json::Value], mapping: &FieldMapping) -> Vec<Swing> {
    rows.iter()
        .map(|value| normalize_row(&row_from_json(value), mapping))
        .collect()
}
