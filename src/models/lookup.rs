//! Field lookup strategies for loosely keyed rows.
//!
//! Vendor exports are inconsistent about header casing and often decorate
//! names ("Exit Velo (mph)"), so a mapped field is resolved through an
//! ordered chain of strategies: exact match, then case-insensitive match,
//! then substring match. The chain is a pure function so each strategy can
//! be tested in isolation.

use crate::models::value::{CellValue, RawRow};

/// Resolve a mapped field name against a row.
///
/// Tries, in order:
/// 1. exact key match
/// 2. case-insensitive key match
/// 3. substring match (mapped name contained in a key, case-insensitive)
///
/// Returns the first hit, or [`CellValue::Missing`] when no strategy
/// matches. Ties inside a strategy are broken by the row's (sorted) key
/// order, so the result is stable for a given row.
pub fn find_field(row: &RawRow, field: &str) -> CellValue {
    if let Some(v) = row.get(field) {
        return v.clone();
    }

    let wanted = field.trim().to_lowercase();

    for (key, value) in row {
        if key.trim().to_lowercase() == wanted {
            return value.clone();
        }
    }

    for (key, value) in row {
        if key.trim().to_lowercase().contains(&wanted) {
            return value.clone();
        }
    }

    CellValue::Missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_exact_match_wins() {
        let r = row(&[
            ("Velo", CellValue::Number(90.0)),
            ("velo", CellValue::Number(80.0)),
        ]);
        assert_eq!(find_field(&r, "Velo"), CellValue::Number(90.0));
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let r = row(&[("VELO", CellValue::Number(95.0))]);
        assert_eq!(find_field(&r, "velo"), CellValue::Number(95.0));
    }

    #[test]
    fn test_substring_fallback() {
        let r = row(&[("Exit Velo (mph)", CellValue::Number(99.0))]);
        assert_eq!(find_field(&r, "exit velo"), CellValue::Number(99.0));
    }

    #[test]
    fn test_missing_when_no_strategy_matches() {
        let r = row(&[("LA", CellValue::Number(15.0))]);
        assert_eq!(find_field(&r, "distance"), CellValue::Missing);
    }
}
