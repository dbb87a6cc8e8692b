// ============================================================================
// JSON Export Parsing
// ============================================================================
//
// Convenience entry point for callers holding a whole export as one JSON
// document (headers plus rows), as produced by the platform's file-ingestion
// service. Detection and normalization stay pure; this layer only parses.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::ingest::detect::{detect_format, FormatDetection};
use crate::ingest::normalize::normalize_json_rows;
use crate::models::Swing;

#[derive(serde::Deserialize)]
struct ExportInput {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Value>,
}

/// Parse an export JSON document into headers and raw rows.
///
/// Expected shape: `{"headers": [...], "rows": [{...}, ...]}`. The `rows`
/// field may be omitted for a header-only probe.
pub fn parse_export_json_str(export_json: &str) -> Result<(Vec<String>, Vec<Value>)> {
    let input: ExportInput =
        serde_json::from_str(export_json).context("Failed to deserialize export JSON")?;
    if input.headers.is_empty() {
        anyhow::bail!("Export has no column headers");
    }
    Ok((input.headers, input.rows))
}

/// Parse, detect, and normalize an export document in one step.
///
/// The detection result is returned alongside the swings so callers can
/// surface the recognized vendor; an unknown format yields an empty swing
/// list rather than an error, consistent with the engine's tolerance for
/// incomplete upstream data.
pub fn ingest_export_json_str(export_json: &str) -> Result<(FormatDetection, Vec<Swing>)> {
    let (headers, rows) = parse_export_json_str(export_json)?;
    let detection = detect_format(&headers);
    let swings = match &detection.mapping {
        Some(mapping) => normalize_json_rows(&rows, mapping),
        None => Vec::new(),
    };
    Ok((detection, swings))
}
