//! Ingestion boundary: vendor format detection and swing normalization.
//!
//! The engine never fetches exports itself; callers hand it the column
//! header list and the parsed rows of an already-retrieved export. This
//! module identifies the source vendor from the headers and normalizes the
//! rows into canonical [`crate::models::Swing`] records.

pub mod detect;
pub mod export;
pub mod normalize;

pub use detect::{detect_format, FieldMapping, FormatCategory, FormatDetection};
pub use export::{ingest_export_json_str, parse_export_json_str};
pub use normalize::{normalize_json_rows, normalize_rows};
