//! Vendor format detection from export column headers.
//!
//! Each supported launch monitor writes a recognizable header signature, so
//! detection is a fixed priority list: vendor-specific signatures first,
//! then a generic velocity+angle heuristic, then unknown. Matching is
//! whitespace- and case-insensitive and purely a function of the header set,
//! so the same headers always produce the same detection result.

use serde::{Deserialize, Serialize};

/// Detected source category for a measurement export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatCategory {
    /// HitTrax cage export (short headers: `Velo`, `LA`, `Dist`, ...).
    HitTrax,
    /// Rapsodo hitting export (`ExitVelocity`, `LaunchAngle`, ...).
    Rapsodo,
    /// Trackman CSV (`ExitSpeed`, `Angle`, ...).
    Trackman,
    /// No vendor signature, but velocity- and angle-like columns exist.
    Generic,
    /// Headers do not look like swing data at all.
    Unknown,
}

/// Mapping from canonical field names to the actual header names present.
///
/// Header names are stored exactly as they appeared in the export so row
/// lookup can try an exact match first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub exit_velo: String,
    pub launch_angle: String,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub hit_type: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

/// Result of header inspection: category plus field mapping when one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatDetection {
    pub category: FormatCategory,
    pub mapping: Option<FieldMapping>,
}

fn norm(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Find the original header whose normalized form equals one of `names`.
///
/// Candidates are tried in order, so signature aliases have a fixed
/// priority and detection never depends on header order.
fn exact<'a>(headers: &'a [String], names: &[&str]) -> Option<&'a str> {
    for name in names {
        if let Some(h) = headers.iter().find(|h| norm(h) == *name) {
            return Some(h.as_str());
        }
    }
    None
}

/// Find the first original header whose normalized form contains any of
/// `fragments`, scanning headers in export order.
fn containing<'a>(headers: &'a [String], fragments: &[&str]) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| {
            let n = norm(h);
            fragments.iter().any(|f| n.contains(f))
        })
        .map(|h| h.as_str())
}

fn hittrax_mapping(headers: &[String]) -> Option<FieldMapping> {
    let exit_velo = exact(headers, &["velo"])?;
    let launch_angle = exact(headers, &["la"])?;
    Some(FieldMapping {
        exit_velo: exit_velo.to_string(),
        launch_angle: launch_angle.to_string(),
        distance: exact(headers, &["dist"]).map(String::from),
        result: exact(headers, &["res"]).map(String::from),
        hit_type: exact(headers, &["type"]).map(String::from),
        user: exact(headers, &["user"]).map(String::from),
    })
}

fn rapsodo_mapping(headers: &[String]) -> Option<FieldMapping> {
    let exit_velo = exact(headers, &["exitvelocity", "exit velocity"])?;
    let launch_angle = exact(headers, &["launchangle", "launch angle"])?;
    Some(FieldMapping {
        exit_velo: exit_velo.to_string(),
        launch_angle: launch_angle.to_string(),
        distance: exact(headers, &["distance", "carrydistance"]).map(String::from),
        result: exact(headers, &["playresult", "result"]).map(String::from),
        hit_type: exact(headers, &["hittype", "battedballtype"]).map(String::from),
        user: exact(headers, &["playername", "player"]).map(String::from),
    })
}

fn trackman_mapping(headers: &[String]) -> Option<FieldMapping> {
    let exit_velo = exact(headers, &["exitspeed", "exit speed"])?;
    let launch_angle = exact(headers, &["angle", "launchangle"])?;
    Some(FieldMapping {
        exit_velo: exit_velo.to_string(),
        launch_angle: launch_angle.to_string(),
        distance: exact(headers, &["distance", "carry"]).map(String::from),
        result: exact(headers, &["playresult", "taggedhittype"]).map(String::from),
        hit_type: exact(headers, &["taggedhittype", "autohittype"]).map(String::from),
        user: exact(headers, &["batter", "batterid"]).map(String::from),
    })
}

fn generic_mapping(headers: &[String]) -> Option<FieldMapping> {
    let exit_velo = containing(headers, &["velo", "speed"])?;
    let launch_angle = containing(headers, &["angle", "la"])?;
    Some(FieldMapping {
        exit_velo: exit_velo.to_string(),
        launch_angle: launch_angle.to_string(),
        distance: containing(headers, &["dist", "carry"]).map(String::from),
        result: containing(headers, &["result", "res", "outcome"]).map(String::from),
        hit_type: containing(headers, &["type"]).map(String::from),
        user: containing(headers, &["user", "player", "batter"]).map(String::from),
    })
}

/// Identify the source format of an export from its column headers.
///
/// Vendor signatures are checked in a fixed priority order (HitTrax,
/// Rapsodo, Trackman), then the generic velocity+angle heuristic, then
/// [`FormatCategory::Unknown`] with no mapping.
///
/// # Examples
///
/// ```
/// use ssi_rust::ingest::{detect_format, FormatCategory};
///
/// let headers: Vec<String> = ["Velo", "LA", "Dist", "Res", "Type", "User"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let detection = detect_format(&headers);
/// assert_eq!(detection.category, FormatCategory::HitTrax);
/// assert_eq!(detection.mapping.unwrap().exit_velo, "Velo");
/// ```
pub fn detect_format(headers: &[String]) -> FormatDetection {
    if let Some(mapping) = hittrax_mapping(headers) {
        return FormatDetection {
            category: FormatCategory::HitTrax,
            mapping: Some(mapping),
        };
    }
    if let Some(mapping) = rapsodo_mapping(headers) {
        return FormatDetection {
            category: FormatCategory::Rapsodo,
            mapping: Some(mapping),
        };
    }
    if let Some(mapping) = trackman_mapping(headers) {
        return FormatDetection {
            category: FormatCategory::Trackman,
            mapping: Some(mapping),
        };
    }
    if let Some(mapping) = generic_mapping(headers) {
        return FormatDetection {
            category: FormatCategory::Generic,
            mapping: Some(mapping),
        };
    }
    FormatDetection {
        category: FormatCategory::Unknown,
        mapping: None,
    }
}
