//! Scoring threshold configuration.
//!
//! All thresholds are serde-defaulted so a partial TOML or JSON document
//! deep-merges over the stock values, and a config built from an empty
//! document equals [`ScoringConfig::default()`]. Nested groups keep the
//! file format readable for coaches tuning a single band.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Hard-hit classification threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardHitThresholds {
    #[serde(default = "default_hard_hit_velo")]
    pub min_exit_velo: f64,
}

/// Sweet-spot launch-angle band (inclusive on both ends).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweetSpotThresholds {
    #[serde(default = "default_sweet_spot_min")]
    pub min_angle: f64,
    #[serde(default = "default_sweet_spot_max")]
    pub max_angle: f64,
}

/// Barrel envelope parameters.
///
/// Below `min_exit_velo` nothing is a barrel. From there the admissible
/// angle window widens linearly from `[base_angle_min, base_angle_max]`
/// toward `[cap_angle_min, cap_angle_max]` as velocity approaches
/// `velo_cap`, and stays at the capped bounds above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarrelThresholds {
    #[serde(default = "default_barrel_min_velo")]
    pub min_exit_velo: f64,
    #[serde(default = "default_barrel_velo_cap")]
    pub velo_cap: f64,
    #[serde(default = "default_barrel_base_min")]
    pub base_angle_min: f64,
    #[serde(default = "default_barrel_base_max")]
    pub base_angle_max: f64,
    #[serde(default = "default_barrel_cap_min")]
    pub cap_angle_min: f64,
    #[serde(default = "default_barrel_cap_max")]
    pub cap_angle_max: f64,
}

/// Batted-ball type boundaries. Each boundary belongs to the band above it:
/// ground ball `< ground_ball_max`, line drive `< line_drive_max`, fly ball
/// `< fly_ball_max`, pop-up otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattedBallThresholds {
    #[serde(default = "default_ground_ball_max")]
    pub ground_ball_max: f64,
    #[serde(default = "default_line_drive_max")]
    pub line_drive_max: f64,
    #[serde(default = "default_fly_ball_max")]
    pub fly_ball_max: f64,
}

/// Contact-quality score parameters.
///
/// The base score interpolates exit velocity across
/// `[velo_floor, velo_ceiling]` onto `[0, velo_max_points]`. Exactly one
/// launch-angle adjustment applies, chosen by non-overlapping bands over
/// the whole angle line: negative (< 0), flat (`[0, flat_max)`), sweet
/// (`[flat_max, sweet_max)`), very-good (`[sweet_max, very_good_max)`),
/// optimal (`[very_good_max, optimal_max]`), high (`(optimal_max,
/// high_max]`), pop-up above. Hard-hit, sweet-spot and barrel bonuses are
/// then added independently, except that a barrel supersedes the plain
/// sweet-spot bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactScoreParams {
    #[serde(default = "default_velo_floor")]
    pub velo_floor: f64,
    #[serde(default = "default_velo_ceiling")]
    pub velo_ceiling: f64,
    #[serde(default = "default_velo_max_points")]
    pub velo_max_points: f64,

    #[serde(default = "default_flat_max")]
    pub flat_max: f64,
    #[serde(default = "default_sweet_max")]
    pub sweet_max: f64,
    #[serde(default = "default_very_good_max")]
    pub very_good_max: f64,
    #[serde(default = "default_optimal_max")]
    pub optimal_max: f64,
    #[serde(default = "default_high_max")]
    pub high_max: f64,

    #[serde(default = "default_negative_penalty")]
    pub negative_penalty: f64,
    #[serde(default = "default_flat_penalty")]
    pub flat_penalty: f64,
    #[serde(default = "default_sweet_bonus")]
    pub sweet_bonus: f64,
    #[serde(default = "default_very_good_bonus")]
    pub very_good_bonus: f64,
    #[serde(default = "default_optimal_bonus")]
    pub optimal_bonus: f64,
    #[serde(default = "default_high_penalty")]
    pub high_penalty: f64,
    #[serde(default = "default_popup_penalty")]
    pub popup_penalty: f64,

    #[serde(default = "default_hard_hit_bonus")]
    pub hard_hit_bonus: f64,
    #[serde(default = "default_sweet_spot_bonus")]
    pub sweet_spot_bonus: f64,
    #[serde(default = "default_barrel_bonus")]
    pub barrel_bonus: f64,
}

/// 20-80 grade ladder cutoffs, checked top down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeScale {
    #[serde(default = "default_grade_plus_plus")]
    pub plus_plus: i32,
    #[serde(default = "default_grade_plus")]
    pub plus: i32,
    #[serde(default = "default_grade_above_average")]
    pub above_average: i32,
    #[serde(default = "default_grade_average")]
    pub average: i32,
    #[serde(default = "default_grade_below_average")]
    pub below_average: i32,
    #[serde(default = "default_grade_fringe")]
    pub fringe: i32,
}

impl GradeScale {
    /// Letter grade for a score on this ladder.
    pub fn grade_for(&self, score: i32) -> &'static str {
        if score >= self.plus_plus {
            "Plus-Plus"
        } else if score >= self.plus {
            "Plus"
        } else if score >= self.above_average {
            "Above-Avg"
        } else if score >= self.average {
            "Average"
        } else if score >= self.below_average {
            "Below-Avg"
        } else if score >= self.fringe {
            "Fringe"
        } else {
            "Poor"
        }
    }
}

/// Legacy points-based scoring parameters (session Ball Score).
///
/// Per-swing points accumulate additively across four independent bands and
/// are never clamped; only the derived session Ball Score is clamped to the
/// 20-80 scale via `ball_score_breakpoints` on average points per swing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPointParams {
    #[serde(default = "default_miss_penalty")]
    pub miss_penalty: f64,

    #[serde(default = "default_velo_tiers")]
    pub velo_tiers: Vec<(f64, f64)>,

    #[serde(default = "default_angle_prime_min")]
    pub angle_prime_min: f64,
    #[serde(default = "default_angle_prime_max")]
    pub angle_prime_max: f64,
    #[serde(default = "default_angle_prime_points")]
    pub angle_prime_points: f64,
    #[serde(default = "default_angle_secondary_min")]
    pub angle_secondary_min: f64,
    #[serde(default = "default_angle_secondary_max")]
    pub angle_secondary_max: f64,
    #[serde(default = "default_angle_secondary_points")]
    pub angle_secondary_points: f64,

    #[serde(default = "default_negative_angle_below")]
    pub negative_angle_below: f64,
    #[serde(default = "default_negative_angle_points")]
    pub negative_angle_points: f64,

    #[serde(default = "default_outcome_bonuses")]
    pub outcome_bonuses: Vec<(String, f64)>,

    #[serde(default = "default_ball_score_breakpoints")]
    pub ball_score_breakpoints: Vec<(f64, i32)>,
}

/// A named, versioned, immutable snapshot of every scoring threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "HardHitThresholds::default")]
    pub hard_hit: HardHitThresholds,
    #[serde(default = "SweetSpotThresholds::default")]
    pub sweet_spot: SweetSpotThresholds,
    #[serde(default = "BarrelThresholds::default")]
    pub barrel: BarrelThresholds,
    #[serde(default = "BattedBallThresholds::default")]
    pub batted_ball: BattedBallThresholds,
    #[serde(default = "ContactScoreParams::default")]
    pub contact: ContactScoreParams,
    #[serde(default = "GradeScale::default")]
    pub grade_scale: GradeScale,
    #[serde(default = "LegacyPointParams::default")]
    pub legacy: LegacyPointParams,
}

fn default_hard_hit_velo() -> f64 {
    95.0
}
fn default_sweet_spot_min() -> f64 {
    8.0
}
fn default_sweet_spot_max() -> f64 {
    32.0
}
fn default_barrel_min_velo() -> f64 {
    98.0
}
fn default_barrel_velo_cap() -> f64 {
    116.0
}
fn default_barrel_base_min() -> f64 {
    26.0
}
fn default_barrel_base_max() -> f64 {
    30.0
}
fn default_barrel_cap_min() -> f64 {
    8.0
}
fn default_barrel_cap_max() -> f64 {
    50.0
}
fn default_ground_ball_max() -> f64 {
    10.0
}
fn default_line_drive_max() -> f64 {
    25.0
}
fn default_fly_ball_max() -> f64 {
    50.0
}
fn default_velo_floor() -> f64 {
    60.0
}
fn default_velo_ceiling() -> f64 {
    105.0
}
fn default_velo_max_points() -> f64 {
    60.0
}
fn default_flat_max() -> f64 {
    8.0
}
fn default_sweet_max() -> f64 {
    12.0
}
fn default_very_good_max() -> f64 {
    18.0
}
fn default_optimal_max() -> f64 {
    26.0
}
fn default_high_max() -> f64 {
    40.0
}
fn default_negative_penalty() -> f64 {
    -10.0
}
fn default_flat_penalty() -> f64 {
    -5.0
}
fn default_sweet_bonus() -> f64 {
    5.0
}
fn default_very_good_bonus() -> f64 {
    10.0
}
fn default_optimal_bonus() -> f64 {
    15.0
}
fn default_high_penalty() -> f64 {
    -5.0
}
fn default_popup_penalty() -> f64 {
    -15.0
}
fn default_hard_hit_bonus() -> f64 {
    10.0
}
fn default_sweet_spot_bonus() -> f64 {
    5.0
}
fn default_barrel_bonus() -> f64 {
    15.0
}
fn default_grade_plus_plus() -> i32 {
    70
}
fn default_grade_plus() -> i32 {
    60
}
fn default_grade_above_average() -> i32 {
    55
}
fn default_grade_average() -> i32 {
    45
}
fn default_grade_below_average() -> i32 {
    40
}
fn default_grade_fringe() -> i32 {
    30
}
fn default_miss_penalty() -> f64 {
    -5.0
}
fn default_velo_tiers() -> Vec<(f64, f64)> {
    vec![(100.0, 20.0), (95.0, 15.0), (90.0, 10.0), (80.0, 5.0)]
}
fn default_angle_prime_min() -> f64 {
    10.0
}
fn default_angle_prime_max() -> f64 {
    25.0
}
fn default_angle_prime_points() -> f64 {
    10.0
}
fn default_angle_secondary_min() -> f64 {
    5.0
}
fn default_angle_secondary_max() -> f64 {
    35.0
}
fn default_angle_secondary_points() -> f64 {
    5.0
}
fn default_negative_angle_below() -> f64 {
    -10.0
}
fn default_negative_angle_points() -> f64 {
    -5.0
}
fn default_outcome_bonuses() -> Vec<(String, f64)> {
    vec![
        ("HR".to_string(), 25.0),
        ("3B".to_string(), 15.0),
        ("2B".to_string(), 10.0),
        ("1B".to_string(), 5.0),
    ]
}
fn default_ball_score_breakpoints() -> Vec<(f64, i32)> {
    vec![
        (40.0, 80),
        (32.0, 70),
        (26.0, 60),
        (20.0, 55),
        (15.0, 50),
        (10.0, 45),
        (5.0, 40),
        (0.0, 30),
    ]
}

macro_rules! impl_group_default {
    ($ty:ty) => {
        impl Default for $ty {
            fn default() -> Self {
                // Empty document picks up every serde field default.
                serde_json::from_str("{}").expect("defaults always deserialize")
            }
        }
    };
}

impl_group_default!(HardHitThresholds);
impl_group_default!(SweetSpotThresholds);
impl_group_default!(BarrelThresholds);
impl_group_default!(BattedBallThresholds);
impl_group_default!(ContactScoreParams);
impl_group_default!(GradeScale);
impl_group_default!(LegacyPointParams);
impl_group_default!(ScoringConfig);

/// One changed leaf between two configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDiffEntry {
    /// Dot-separated path of the changed leaf (e.g. `barrel.min_exit_velo`).
    pub path: String,
    pub base: serde_json::Value,
    pub updated: serde_json::Value,
}

/// Recursively merge `overrides` into `base`: objects merge key-wise,
/// anything else replaces the base value.
fn merge_value(base: &mut serde_json::Value, overrides: &serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

fn flatten_into(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, serde_json::Value)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&path, child, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.clone())),
    }
}

impl ScoringConfig {
    /// Build a derived configuration by deep-merging partial overrides over
    /// this one. Unspecified leaves keep this config's values.
    ///
    /// Overrides are a JSON object mirroring the config shape, e.g.
    /// `{"barrel": {"min_exit_velo": 99.0}}`.
    pub fn apply_overrides(&self, overrides: &serde_json::Value) -> EngineResult<ScoringConfig> {
        let mut base = serde_json::to_value(self)
            .map_err(|e| EngineError::config(format!("serialize base config: {}", e)))?;
        merge_value(&mut base, overrides);
        serde_json::from_value(base)
            .map_err(|e| EngineError::config(format!("invalid override value: {}", e)))
    }

    /// Flat leaf-by-leaf diff against another configuration.
    ///
    /// Entries are sorted by path; an empty result means the configs are
    /// identical.
    pub fn diff(&self, other: &ScoringConfig) -> EngineResult<Vec<ConfigDiffEntry>> {
        let base = serde_json::to_value(self)
            .map_err(|e| EngineError::config(format!("serialize config: {}", e)))?;
        let updated = serde_json::to_value(other)
            .map_err(|e| EngineError::config(format!("serialize config: {}", e)))?;

        let mut base_leaves = Vec::new();
        let mut updated_leaves = Vec::new();
        flatten_into("", &base, &mut base_leaves);
        flatten_into("", &updated, &mut updated_leaves);

        let updated_map: std::collections::BTreeMap<String, serde_json::Value> =
            updated_leaves.into_iter().collect();

        let mut entries: Vec<ConfigDiffEntry> = base_leaves
            .into_iter()
            .filter_map(|(path, base_value)| {
                let updated_value = updated_map.get(&path)?;
                if *updated_value != base_value {
                    Some(ConfigDiffEntry {
                        path,
                        base: base_value,
                        updated: updated_value.clone(),
                    })
                } else {
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// SHA-256 fingerprint of the canonical JSON form, for audit and
    /// deduplication of stored versions.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(self).expect("config always serializes");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Parse a (possibly partial) configuration from TOML text; missing
    /// leaves take their defaults.
    pub fn from_toml_str(content: &str) -> EngineResult<ScoringConfig> {
        toml::from_str(content)
            .map_err(|e| EngineError::config(format!("failed to parse scoring config: {}", e)))
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<ScoringConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::config(format!(
                "failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Parse partial overrides from TOML text into the JSON object form that
/// [`ScoringConfig::apply_overrides`] consumes.
pub fn overrides_from_toml_str(content: &str) -> EngineResult<serde_json::Value> {
    let value: toml::Value = toml::from_str(content)
        .map_err(|e| EngineError::config(format!("failed to parse overrides: {}", e)))?;
    serde_json::to_value(value)
        .map_err(|e| EngineError::config(format!("failed to convert overrides: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.hard_hit.min_exit_velo, 95.0);
        assert_eq!(config.sweet_spot.min_angle, 8.0);
        assert_eq!(config.sweet_spot.max_angle, 32.0);
        assert_eq!(config.barrel.min_exit_velo, 98.0);
        assert_eq!(config.grade_scale.plus_plus, 70);
    }

    #[test]
    fn test_empty_toml_equals_defaults() {
        let config = ScoringConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let config = ScoringConfig::from_toml_str(
            r#"
[hard_hit]
min_exit_velo = 92.0
"#,
        )
        .unwrap();
        assert_eq!(config.hard_hit.min_exit_velo, 92.0);
        assert_eq!(config.barrel.min_exit_velo, 98.0);
    }

    #[test]
    fn test_apply_overrides_deep_merge() {
        let base = ScoringConfig::default();
        let derived = base
            .apply_overrides(&json!({
                "barrel": {"min_exit_velo": 96.0},
                "grade_scale": {"plus": 62}
            }))
            .unwrap();

        assert_eq!(derived.barrel.min_exit_velo, 96.0);
        assert_eq!(derived.grade_scale.plus, 62);
        // Unspecified leaves keep base values.
        assert_eq!(derived.barrel.velo_cap, base.barrel.velo_cap);
        assert_eq!(derived.grade_scale.plus_plus, base.grade_scale.plus_plus);
    }

    #[test]
    fn test_diff_reports_changed_leaves_only() {
        let base = ScoringConfig::default();
        let derived = base
            .apply_overrides(&json!({"hard_hit": {"min_exit_velo": 93.0}}))
            .unwrap();

        let diff = base.diff(&derived).unwrap();
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].path, "hard_hit.min_exit_velo");
        assert_eq!(diff[0].base, json!(95.0));
        assert_eq!(diff[0].updated, json!(93.0));

        assert!(base.diff(&base).unwrap().is_empty());
    }

    #[test]
    fn test_fingerprint_stable_and_sensitive() {
        let base = ScoringConfig::default();
        assert_eq!(base.fingerprint(), base.fingerprint());

        let derived = base
            .apply_overrides(&json!({"hard_hit": {"min_exit_velo": 93.0}}))
            .unwrap();
        assert_ne!(base.fingerprint(), derived.fingerprint());
    }

    #[test]
    fn test_grade_ladder() {
        let scale = GradeScale::default();
        assert_eq!(scale.grade_for(75), "Plus-Plus");
        assert_eq!(scale.grade_for(70), "Plus-Plus");
        assert_eq!(scale.grade_for(65), "Plus");
        assert_eq!(scale.grade_for(56), "Above-Avg");
        assert_eq!(scale.grade_for(50), "Average");
        assert_eq!(scale.grade_for(42), "Below-Avg");
        assert_eq!(scale.grade_for(35), "Fringe");
        assert_eq!(scale.grade_for(20), "Poor");
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ScoringConfig::default()
            .apply_overrides(&json!({"sweet_spot": {"max_angle": 30.0}}))
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScoringConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides = overrides_from_toml_str(
            r#"
[barrel]
velo_cap = 118.0
"#,
        )
        .unwrap();
        let derived = ScoringConfig::default().apply_overrides(&overrides).unwrap();
        assert_eq!(derived.barrel.velo_cap, 118.0);
    }
}
