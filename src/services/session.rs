//! Session-level aggregation over an ordered swing list.
//!
//! This is the cheap descriptive summary of a cage session: counts, contact
//! rate, balls-in-play statistics, launch-angle distribution, and the legacy
//! points-based Ball Score. The quality-hit and barrel bands here are the
//! fixed two-band session summary; the configurable per-swing classifier
//! lives in [`crate::services::pillars`] and the two intentionally coexist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithms::stats;
use crate::config::ScoringConfig;
use crate::models::Swing;

/// Quality-hit band for the session summary (launch angle, degrees).
const QUALITY_ANGLE_MIN: f64 = 10.0;
const QUALITY_ANGLE_MAX: f64 = 25.0;
/// Session-summary barrel additionally requires this exit velocity.
const BARREL_MIN_VELO: f64 = 95.0;

/// Aggregate statistics for one session.
///
/// Velocity/angle/distance statistics are computed strictly over balls in
/// play; misses (the zero-velocity sentinel) and fouls never enter them.
/// When no swing in the session carries a result code the foul concept is
/// not applied at all and `fouls` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_swings: usize,
    pub misses: usize,
    pub fouls: usize,
    pub balls_in_play: usize,
    /// Percent of swings that made contact, 0-100.
    pub contact_rate: f64,

    pub avg_exit_velo: f64,
    pub max_exit_velo: f64,
    pub min_exit_velo: f64,
    pub avg_launch_angle: f64,
    pub avg_distance: f64,
    pub max_distance: f64,
    /// Balls in play at or above 95 mph.
    pub hard_hit_count: usize,

    pub ground_balls: usize,
    pub line_drives: usize,
    pub fly_balls: usize,
    pub popups: usize,

    pub quality_hits: usize,
    pub quality_hit_pct: f64,
    pub barrels: usize,
    pub barrel_pct: f64,

    pub legacy_points: f64,
    pub avg_points_per_swing: f64,
    /// Legacy Ball Score on the 20-80 scale.
    pub ball_score: i32,

    pub result_breakdown: BTreeMap<String, usize>,
    pub hit_type_breakdown: BTreeMap<String, usize>,
}

impl SessionStats {
    fn empty() -> Self {
        SessionStats {
            total_swings: 0,
            misses: 0,
            fouls: 0,
            balls_in_play: 0,
            contact_rate: 0.0,
            avg_exit_velo: 0.0,
            max_exit_velo: 0.0,
            min_exit_velo: 0.0,
            avg_launch_angle: 0.0,
            avg_distance: 0.0,
            max_distance: 0.0,
            hard_hit_count: 0,
            ground_balls: 0,
            line_drives: 0,
            fly_balls: 0,
            popups: 0,
            quality_hits: 0,
            quality_hit_pct: 0.0,
            barrels: 0,
            barrel_pct: 0.0,
            legacy_points: 0.0,
            avg_points_per_swing: 0.0,
            ball_score: 20,
            result_breakdown: BTreeMap::new(),
            hit_type_breakdown: BTreeMap::new(),
        }
    }
}

/// Legacy per-swing points.
///
/// Misses score the miss penalty, determinable fouls score 0, and
/// everything else accumulates additively from four independent bands:
/// exit-velocity tier, launch-angle tier, negative-angle penalty, and
/// outcome-code bonus. Per-swing points are never clamped.
pub fn legacy_swing_points(swing: &Swing, config: &ScoringConfig) -> f64 {
    let legacy = &config.legacy;

    if swing.is_miss() {
        return legacy.miss_penalty;
    }
    if swing.is_foul() {
        return 0.0;
    }

    let mut points = 0.0;

    for (threshold, tier_points) in &legacy.velo_tiers {
        if swing.exit_velo >= *threshold {
            points += tier_points;
            break;
        }
    }

    let la = swing.launch_angle;
    if la >= legacy.angle_prime_min && la <= legacy.angle_prime_max {
        points += legacy.angle_prime_points;
    } else if la >= legacy.angle_secondary_min && la <= legacy.angle_secondary_max {
        points += legacy.angle_secondary_points;
    }

    if la < legacy.negative_angle_below {
        points += legacy.negative_angle_points;
    }

    let result = swing.result.trim();
    if !result.is_empty() {
        for (code, bonus) in &legacy.outcome_bonuses {
            if result.eq_ignore_ascii_case(code) {
                points += bonus;
                break;
            }
        }
    }

    points
}

/// Convert average points per swing to the 20-80 legacy Ball Score.
fn ball_score_for(avg_points: f64, config: &ScoringConfig) -> i32 {
    for (threshold, score) in &config.legacy.ball_score_breakpoints {
        if avg_points >= *threshold {
            return *score;
        }
    }
    20
}

/// Compute session statistics from an ordered swing list.
///
/// Pure function: any change to the inputs produces a fresh value. An
/// empty list yields the empty stats record, not an error.
pub fn compute_session_stats(swings: &[Swing], config: &ScoringConfig) -> SessionStats {
    if swings.is_empty() {
        return SessionStats::empty();
    }

    let mut stats = SessionStats::empty();
    stats.total_swings = swings.len();
    stats.misses = swings.iter().filter(|s| s.is_miss()).count();
    stats.contact_rate =
        (stats.total_swings - stats.misses) as f64 / stats.total_swings as f64 * 100.0;

    // The foul concept only applies when the export attached result codes.
    let session_has_results = swings.iter().any(|s| s.has_result());
    if session_has_results {
        stats.fouls = swings.iter().filter(|s| !s.is_miss() && s.is_foul()).count();
    }

    let in_play: Vec<&Swing> = swings
        .iter()
        .filter(|s| !s.is_miss() && (!session_has_results || !s.is_foul()))
        .collect();
    stats.balls_in_play = in_play.len();

    if !in_play.is_empty() {
        let velos: Vec<f64> = in_play.iter().map(|s| s.exit_velo).collect();
        let angles: Vec<f64> = in_play.iter().map(|s| s.launch_angle).collect();
        let distances: Vec<f64> = in_play.iter().filter_map(|s| s.distance).collect();

        stats.avg_exit_velo = stats::mean(&velos);
        stats.max_exit_velo = velos.iter().cloned().fold(f64::MIN, f64::max);
        stats.min_exit_velo = velos.iter().cloned().fold(f64::MAX, f64::min);
        stats.avg_launch_angle = stats::mean(&angles);
        stats.avg_distance = stats::mean(&distances);
        stats.max_distance = distances.iter().cloned().fold(0.0, f64::max);
        stats.hard_hit_count = in_play.iter().filter(|s| s.exit_velo >= BARREL_MIN_VELO).count();

        for swing in &in_play {
            let la = swing.launch_angle;
            if la < 10.0 {
                stats.ground_balls += 1;
            } else if la < 25.0 {
                stats.line_drives += 1;
            } else if la < 50.0 {
                stats.fly_balls += 1;
            } else {
                stats.popups += 1;
            }

            let quality = (QUALITY_ANGLE_MIN..=QUALITY_ANGLE_MAX).contains(&la);
            if quality {
                stats.quality_hits += 1;
                if swing.exit_velo >= BARREL_MIN_VELO {
                    stats.barrels += 1;
                }
            }
        }

        stats.quality_hit_pct = stats.quality_hits as f64 / in_play.len() as f64 * 100.0;
        stats.barrel_pct = stats.barrels as f64 / in_play.len() as f64 * 100.0;
    }

    stats.legacy_points = swings.iter().map(|s| legacy_swing_points(s, config)).sum();
    stats.avg_points_per_swing = stats.legacy_points / stats.total_swings as f64;
    stats.ball_score = ball_score_for(stats.avg_points_per_swing, config);

    for swing in swings {
        let result = swing.result.trim();
        if !result.is_empty() {
            *stats.result_breakdown.entry(result.to_string()).or_insert(0) += 1;
        }
        let hit_type = swing.hit_type.trim();
        if !hit_type.is_empty() {
            *stats
                .hit_type_breakdown
                .entry(hit_type.to_string())
                .or_insert(0) += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swing(exit_velo: f64, launch_angle: f64, result: &str) -> Swing {
        Swing {
            exit_velo,
            launch_angle,
            distance: None,
            result: result.to_string(),
            hit_type: String::new(),
            user: String::new(),
        }
    }

    #[test]
    fn test_empty_session() {
        let stats = compute_session_stats(&[], &ScoringConfig::default());
        assert_eq!(stats.total_swings, 0);
        assert_eq!(stats.contact_rate, 0.0);
        assert_eq!(stats.ball_score, 20);
    }

    #[test]
    fn test_contact_rate_bounds() {
        let config = ScoringConfig::default();

        let all_contact = vec![swing(90.0, 10.0, ""), swing(85.0, 5.0, "")];
        let stats = compute_session_stats(&all_contact, &config);
        assert_eq!(stats.contact_rate, 100.0);

        let all_miss = vec![swing(0.0, 0.0, ""), swing(0.0, 0.0, "")];
        let stats = compute_session_stats(&all_miss, &config);
        assert_eq!(stats.contact_rate, 0.0);

        let half = vec![swing(0.0, 0.0, ""), swing(95.0, 12.0, "")];
        let stats = compute_session_stats(&half, &config);
        assert_eq!(stats.contact_rate, 50.0);
    }

    #[test]
    fn test_misses_never_enter_velocity_stats() {
        let config = ScoringConfig::default();
        let swings = vec![swing(0.0, 0.0, ""), swing(100.0, 15.0, ""), swing(90.0, 12.0, "")];
        let stats = compute_session_stats(&swings, &config);
        assert_eq!(stats.balls_in_play, 2);
        assert_eq!(stats.avg_exit_velo, 95.0);
        assert_eq!(stats.min_exit_velo, 90.0);
    }

    #[test]
    fn test_fouls_only_with_result_codes() {
        let config = ScoringConfig::default();

        // Result codes present: fouls counted and excluded from balls in play.
        let with_results = vec![
            swing(80.0, 20.0, "foul"),
            swing(100.0, 15.0, "HR"),
            swing(0.0, 0.0, ""),
        ];
        let stats = compute_session_stats(&with_results, &config);
        assert_eq!(stats.fouls, 1);
        assert_eq!(stats.balls_in_play, 1);
        assert_eq!(stats.avg_exit_velo, 100.0);

        // No result codes anywhere: foul concept not applied.
        let without_results = vec![swing(80.0, 20.0, ""), swing(100.0, 15.0, "")];
        let stats = compute_session_stats(&without_results, &config);
        assert_eq!(stats.fouls, 0);
        assert_eq!(stats.balls_in_play, 2);
    }

    #[test]
    fn test_launch_angle_buckets() {
        let config = ScoringConfig::default();
        let swings = vec![
            swing(90.0, 5.0, ""),   // ground ball
            swing(90.0, 10.0, ""),  // line drive (boundary belongs above)
            swing(90.0, 25.0, ""),  // fly ball
            swing(90.0, 50.0, ""),  // popup
        ];
        let stats = compute_session_stats(&swings, &config);
        assert_eq!(stats.ground_balls, 1);
        assert_eq!(stats.line_drives, 1);
        assert_eq!(stats.fly_balls, 1);
        assert_eq!(stats.popups, 1);
    }

    #[test]
    fn test_quality_hit_and_barrel_bands() {
        let config = ScoringConfig::default();
        let swings = vec![
            swing(96.0, 15.0, ""), // quality hit and barrel
            swing(90.0, 15.0, ""), // quality hit only
            swing(96.0, 30.0, ""), // neither (angle outside band)
        ];
        let stats = compute_session_stats(&swings, &config);
        assert_eq!(stats.quality_hits, 2);
        assert_eq!(stats.barrels, 1);
        assert!((stats.quality_hit_pct - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_legacy_points_scenario() {
        // 101 mph at 15 degrees for a home run.
        let config = ScoringConfig::default();
        let s = swing(101.0, 15.0, "HR");
        assert_eq!(legacy_swing_points(&s, &config), 55.0);
    }

    #[test]
    fn test_legacy_points_miss_and_foul() {
        let config = ScoringConfig::default();
        assert_eq!(legacy_swing_points(&swing(0.0, 0.0, ""), &config), -5.0);
        assert_eq!(legacy_swing_points(&swing(75.0, 12.0, "foul"), &config), 0.0);
    }

    #[test]
    fn test_legacy_negative_angle_penalty() {
        let config = ScoringConfig::default();
        // 85 mph chopper at -15 degrees: 5 (velo tier) - 5 (negative angle).
        assert_eq!(legacy_swing_points(&swing(85.0, -15.0, ""), &config), 0.0);
    }

    #[test]
    fn test_ball_score_clamped_to_scale() {
        let config = ScoringConfig::default();

        let hot: Vec<Swing> = (0..10).map(|_| swing(105.0, 18.0, "HR")).collect();
        let stats = compute_session_stats(&hot, &config);
        assert_eq!(stats.ball_score, 80);

        let cold: Vec<Swing> = (0..10).map(|_| swing(0.0, 0.0, "")).collect();
        let stats = compute_session_stats(&cold, &config);
        assert_eq!(stats.ball_score, 20);
    }

    #[test]
    fn test_breakdown_maps() {
        let config = ScoringConfig::default();
        let mut s1 = swing(95.0, 12.0, "1B");
        s1.hit_type = "line-drive".to_string();
        let mut s2 = swing(99.0, 14.0, "1B");
        s2.hit_type = "line-drive".to_string();
        let s3 = swing(101.0, 20.0, "HR");

        let stats = compute_session_stats(&[s1, s2, s3], &config);
        assert_eq!(stats.result_breakdown.get("1B"), Some(&2));
        assert_eq!(stats.result_breakdown.get("HR"), Some(&1));
        assert_eq!(stats.hit_type_breakdown.get("line-drive"), Some(&2));
    }
}
