//! Configurable per-swing quality classification.
//!
//! Every predicate and the contact-quality score read their thresholds from
//! an explicit [`ScoringConfig`]; nothing in this module carries a
//! hardcoded boundary. This is the rich classifier behind the Bat/Ball
//! pillars, distinct from the fixed two-band session summary in
//! [`crate::services::session`].

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::models::Swing;

/// Mutually exclusive batted-ball types by launch angle. Each boundary
/// belongs to the band above it (half-open bands).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattedBallType {
    GroundBall,
    LineDrive,
    FlyBall,
    Popup,
}

/// Which components made up a contact-quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactBreakdown {
    /// Velocity base, linearly interpolated onto `[0, velo_max_points]`.
    pub base: f64,
    /// Name of the single launch-angle band that applied.
    pub angle_band: String,
    pub angle_adjustment: f64,
    pub hard_hit_bonus: f64,
    pub sweet_spot_bonus: f64,
    pub barrel_bonus: f64,
}

/// Contact-quality result for one swing.
///
/// `breakdown` is `None` exactly when the swing was a whiff (exit velocity
/// <= 0), which short-circuits to a score of 0 before any bonus logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactScore {
    pub score: i32,
    pub breakdown: Option<ContactBreakdown>,
}

/// Hard-hit predicate: exit velocity at or above the configured cutoff.
pub fn is_hard_hit(swing: &Swing, config: &ScoringConfig) -> bool {
    swing.exit_velo >= config.hard_hit.min_exit_velo
}

/// Sweet-spot predicate: launch angle within the configured band,
/// inclusive on both ends.
pub fn is_sweet_spot(swing: &Swing, config: &ScoringConfig) -> bool {
    swing.launch_angle >= config.sweet_spot.min_angle
        && swing.launch_angle <= config.sweet_spot.max_angle
}

/// Admissible barrel angle window for a given exit velocity.
///
/// `None` below the minimum barrel velocity. From there the window widens
/// linearly from the base bounds toward the capped bounds as velocity
/// approaches the cap, and is clamped at the capped bounds above it. A
/// continuous function of velocity, so marginal changes move the window
/// smoothly.
pub fn barrel_angle_window(exit_velo: f64, config: &ScoringConfig) -> Option<(f64, f64)> {
    let b = &config.barrel;
    if exit_velo < b.min_exit_velo {
        return None;
    }
    let span = b.velo_cap - b.min_exit_velo;
    let t = if span <= 0.0 {
        1.0
    } else {
        ((exit_velo - b.min_exit_velo) / span).clamp(0.0, 1.0)
    };
    let low = b.base_angle_min + t * (b.cap_angle_min - b.base_angle_min);
    let high = b.base_angle_max + t * (b.cap_angle_max - b.base_angle_max);
    Some((low, high))
}

/// Barrel predicate: velocity/angle combination inside the envelope.
pub fn is_barrel(swing: &Swing, config: &ScoringConfig) -> bool {
    match barrel_angle_window(swing.exit_velo, config) {
        Some((low, high)) => swing.launch_angle >= low && swing.launch_angle <= high,
        None => false,
    }
}

/// Classify a swing's batted-ball type from its launch angle.
pub fn batted_ball_type(swing: &Swing, config: &ScoringConfig) -> BattedBallType {
    let b = &config.batted_ball;
    let la = swing.launch_angle;
    if la < b.ground_ball_max {
        BattedBallType::GroundBall
    } else if la < b.line_drive_max {
        BattedBallType::LineDrive
    } else if la < b.fly_ball_max {
        BattedBallType::FlyBall
    } else {
        BattedBallType::Popup
    }
}

/// The single launch-angle adjustment that applies to a contact score.
fn angle_adjustment(launch_angle: f64, config: &ScoringConfig) -> (&'static str, f64) {
    let c = &config.contact;
    if launch_angle < 0.0 {
        ("negative", c.negative_penalty)
    } else if launch_angle < c.flat_max {
        ("flat", c.flat_penalty)
    } else if launch_angle < c.sweet_max {
        ("sweet", c.sweet_bonus)
    } else if launch_angle < c.very_good_max {
        ("very_good", c.very_good_bonus)
    } else if launch_angle <= c.optimal_max {
        ("optimal", c.optimal_bonus)
    } else if launch_angle <= c.high_max {
        ("high", c.high_penalty)
    } else {
        ("popup", c.popup_penalty)
    }
}

/// Continuous 0-100 contact-quality score for one swing.
///
/// Base score interpolates exit velocity across the configured range, one
/// launch-angle adjustment is added, then independent hard-hit, sweet-spot
/// and barrel bonuses, with the rule that a barrel supersedes the plain
/// sweet-spot bonus so angle quality is never rewarded twice. The result
/// is rounded and clamped to `[0, 100]`.
pub fn contact_score(swing: &Swing, config: &ScoringConfig) -> ContactScore {
    if swing.exit_velo <= 0.0 {
        // Canonical non-contact case: no bonus logic, no breakdown.
        return ContactScore {
            score: 0,
            breakdown: None,
        };
    }

    let c = &config.contact;
    let span = c.velo_ceiling - c.velo_floor;
    let fraction = if span <= 0.0 {
        1.0
    } else {
        ((swing.exit_velo - c.velo_floor) / span).clamp(0.0, 1.0)
    };
    let base = fraction * c.velo_max_points;

    let (angle_band, angle_adj) = angle_adjustment(swing.launch_angle, config);

    let hard_hit_bonus = if is_hard_hit(swing, config) {
        c.hard_hit_bonus
    } else {
        0.0
    };
    let barrel = is_barrel(swing, config);
    let barrel_bonus = if barrel { c.barrel_bonus } else { 0.0 };
    let sweet_spot_bonus = if !barrel && is_sweet_spot(swing, config) {
        c.sweet_spot_bonus
    } else {
        0.0
    };

    let total = base + angle_adj + hard_hit_bonus + sweet_spot_bonus + barrel_bonus;
    let score = total.round().clamp(0.0, 100.0) as i32;

    ContactScore {
        score,
        breakdown: Some(ContactBreakdown {
            base,
            angle_band: angle_band.to_string(),
            angle_adjustment: angle_adj,
            hard_hit_bonus,
            sweet_spot_bonus,
            barrel_bonus,
        }),
    }
}
