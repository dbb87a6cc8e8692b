//! The canonical per-swing measurement record.

use serde::{Deserialize, Serialize};

/// One discrete batting attempt, normalized from any vendor export.
///
/// An exit velocity of exactly `0.0` is the canonical "miss" (no contact)
/// sentinel and must never be averaged into velocity statistics.
///
/// # Fields
///
/// * `exit_velo` - Exit velocity in mph (>= 0; 0 encodes a whiff)
/// * `launch_angle` - Launch angle in degrees, signed
/// * `distance` - Carry distance in feet, when the vendor reports it
/// * `result` - Free-text outcome label (e.g. "foul", "HR"); may be empty
/// * `hit_type` - Free-text batted-ball label (e.g. "line-drive"); may be empty
/// * `user` - Free-text user/session tag from the source export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swing {
    pub exit_velo: f64,
    pub launch_angle: f64,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub hit_type: String,
    #[serde(default)]
    pub user: String,
}

impl Swing {
    /// True when this swing made no contact (the zero-velocity sentinel).
    pub fn is_miss(&self) -> bool {
        self.exit_velo <= 0.0
    }

    /// True when the outcome label marks a foul ball.
    pub fn is_foul(&self) -> bool {
        self.result.trim().eq_ignore_ascii_case("foul")
    }

    /// True when the source export attached any outcome label at all.
    pub fn has_result(&self) -> bool {
        !self.result.trim().is_empty()
    }
}
