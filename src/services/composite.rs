//! 4B composite score calculation.
//!
//! Combines up to four pillar scores (Brain, Body, Bat, Ball) into one
//! weighted composite with a letter grade and a weakest-pillar label. The
//! full 15/40/20/25 weighting applies only when all four pillars are
//! present; with any pillar missing the composite degrades to the
//! unweighted mean of what is present and the result is flagged partial.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;

const BRAIN_WEIGHT: f64 = 0.15;
const BODY_WEIGHT: f64 = 0.40;
const BAT_WEIGHT: f64 = 0.20;
const BALL_WEIGHT: f64 = 0.25;

/// The four skill dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pillar {
    Brain,
    Body,
    Bat,
    Ball,
}

/// Input pillar scores, each a 20-80 integer or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScores {
    pub brain: Option<i32>,
    pub body: Option<i32>,
    pub bat: Option<i32>,
    pub ball: Option<i32>,
}

impl PillarScores {
    /// Present pillars in the fixed Brain, Body, Bat, Ball order.
    fn present(&self) -> Vec<(Pillar, i32)> {
        [
            (Pillar::Brain, self.brain),
            (Pillar::Body, self.body),
            (Pillar::Bat, self.bat),
            (Pillar::Ball, self.ball),
        ]
        .into_iter()
        .filter_map(|(pillar, score)| score.map(|s| (pillar, s)))
        .collect()
    }
}

/// One subject's scored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourBScore {
    pub brain: Option<i32>,
    pub body: Option<i32>,
    pub bat: Option<i32>,
    pub ball: Option<i32>,
    pub composite: i32,
    pub grade: String,
    /// Lowest-scoring pillar; `None` only when zero pillars were present.
    pub weakest: Option<Pillar>,
    /// True when the composite fell back to the unweighted-mean path
    /// because at least one pillar was missing.
    pub partial: bool,
}

/// Compute the composite 4B score from up to four pillar scores.
///
/// Ties for weakest pillar go to the first occurrence in the fixed Brain,
/// Body, Bat, Ball order. Grade cutoffs come from the active
/// configuration's grade scale, never from literals here.
///
/// Zero present pillars is not an error: the result carries composite 0,
/// no weakest pillar, and the partial flag.
pub fn compute_four_b_score(pillars: &PillarScores, config: &ScoringConfig) -> FourBScore {
    let present = pillars.present();

    let (composite, partial) = if present.len() == 4 {
        let weighted = present[0].1 as f64 * BRAIN_WEIGHT
            + present[1].1 as f64 * BODY_WEIGHT
            + present[2].1 as f64 * BAT_WEIGHT
            + present[3].1 as f64 * BALL_WEIGHT;
        (weighted.round() as i32, false)
    } else if present.is_empty() {
        (0, true)
    } else {
        let sum: i32 = present.iter().map(|(_, score)| score).sum();
        ((sum as f64 / present.len() as f64).round() as i32, true)
    };

    // Strict less-than keeps the first occurrence on ties (std min_by_key
    // would keep the last).
    let mut weakest: Option<(Pillar, i32)> = None;
    for (pillar, score) in &present {
        if weakest.map_or(true, |(_, best)| *score < best) {
            weakest = Some((*pillar, *score));
        }
    }
    let weakest = weakest.map(|(pillar, _)| pillar);

    FourBScore {
        brain: pillars.brain,
        body: pillars.body,
        bat: pillars.bat,
        ball: pillars.ball,
        composite,
        grade: config.grade_scale.grade_for(composite).to_string(),
        weakest,
        partial,
    }
}
