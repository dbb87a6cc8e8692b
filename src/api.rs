//! Public API surface for the scoring engine.
//!
//! This file consolidates the identifier newtypes and re-exports every DTO
//! the surrounding services consume. All types derive Serialize/Deserialize
//! so results flatten to records for persistence and UI rendering.

pub use crate::config::registry::ConfigVersionInfo;
pub use crate::config::scoring::{ConfigDiffEntry, GradeScale, ScoringConfig};
pub use crate::ingest::detect::{FieldMapping, FormatCategory, FormatDetection};
pub use crate::models::swing::Swing;
pub use crate::models::value::{CellValue, RawRow};
pub use crate::services::compare::{CohortReference, PeerComparison, PeerDelta};
pub use crate::services::composite::{FourBScore, Pillar, PillarScores};
pub use crate::services::pillars::{BattedBallType, ContactBreakdown, ContactScore};
pub use crate::services::sequence::{
    Segment, SegmentPeak, SegmentTrace, SequenceDefect, SignalKind, SwingSequenceAnalysis,
};
pub use crate::services::session::SessionStats;
pub use crate::services::validation::{AccuracyTier, CrossSourceReport, ScoreRecord, ValidationRecord};

use serde::{Deserialize, Serialize};

/// Subject (player) identifier as issued by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

/// Scoring configuration version identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigVersionId(pub u32);

impl PlayerId {
    pub fn new(value: impl Into<String>) -> Self {
        PlayerId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ConfigVersionId {
    pub fn new(value: u32) -> Self {
        ConfigVersionId(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ConfigVersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
