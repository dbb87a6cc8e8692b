//! Scoring services: the engines that turn normalized measurements into
//! session statistics, pillar scores, composites, sequence analyses, and
//! reconciliation reports.

pub mod compare;
pub mod composite;
pub mod pillars;
pub mod sequence;
pub mod session;
pub mod validation;

pub use compare::compare_to_cohort;
pub use composite::compute_four_b_score;
pub use pillars::{batted_ball_type, contact_score, is_barrel, is_hard_hit, is_sweet_spot};
pub use sequence::{analyze_sequence, brain_consistency_score};
pub use session::compute_session_stats;
pub use validation::build_cross_source_report;
