//! Cross-source score validation.
//!
//! Two independent measurement pipelines score the same subjects; this
//! module joins their composite scores on exact (subject, date) keys and
//! reports how well they agree. Join misses are not errors: they are
//! excluded from the pairing and surfaced as unmatched counts so callers
//! can judge coverage.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::algorithms::stats;
use crate::api::PlayerId;

/// Agreement bucket for one reconciled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyTier {
    /// Delta below 5 points.
    High,
    /// Delta in [5, 10).
    Medium,
    /// Delta of 10 or more.
    Low,
}

impl AccuracyTier {
    fn for_delta(delta: i32) -> Self {
        if delta < 5 {
            AccuracyTier::High
        } else if delta < 10 {
            AccuracyTier::Medium
        } else {
            AccuracyTier::Low
        }
    }
}

/// One pipeline's composite score for a subject on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub subject: PlayerId,
    pub date: NaiveDate,
    pub composite: i32,
}

/// Reconciliation of two composites for one (subject, date) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub subject: PlayerId,
    pub date: NaiveDate,
    pub composite_a: i32,
    pub composite_b: i32,
    pub delta: i32,
    pub tier: AccuracyTier,
}

/// Aggregate cross-source agreement report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSourceReport {
    pub matched: Vec<ValidationRecord>,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub mean_delta: f64,
    /// N best-agreeing pairs for spot checks.
    pub smallest_deltas: Vec<ValidationRecord>,
    /// N worst-agreeing pairs for spot checks.
    pub largest_deltas: Vec<ValidationRecord>,
    /// Records in pipeline A with no (subject, date) partner in B.
    pub unmatched_a: usize,
    /// Records in pipeline B with no (subject, date) partner in A.
    pub unmatched_b: usize,
}

/// Join two score collections and build the agreement report.
///
/// Matching is exact on (subject, date) — no fuzzy date windows. When a
/// side carries duplicate keys the first record wins and later ones count
/// as unmatched. `spot_check_n` bounds the smallest/largest delta lists.
pub fn build_cross_source_report(
    pipeline_a: &[ScoreRecord],
    pipeline_b: &[ScoreRecord],
    spot_check_n: usize,
) -> CrossSourceReport {
    let mut b_by_key: HashMap<(PlayerId, NaiveDate), &ScoreRecord> = HashMap::new();
    for record in pipeline_b {
        b_by_key
            .entry((record.subject.clone(), record.date))
            .or_insert(record);
    }

    let mut matched = Vec::new();
    let mut unmatched_a = 0usize;
    let mut matched_b_keys: std::collections::HashSet<(PlayerId, NaiveDate)> =
        std::collections::HashSet::new();

    for record in pipeline_a {
        let key = (record.subject.clone(), record.date);
        if matched_b_keys.contains(&key) {
            // Duplicate key on the A side; its partner is already taken.
            unmatched_a += 1;
            continue;
        }
        match b_by_key.get(&key) {
            Some(partner) => {
                let delta = (record.composite - partner.composite).abs();
                matched.push(ValidationRecord {
                    subject: record.subject.clone(),
                    date: record.date,
                    composite_a: record.composite,
                    composite_b: partner.composite,
                    delta,
                    tier: AccuracyTier::for_delta(delta),
                });
                matched_b_keys.insert(key);
            }
            None => {
                debug!("no pipeline-B score for {} on {}", record.subject, record.date);
                unmatched_a += 1;
            }
        }
    }

    // Every B record that found no A partner, duplicates included.
    let unmatched_b = pipeline_b.len() - matched.len();

    let high_count = matched
        .iter()
        .filter(|r| r.tier == AccuracyTier::High)
        .count();
    let medium_count = matched
        .iter()
        .filter(|r| r.tier == AccuracyTier::Medium)
        .count();
    let low_count = matched
        .iter()
        .filter(|r| r.tier == AccuracyTier::Low)
        .count();

    let deltas: Vec<f64> = matched.iter().map(|r| r.delta as f64).collect();
    let mean_delta = stats::mean(&deltas);

    let mut by_delta = matched.clone();
    by_delta.sort_by_key(|r| r.delta);
    let smallest_deltas: Vec<ValidationRecord> =
        by_delta.iter().take(spot_check_n).cloned().collect();
    let largest_deltas: Vec<ValidationRecord> = by_delta
        .iter()
        .rev()
        .take(spot_check_n)
        .cloned()
        .collect();

    CrossSourceReport {
        matched,
        high_count,
        medium_count,
        low_count,
        mean_delta,
        smallest_deltas,
        largest_deltas,
        unmatched_a,
        unmatched_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, day: u32, composite: i32) -> ScoreRecord {
        ScoreRecord {
            subject: PlayerId::new(subject),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            composite,
        }
    }

    #[test]
    fn test_scenario_delta_three_is_high() {
        let a = vec![record("p1", 1, 72)];
        let b = vec![record("p1", 1, 69)];
        let report = build_cross_source_report(&a, &b, 5);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.matched[0].delta, 3);
        assert_eq!(report.matched[0].tier, AccuracyTier::High);
        assert_eq!(report.high_count, 1);
        assert_eq!(report.mean_delta, 3.0);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(AccuracyTier::for_delta(0), AccuracyTier::High);
        assert_eq!(AccuracyTier::for_delta(4), AccuracyTier::High);
        assert_eq!(AccuracyTier::for_delta(5), AccuracyTier::Medium);
        assert_eq!(AccuracyTier::for_delta(9), AccuracyTier::Medium);
        assert_eq!(AccuracyTier::for_delta(10), AccuracyTier::Low);
        assert_eq!(AccuracyTier::for_delta(40), AccuracyTier::Low);
    }

    #[test]
    fn test_unmatched_records_reported_not_dropped_silently() {
        let a = vec![record("p1", 1, 60), record("p2", 1, 55)];
        let b = vec![record("p1", 1, 58), record("p3", 2, 70)];
        let report = build_cross_source_report(&a, &b, 5);
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.unmatched_a, 1);
        assert_eq!(report.unmatched_b, 1);
    }

    #[test]
    fn test_exact_date_join_only() {
        // Same subject, adjacent dates: must not match.
        let a = vec![record("p1", 1, 60)];
        let b = vec![record("p1", 2, 60)];
        let report = build_cross_source_report(&a, &b, 5);
        assert!(report.matched.is_empty());
        assert_eq!(report.unmatched_a, 1);
        assert_eq!(report.unmatched_b, 1);
    }

    #[test]
    fn test_spot_check_lists() {
        let a = vec![
            record("p1", 1, 60),
            record("p2", 1, 60),
            record("p3", 1, 60),
        ];
        let b = vec![
            record("p1", 1, 59), // delta 1
            record("p2", 1, 52), // delta 8
            record("p3", 1, 40), // delta 20
        ];
        let report = build_cross_source_report(&a, &b, 2);
        let small: Vec<i32> = report.smallest_deltas.iter().map(|r| r.delta).collect();
        let large: Vec<i32> = report.largest_deltas.iter().map(|r| r.delta).collect();
        assert_eq!(small, vec![1, 8]);
        assert_eq!(large, vec![20, 8]);
        assert_eq!(report.high_count, 1);
        assert_eq!(report.medium_count, 1);
        assert_eq!(report.low_count, 1);
        assert!((report.mean_delta - 29.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs() {
        let report = build_cross_source_report(&[], &[], 3);
        assert!(report.matched.is_empty());
        assert_eq!(report.mean_delta, 0.0);
        assert_eq!(report.unmatched_a, 0);
        assert_eq!(report.unmatched_b, 0);
    }
}
