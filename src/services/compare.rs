//! Peer comparison against cohort reference thresholds.
//!
//! A subject's aggregate metrics (average exit velocity, barrel rate, and
//! so on) are compared against a cohort table keyed by a coarse level label
//! ("youth", "high_school", ...). A level with no cohort data yields an
//! explicit no-comparison result rather than a silent zero delta.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cohort benchmark table: level label -> metric name -> reference value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortReference {
    benchmarks: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CohortReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one benchmark value for a level.
    pub fn set_benchmark(
        &mut self,
        level: impl Into<String>,
        metric: impl Into<String>,
        value: f64,
    ) {
        self.benchmarks
            .entry(level.into())
            .or_default()
            .insert(metric.into(), value);
    }

    /// Level labels with any benchmark data, sorted.
    pub fn levels(&self) -> Vec<&str> {
        self.benchmarks.keys().map(|k| k.as_str()).collect()
    }

    fn metrics_for(&self, level: &str) -> Option<&BTreeMap<String, f64>> {
        self.benchmarks.get(level)
    }
}

/// Signed difference for one metric: subject minus cohort reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerDelta {
    pub metric: String,
    pub subject_value: f64,
    pub cohort_value: f64,
    pub delta: f64,
}

/// Comparison of one subject's metrics against a cohort level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerComparison {
    pub level: String,
    pub deltas: Vec<PeerDelta>,
}

/// Compare subject metrics against a cohort level.
///
/// Returns `None` when the cohort reference has no data for that level —
/// "no comparison available", never fabricated zeros. Metrics missing from
/// either side are left out of the delta list.
pub fn compare_to_cohort(
    subject_metrics: &BTreeMap<String, f64>,
    level: &str,
    cohort: &CohortReference,
) -> Option<PeerComparison> {
    let reference = cohort.metrics_for(level)?;

    let deltas: Vec<PeerDelta> = subject_metrics
        .iter()
        .filter_map(|(metric, subject_value)| {
            reference.get(metric).map(|cohort_value| PeerDelta {
                metric: metric.clone(),
                subject_value: *subject_value,
                cohort_value: *cohort_value,
                delta: subject_value - cohort_value,
            })
        })
        .collect();

    Some(PeerComparison {
        level: level.to_string(),
        deltas,
    })
}
