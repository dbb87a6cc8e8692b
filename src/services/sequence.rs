//! Kinetic-chain sequence analysis.
//!
//! A good swing fires from the ground up: rear leg, lead leg, torso, bottom
//! arm, top arm, bat. Given each segment's scalar time series this module
//! extracts peak-activation timing, compares the observed firing order to
//! that ideal reference order, scores the ordering by inversion counting,
//! and classifies named sequencing defects for coaching overlays.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithms::inversions::{count_inversions, max_inversions};
use crate::algorithms::stats;

/// Body segments of the kinetic chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    RearLeg,
    LeadLeg,
    Torso,
    BottomArm,
    TopArm,
    Bat,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Segment::RearLeg => "rear_leg",
            Segment::LeadLeg => "lead_leg",
            Segment::Torso => "torso",
            Segment::BottomArm => "bottom_arm",
            Segment::TopArm => "top_arm",
            Segment::Bat => "bat",
        };
        write!(f, "{}", name)
    }
}

/// The fixed ideal firing order, ground up.
pub const IDEAL_ORDER: [Segment; 6] = [
    Segment::RearLeg,
    Segment::LeadLeg,
    Segment::Torso,
    Segment::BottomArm,
    Segment::TopArm,
    Segment::Bat,
];

/// What the trace's scalar values represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// Kinetic energy (or any magnitude signal): peaks are read directly.
    Energy,
    /// Angular position: the series is differentiated first so the peak is
    /// taken from the velocity magnitude.
    Position,
}

/// One segment's sampled time series.
///
/// `timestamps` and `values` are parallel arrays; samples are expected at
/// uniform intervals but only ordering actually matters here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTrace {
    pub segment: Segment,
    pub kind: SignalKind,
    pub timestamps: Vec<f64>,
    pub values: Vec<f64>,
}

/// Observed peak activation for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPeak {
    pub segment: Segment,
    pub peak_time: f64,
    pub peak_value: f64,
}

/// Named ordering defects. Evaluated independently; several may fire on
/// one swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceDefect {
    /// Torso fires before either leg segment.
    EarlyTorso,
    /// Either leg fires later than third in the observed order.
    LateLegs,
    /// Either arm fires before the torso.
    ArmsBeforeTorso,
    /// The bat is not the last segment to peak.
    BatDrag,
    /// Meta-flag: three or more of the above fired.
    NoClearSequence,
}

/// Per-swing kinetic-chain ordering result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingSequenceAnalysis {
    pub ideal_order: Vec<Segment>,
    pub peaks: Vec<SegmentPeak>,
    /// Segments sorted ascending by observed peak time.
    pub actual_order: Vec<Segment>,
    /// True iff the actual order equals the full ideal order exactly.
    pub sequence_match: bool,
    pub inversions: usize,
    /// 0-100; 100 iff zero inversions.
    pub score: i32,
    pub defects: Vec<SequenceDefect>,
}

/// Extract the peak activation from one trace.
///
/// Energy signals peak at their maximum absolute value. Position signals
/// are numerically differentiated (forward difference) and the peak is
/// taken from the derivative's magnitude; a position trace too short to
/// differentiate falls back to its raw values. Empty traces yield `None`.
fn extract_peak(trace: &SegmentTrace) -> Option<SegmentPeak> {
    let n = trace.timestamps.len().min(trace.values.len());
    if n == 0 {
        debug!("empty trace for segment {}, skipping", trace.segment);
        return None;
    }

    let (times, magnitudes): (Vec<f64>, Vec<f64>) = match trace.kind {
        SignalKind::Energy => (
            trace.timestamps[..n].to_vec(),
            trace.values[..n].iter().map(|v| v.abs()).collect(),
        ),
        SignalKind::Position => {
            if n < 2 {
                debug!(
                    "position trace for {} has {} sample(s), using raw values",
                    trace.segment, n
                );
                (
                    trace.timestamps[..n].to_vec(),
                    trace.values[..n].iter().map(|v| v.abs()).collect(),
                )
            } else {
                let mut times = Vec::with_capacity(n - 1);
                let mut magnitudes = Vec::with_capacity(n - 1);
                for i in 0..n - 1 {
                    let dt = trace.timestamps[i + 1] - trace.timestamps[i];
                    let rate = if dt != 0.0 {
                        (trace.values[i + 1] - trace.values[i]) / dt
                    } else {
                        0.0
                    };
                    times.push(trace.timestamps[i]);
                    magnitudes.push(rate.abs());
                }
                (times, magnitudes)
            }
        }
    };

    let mut best = 0;
    for i in 1..magnitudes.len() {
        if magnitudes[i] > magnitudes[best] {
            best = i;
        }
    }

    Some(SegmentPeak {
        segment: trace.segment,
        peak_time: times[best],
        peak_value: magnitudes[best],
    })
}

fn position_of(order: &[Segment], segment: Segment) -> Option<usize> {
    order.iter().position(|s| *s == segment)
}

/// Classify ordering defects on the observed firing order.
fn classify_defects(actual: &[Segment]) -> Vec<SequenceDefect> {
    let mut defects = Vec::new();
    if actual.is_empty() {
        return defects;
    }

    let torso = position_of(actual, Segment::Torso);
    let rear_leg = position_of(actual, Segment::RearLeg);
    let lead_leg = position_of(actual, Segment::LeadLeg);
    let bottom_arm = position_of(actual, Segment::BottomArm);
    let top_arm = position_of(actual, Segment::TopArm);

    if let Some(t) = torso {
        let before_rear = rear_leg.map_or(false, |leg| t < leg);
        let before_lead = lead_leg.map_or(false, |leg| t < leg);
        if before_rear || before_lead {
            defects.push(SequenceDefect::EarlyTorso);
        }
    }

    let rear_late = rear_leg.map_or(false, |p| p > 2);
    let lead_late = lead_leg.map_or(false, |p| p > 2);
    if rear_late || lead_late {
        defects.push(SequenceDefect::LateLegs);
    }

    if let Some(t) = torso {
        let bottom_early = bottom_arm.map_or(false, |p| p < t);
        let top_early = top_arm.map_or(false, |p| p < t);
        if bottom_early || top_early {
            defects.push(SequenceDefect::ArmsBeforeTorso);
        }
    }

    if actual.last() != Some(&Segment::Bat) {
        defects.push(SequenceDefect::BatDrag);
    }

    if defects.len() >= 3 {
        defects.push(SequenceDefect::NoClearSequence);
    }

    defects
}

/// Analyze one swing's kinetic sequence from its segment traces.
///
/// Segments with empty traces are skipped rather than failing the whole
/// analysis. With zero usable segments the result is a neutral empty
/// analysis (score 0, no match, no defects); with one segment there are no
/// rankable pairs, so zero inversions score 100 by definition.
pub fn analyze_sequence(traces: &[SegmentTrace]) -> SwingSequenceAnalysis {
    let mut peaks: Vec<SegmentPeak> = traces.iter().filter_map(extract_peak).collect();

    // Stable sort: simultaneous peaks keep their input order.
    peaks.sort_by(|a, b| {
        a.peak_time
            .partial_cmp(&b.peak_time)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let actual_order: Vec<Segment> = peaks.iter().map(|p| p.segment).collect();

    if actual_order.is_empty() {
        return SwingSequenceAnalysis {
            ideal_order: IDEAL_ORDER.to_vec(),
            peaks,
            actual_order,
            sequence_match: false,
            inversions: 0,
            score: 0,
            defects: Vec::new(),
        };
    }

    let inversions = count_inversions(&IDEAL_ORDER, &actual_order);
    let max = max_inversions(actual_order.len());
    let score = if max == 0 {
        100
    } else {
        (100.0 * (1.0 - inversions as f64 / max as f64)).round() as i32
    };

    let sequence_match = actual_order == IDEAL_ORDER;
    let defects = classify_defects(&actual_order);

    SwingSequenceAnalysis {
        ideal_order: IDEAL_ORDER.to_vec(),
        peaks,
        actual_order,
        sequence_match,
        inversions,
        score,
        defects,
    }
}

/// Brain-pillar consistency score over a set of per-swing sequence scores.
///
/// A 20-80 score decreasing in the coefficient of variation of the
/// per-swing scores: tight, repeatable sequencing grades high. A zero mean
/// defines the coefficient of variation as 0, so degenerate input reads as
/// neutral-high rather than dividing by zero.
pub fn brain_consistency_score(sequence_scores: &[i32]) -> i32 {
    let values: Vec<f64> = sequence_scores.iter().map(|s| *s as f64).collect();
    let cv = stats::coefficient_of_variation(&values);
    (80.0 - 120.0 * cv).round().clamp(20.0, 80.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Energy trace peaking at `peak_time` over a 0..=5 sample grid.
    fn energy_trace(segment: Segment, peak_time: f64) -> SegmentTrace {
        let timestamps: Vec<f64> = (0..=5).map(|i| i as f64).collect();
        let values = timestamps
            .iter()
            .map(|t| 10.0 - (t - peak_time).abs())
            .collect();
        SegmentTrace {
            segment,
            kind: SignalKind::Energy,
            timestamps,
            values,
        }
    }

    fn traces_in_order(order: &[Segment]) -> Vec<SegmentTrace> {
        order
            .iter()
            .enumerate()
            .map(|(i, segment)| energy_trace(*segment, i as f64))
            .collect()
    }

    #[test]
    fn test_perfect_sequence() {
        let analysis = analyze_sequence(&traces_in_order(&IDEAL_ORDER));
        assert_eq!(analysis.actual_order, IDEAL_ORDER.to_vec());
        assert!(analysis.sequence_match);
        assert_eq!(analysis.inversions, 0);
        assert_eq!(analysis.score, 100);
        assert!(analysis.defects.is_empty());
    }

    #[test]
    fn test_full_reversal_scores_zero() {
        let mut reversed = IDEAL_ORDER.to_vec();
        reversed.reverse();
        let analysis = analyze_sequence(&traces_in_order(&reversed));
        assert_eq!(analysis.inversions, 15);
        assert_eq!(analysis.score, 0);
        assert!(!analysis.sequence_match);
        // Every root-cause defect fires, plus the meta-flag.
        assert!(analysis.defects.contains(&SequenceDefect::EarlyTorso));
        assert!(analysis.defects.contains(&SequenceDefect::LateLegs));
        assert!(analysis.defects.contains(&SequenceDefect::ArmsBeforeTorso));
        assert!(analysis.defects.contains(&SequenceDefect::BatDrag));
        assert!(analysis.defects.contains(&SequenceDefect::NoClearSequence));
    }

    #[test]
    fn test_single_swap_partial_score() {
        // Swap torso and lead leg: one inversion out of fifteen.
        let order = [
            Segment::RearLeg,
            Segment::Torso,
            Segment::LeadLeg,
            Segment::BottomArm,
            Segment::TopArm,
            Segment::Bat,
        ];
        let analysis = analyze_sequence(&traces_in_order(&order));
        assert_eq!(analysis.inversions, 1);
        assert_eq!(analysis.score, 93);
        assert!(!analysis.sequence_match);
        assert_eq!(analysis.defects, vec![SequenceDefect::EarlyTorso]);
    }

    #[test]
    fn test_bat_drag_detected() {
        let order = [
            Segment::RearLeg,
            Segment::LeadLeg,
            Segment::Torso,
            Segment::BottomArm,
            Segment::Bat,
            Segment::TopArm,
        ];
        let analysis = analyze_sequence(&traces_in_order(&order));
        assert!(analysis.defects.contains(&SequenceDefect::BatDrag));
        assert!(!analysis.defects.contains(&SequenceDefect::NoClearSequence));
    }

    #[test]
    fn test_upper_body_first_fires_meta_flag() {
        // Arms and torso all before the legs; bat still last.
        let order = [
            Segment::BottomArm,
            Segment::TopArm,
            Segment::Torso,
            Segment::RearLeg,
            Segment::LeadLeg,
            Segment::Bat,
        ];
        let analysis = analyze_sequence(&traces_in_order(&order));
        assert!(analysis.defects.contains(&SequenceDefect::EarlyTorso));
        assert!(analysis.defects.contains(&SequenceDefect::LateLegs));
        assert!(analysis.defects.contains(&SequenceDefect::ArmsBeforeTorso));
        assert!(!analysis.defects.contains(&SequenceDefect::BatDrag));
        // Three root causes already fired, so the meta-flag joins them.
        assert!(analysis.defects.contains(&SequenceDefect::NoClearSequence));
    }

    #[test]
    fn test_position_trace_differentiated() {
        // Angular position ramps fastest between t=1 and t=2, so the
        // velocity peak lands at t=1 even though the raw maximum is at the
        // end of the series.
        let trace = SegmentTrace {
            segment: Segment::Torso,
            kind: SignalKind::Position,
            timestamps: vec![0.0, 1.0, 2.0, 3.0],
            values: vec![0.0, 10.0, 40.0, 50.0],
        };
        let peak = extract_peak(&trace).unwrap();
        assert_eq!(peak.peak_time, 1.0);
        assert_eq!(peak.peak_value, 30.0);
    }

    #[test]
    fn test_peak_uses_absolute_value() {
        let trace = SegmentTrace {
            segment: Segment::Bat,
            kind: SignalKind::Energy,
            timestamps: vec![0.0, 1.0, 2.0],
            values: vec![5.0, -20.0, 3.0],
        };
        let peak = extract_peak(&trace).unwrap();
        assert_eq!(peak.peak_time, 1.0);
        assert_eq!(peak.peak_value, 20.0);
    }

    #[test]
    fn test_empty_traces_skipped() {
        let mut traces = traces_in_order(&IDEAL_ORDER);
        traces[5].timestamps.clear();
        traces[5].values.clear();
        let analysis = analyze_sequence(&traces);
        assert_eq!(analysis.actual_order.len(), 5);
        assert!(!analysis.sequence_match);
        // Five segments in ideal relative order: still zero inversions.
        assert_eq!(analysis.inversions, 0);
        assert_eq!(analysis.score, 100);
        // The bat never peaked, so the last observed segment is not the bat.
        assert!(analysis.defects.contains(&SequenceDefect::BatDrag));
    }

    #[test]
    fn test_no_traces_neutral_result() {
        let analysis = analyze_sequence(&[]);
        assert_eq!(analysis.score, 0);
        assert!(!analysis.sequence_match);
        assert!(analysis.actual_order.is_empty());
        assert!(analysis.defects.is_empty());
    }

    #[test]
    fn test_consistency_score_decreases_with_spread() {
        let tight = brain_consistency_score(&[90, 92, 91, 89]);
        let loose = brain_consistency_score(&[100, 20, 80, 40]);
        assert!(tight > loose);
        assert!((20..=80).contains(&tight));
        assert!((20..=80).contains(&loose));
    }

    #[test]
    fn test_consistency_identical_scores_max() {
        assert_eq!(brain_consistency_score(&[87, 87, 87]), 80);
    }

    #[test]
    fn test_consistency_zero_mean_neutral() {
        assert_eq!(brain_consistency_score(&[0, 0, 0]), 80);
        assert_eq!(brain_consistency_score(&[]), 80);
    }

    #[test]
    fn test_serde_round_trip() {
        let analysis = analyze_sequence(&traces_in_order(&IDEAL_ORDER));
        let json = serde_json::to_string(&analysis).unwrap();
        let back: SwingSequenceAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, back);
    }
}
