//! Stage 2: per-vital threshold and z-score evaluation.

use std::collections::BTreeMap;

use crate::config::{AnalysisConfig, ReferenceRange};
use crate::models::{Vital, VitalReading};

use super::smoothing::SmoothedSeries;

/// Anomaly assessment for one vital.
///
/// The threshold flag and the z-score magnitude contribute to severity
/// independently: a value can be statistically unusual without crossing
/// the hard clinical threshold, and vice versa.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalAssessment {
    pub present: bool,
    pub threshold_breach: bool,
    /// Standard deviations from the population mean, clipped to ±z_clip.
    pub z_score: f64,
    /// The value the threshold flag was evaluated against.
    pub observed: Option<f64>,
}

impl VitalAssessment {
    fn absent() -> Self {
        Self {
            present: false,
            threshold_breach: false,
            z_score: 0.0,
            observed: None,
        }
    }
}

/// Threshold flag and clipped z-score for a single value.
pub fn assess_value(value: f64, range: &ReferenceRange, z_clip: f64) -> (bool, f64) {
    let breach = value < range.critical_low || value > range.critical_high;
    let z = ((value - range.mean) / range.stddev).clamp(-z_clip, z_clip);
    (breach, z)
}

/// Assesses the current state of every vital.
///
/// The threshold flag is evaluated against the most recent raw observation
/// of the vital (falling back to the smoothed current value when the latest
/// reading omits it); the z-score is evaluated against the smoothed current
/// value, which stands in for "where the patient is now" once single-reading
/// noise has been damped.
pub fn assess_current(
    readings: &[VitalReading],
    smoothed: &SmoothedSeries,
    config: &AnalysisConfig,
) -> BTreeMap<Vital, VitalAssessment> {
    let latest = readings.last();
    let mut assessments = BTreeMap::new();
    for vital in Vital::ALL {
        let Some(smoothed_current) = smoothed.current(vital) else {
            assessments.insert(vital, VitalAssessment::absent());
            continue;
        };
        let observed = latest
            .and_then(|r| r.value(vital))
            .unwrap_or(smoothed_current);
        let range = config.ranges.get(vital);
        let (breach, _) = assess_value(observed, range, config.z_clip);
        let (_, z) = assess_value(smoothed_current, range, config.z_clip);
        assessments.insert(
            vital,
            VitalAssessment {
                present: true,
                threshold_breach: breach,
                z_score: z,
                observed: Some(observed),
            },
        );
    }
    assessments
}
