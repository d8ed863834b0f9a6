//! Stage 3: per-vital exponentially weighted moving average.

use std::collections::BTreeMap;

use crate::models::{Vital, VitalReading};

/// EWMA tracks for every vital with at least one present sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SmoothedSeries {
    tracks: BTreeMap<Vital, Vec<f64>>,
}

impl SmoothedSeries {
    /// The full smoothed track for a vital, one entry per present sample.
    pub fn track(&self, vital: Vital) -> Option<&[f64]> {
        self.tracks.get(&vital).map(Vec::as_slice)
    }

    /// The current smoothed value: the last entry of the track. Gaps in
    /// the series carry the previous smoothed value forward, so this is
    /// defined as soon as the vital has been measured once.
    pub fn current(&self, vital: Vital) -> Option<f64> {
        self.tracks.get(&vital).and_then(|t| t.last().copied())
    }

    pub fn sample_count(&self, vital: Vital) -> usize {
        self.tracks.get(&vital).map_or(0, Vec::len)
    }
}

/// Runs the EWMA recurrence left-to-right over a chronological series.
///
/// `S_0 = v_0`, then `S_t = alpha * v_t + (1 - alpha) * S_{t-1}` for each
/// subsequent present sample. Readings where the vital is absent do not
/// update the track; a gap is never treated as a zero.
pub fn smooth(readings: &[VitalReading], alpha: f64) -> SmoothedSeries {
    let mut tracks: BTreeMap<Vital, Vec<f64>> = BTreeMap::new();
    for reading in readings {
        for vital in Vital::ALL {
            let Some(value) = reading.value(vital) else {
                continue;
            };
            let track = tracks.entry(vital).or_default();
            let next = match track.last() {
                Some(prev) => alpha * value + (1.0 - alpha) * prev,
                None => value,
            };
            track.push(next);
        }
    }
    SmoothedSeries { tracks }
}
