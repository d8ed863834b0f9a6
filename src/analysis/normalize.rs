//! Stage 1: input sanitization and chronological ordering.

use crate::models::{Vital, VitalReading};

/// Returns a cleaned, chronologically ascending copy of the caller's series.
///
/// Callers may hand the series most-recent-first (how record history is
/// usually retrieved) or oldest-first; the stable sort normalizes either,
/// preserving input order for equal timestamps. Non-finite or negative
/// field values are dropped as "not measured" per field, so one bad field
/// never invalidates the rest of the reading. The caller's slice is never
/// mutated.
pub fn normalize(series: &[VitalReading]) -> Vec<VitalReading> {
    let mut readings: Vec<VitalReading> = series.iter().map(sanitize).collect();
    readings.sort_by_key(|r| r.recorded_at);
    readings
}

fn sanitize(reading: &VitalReading) -> VitalReading {
    let mut clean = reading.clone();
    for vital in Vital::ALL {
        if let Some(value) = clean.value(vital) {
            if !value.is_finite() || value < 0.0 {
                clean.set_value(vital, None);
            }
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(secs: i64, hr: Option<f64>, spo2: Option<f64>) -> VitalReading {
        let mut r = VitalReading::at(Utc.timestamp_opt(secs, 0).unwrap());
        r.heart_rate = hr;
        r.spo2 = spo2;
        r
    }

    #[test]
    fn reorders_most_recent_first_input() {
        let series = vec![
            reading(300, Some(80.0), None),
            reading(200, Some(75.0), None),
            reading(100, Some(70.0), None),
        ];
        let normalized = normalize(&series);
        let times: Vec<i64> = normalized
            .iter()
            .map(|r| r.recorded_at.timestamp())
            .collect();
        assert_eq!(times, vec![100, 200, 300]);
        // Caller's series is untouched.
        assert_eq!(series[0].recorded_at.timestamp(), 300);
    }

    #[test]
    fn drops_nan_and_negative_fields_independently() {
        let series = vec![reading(100, Some(f64::NAN), Some(97.0)), reading(200, Some(-10.0), Some(f64::INFINITY))];
        let normalized = normalize(&series);
        assert_eq!(normalized[0].heart_rate, None);
        assert_eq!(normalized[0].spo2, Some(97.0));
        assert_eq!(normalized[1].heart_rate, None);
        assert_eq!(normalized[1].spo2, None);
    }

    #[test]
    fn stable_sort_preserves_order_of_equal_timestamps() {
        let series = vec![
            reading(100, Some(60.0), None),
            reading(100, Some(61.0), None),
        ];
        let normalized = normalize(&series);
        assert_eq!(normalized[0].heart_rate, Some(60.0));
        assert_eq!(normalized[1].heart_rate, Some(61.0));
    }

    #[test]
    fn empty_series_stays_empty() {
        assert!(normalize(&[]).is_empty());
    }
}
