//! Stage 4: least-squares trend fitting and one-step forecasting.

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::models::{TrendDirection, Vital, VitalPrediction, VitalReading};

/// Ordinary least-squares fit over one vital's recent samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, 0 (no fit) to 1 (perfect fit).
    pub r_squared: f64,
    pub direction: TrendDirection,
    /// Extrapolation one tick beyond the fitted window, floored at zero.
    pub forecast: f64,
    pub samples: usize,
}

impl TrendFit {
    pub fn prediction(&self) -> VitalPrediction {
        VitalPrediction {
            value: self.forecast,
            direction: self.direction,
            confidence: self.r_squared,
        }
    }
}

/// Fits a trend for every vital with at least 2 present samples in the
/// window.
///
/// Samples are regressed against their index: real sampling intervals are
/// irregular but treated as uniform ticks, which keeps the forecast a
/// simple "one more reading from now". The raw present values are used
/// rather than the smoothed track — an EWMA-lagged input would bias both
/// the fit quality and the extrapolation (see DESIGN.md).
pub fn fit_all(readings: &[VitalReading], config: &AnalysisConfig) -> BTreeMap<Vital, TrendFit> {
    let mut fits = BTreeMap::new();
    for vital in Vital::ALL {
        let values: Vec<f64> = readings.iter().filter_map(|r| r.value(vital)).collect();
        let start = values.len().saturating_sub(config.trend_window);
        let window = &values[start..];
        if window.len() < 2 {
            continue;
        }
        fits.insert(vital, fit(window, config.trend_epsilon));
    }
    fits
}

fn fit(values: &[f64], epsilon: f64) -> TrendFit {
    let n = values.len();
    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    // n >= 2 guarantees sxx > 0 for index-based x.
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let fitted = intercept + slope * i as f64;
        ss_res += (y - fitted) * (y - fitted);
        ss_tot += (y - y_mean) * (y - y_mean);
    }
    let r_squared = if ss_res < 1e-12 {
        // Perfect fit, including the constant-series case where ss_tot is 0.
        1.0
    } else if ss_tot < 1e-12 {
        0.0
    } else {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    };

    let direction = if slope > epsilon {
        TrendDirection::Increasing
    } else if slope < -epsilon {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let forecast = (intercept + slope * n_f).max(0.0);

    TrendFit {
        slope,
        intercept,
        r_squared,
        direction,
        forecast,
        samples: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn hr_series(values: &[f64]) -> Vec<VitalReading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut r = VitalReading::at(Utc.timestamp_opt(i as i64 * 300, 0).unwrap());
                r.heart_rate = Some(v);
                r
            })
            .collect()
    }

    #[test]
    fn perfectly_linear_series_fits_exactly() {
        let config = AnalysisConfig::default();
        let readings = hr_series(&[60.0, 65.0, 70.0, 75.0, 80.0]);
        let fits = fit_all(&readings, &config);
        let fit = &fits[&Vital::HeartRate];

        assert_eq!(fit.r_squared, 1.0);
        assert_eq!(fit.direction, TrendDirection::Increasing);
        assert!((fit.slope - 5.0).abs() < 1e-9);
        assert!((fit.forecast - 85.0).abs() < 1e-9);
    }

    #[test]
    fn declining_series_forecasts_below_its_last_value() {
        let config = AnalysisConfig::default();
        let readings = hr_series(&[96.0, 94.0, 92.0, 90.0, 88.0]);
        let fits = fit_all(&readings, &config);
        let fit = &fits[&Vital::HeartRate];
        assert_eq!(fit.direction, TrendDirection::Decreasing);
        assert!(fit.forecast < 88.0);
    }

    #[test]
    fn constant_series_is_stable_with_full_confidence() {
        let config = AnalysisConfig::default();
        let readings = hr_series(&[72.0; 8]);
        let fit = &fit_all(&readings, &config)[&Vital::HeartRate];
        assert_eq!(fit.direction, TrendDirection::Stable);
        assert_eq!(fit.r_squared, 1.0);
        assert!((fit.forecast - 72.0).abs() < 1e-9);
    }

    #[test]
    fn noisy_series_reports_partial_confidence() {
        let config = AnalysisConfig::default();
        let readings = hr_series(&[70.0, 85.0, 68.0, 90.0, 74.0, 88.0]);
        let fit = &fit_all(&readings, &config)[&Vital::HeartRate];
        assert!(fit.r_squared > 0.0 && fit.r_squared < 0.9);
    }

    #[test]
    fn window_caps_the_samples_used() {
        let config = AnalysisConfig {
            trend_window: 3,
            ..AnalysisConfig::default()
        };
        // Early chaos followed by a clean linear tail; only the tail is fitted.
        let readings = hr_series(&[120.0, 40.0, 110.0, 60.0, 65.0, 70.0]);
        let fit = &fit_all(&readings, &config)[&Vital::HeartRate];
        assert_eq!(fit.samples, 3);
        assert_eq!(fit.r_squared, 1.0);
        assert!((fit.forecast - 75.0).abs() < 1e-9);
    }

    #[test]
    fn single_sample_yields_no_fit() {
        let config = AnalysisConfig::default();
        let readings = hr_series(&[72.0]);
        assert!(fit_all(&readings, &config).is_empty());
    }

    #[test]
    fn absent_samples_are_skipped_not_zeroed() {
        let config = AnalysisConfig::default();
        let mut readings = hr_series(&[60.0, 65.0, 70.0]);
        let mut gap = VitalReading::at(Utc.timestamp_opt(10_000, 0).unwrap());
        gap.spo2 = Some(97.0);
        readings.insert(1, gap);
        let fit = &fit_all(&readings, &config)[&Vital::HeartRate];
        assert_eq!(fit.samples, 3);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn forecast_is_floored_at_zero() {
        let fit = fit(&[4.0, 2.0, 0.0], 0.01);
        assert_eq!(fit.forecast, 0.0);
    }
}
