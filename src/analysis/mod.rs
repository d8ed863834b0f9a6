//! The five-stage analysis pipeline.
//!
//! Data flows strictly forward: normalize → anomaly detection → EWMA
//! smoothing → trend fitting → risk aggregation. Every stage is a pure
//! function of its input; the pipeline is re-run from scratch on every
//! invocation and holds no state between calls, so an analyzer can be
//! shared freely across threads.

pub mod anomaly;
pub mod normalize;
pub mod risk;
pub mod smoothing;
pub mod trend;

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::config::AnalysisConfig;
use crate::error::ConfigError;
use crate::models::{AnalysisResult, TrendDirection, Vital, VitalPrediction, VitalReading};

/// Stateless vital-signs risk analyzer.
///
/// Holds only the clinical configuration; each [`analyze`](Self::analyze)
/// call allocates its own intermediate state and discards it with the
/// result. Cost is O(readings) per vital, and callers cap series length
/// well below anything that would make that matter.
#[derive(Debug, Clone)]
pub struct VitalsAnalyzer {
    config: AnalysisConfig,
}

impl Default for VitalsAnalyzer {
    fn default() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }
}

impl VitalsAnalyzer {
    /// Builds an analyzer, rejecting configurations the pipeline cannot
    /// run with (degenerate smoothing constants, inverted bands, bad
    /// reference ranges).
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes one patient's reading series.
    ///
    /// The slice may be in either chronological or most-recent-first
    /// order and is never mutated. Degenerate input (empty series,
    /// unparsable fields) degrades to a conservative stable result;
    /// this method does not fail.
    #[instrument(skip(self, series), fields(readings = series.len()))]
    pub fn analyze(&self, series: &[VitalReading]) -> AnalysisResult {
        let readings = normalize::normalize(series);
        if readings.is_empty() {
            debug!("no readings after normalization");
            return AnalysisResult::no_data();
        }

        let smoothed = smoothing::smooth(&readings, self.config.ewma_alpha);
        let assessments = anomaly::assess_current(&readings, &smoothed, &self.config);
        let fits = trend::fit_all(&readings, &self.config);

        let directions: BTreeMap<Vital, TrendDirection> =
            fits.iter().map(|(&v, f)| (v, f.direction)).collect();

        let can_predict = readings.len() >= self.config.min_readings;
        let predictions: BTreeMap<Vital, VitalPrediction> = if can_predict {
            fits.iter().map(|(&v, f)| (v, f.prediction())).collect()
        } else {
            BTreeMap::new()
        };

        debug!(
            readings = readings.len(),
            fitted_vitals = fits.len(),
            can_predict,
            "aggregating risk"
        );
        risk::aggregate(&assessments, &directions, predictions, can_predict, &self.config)
    }
}

/// Analyzes a series with the default clinical configuration.
pub fn analyze(series: &[VitalReading]) -> AnalysisResult {
    VitalsAnalyzer::default().analyze(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskStatus;
    use chrono::{TimeZone, Utc};

    fn reading(secs: i64) -> VitalReading {
        VitalReading::at(Utc.timestamp_opt(secs, 0).unwrap())
    }

    #[test]
    fn empty_series_returns_the_neutral_result() {
        let result = analyze(&[]);
        assert_eq!(result, AnalysisResult::no_data());
    }

    #[test]
    fn series_of_only_empty_readings_is_treated_as_no_data_risk_wise() {
        // Readings exist but nothing was measured: nothing to flag.
        let series = vec![reading(0), reading(60)];
        let result = analyze(&series);
        assert_eq!(result.status, RiskStatus::Stable);
        assert_eq!(result.risk_score, 0.0);
        assert!(result.predictions.is_empty());
    }

    #[test]
    fn prediction_unlocks_at_the_configured_series_length() {
        let make = |n: usize| -> Vec<VitalReading> {
            (0..n)
                .map(|i| {
                    let mut r = reading(i as i64 * 60);
                    r.heart_rate = Some(70.0 + i as f64);
                    r
                })
                .collect()
        };
        assert!(!analyze(&make(4)).can_predict);
        let at_five = analyze(&make(5));
        assert!(at_five.can_predict);
        assert!(at_five.predictions.contains_key(&Vital::HeartRate));
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = AnalysisConfig {
            ewma_alpha: 0.0,
            ..AnalysisConfig::default()
        };
        assert!(VitalsAnalyzer::new(config).is_err());
    }
}
