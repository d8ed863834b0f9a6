//! Clinical configuration for the analysis pipeline.
//!
//! Every tunable the engine uses lives here so tests can exercise boundary
//! values directly: per-vital reference ranges and weights, the EWMA
//! smoothing constant, the regression window, the prediction unlock
//! threshold and the risk classification bands.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Vital;

/// Static clinical reference data for one vital.
///
/// `critical_low`/`critical_high` bound the hard threshold check;
/// `mean`/`stddev` parameterize the z-score; `weight` is the vital's
/// relative clinical priority during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub critical_low: f64,
    pub critical_high: f64,
    pub mean: f64,
    pub stddev: f64,
    pub weight: f64,
}

impl ReferenceRange {
    fn validate(&self, vital: Vital) -> Result<(), ConfigError> {
        if !self.critical_low.is_finite() || !self.critical_high.is_finite() {
            return Err(ConfigError::invalid_range(vital, "bounds must be finite"));
        }
        if self.critical_low >= self.critical_high {
            return Err(ConfigError::invalid_range(
                vital,
                format!(
                    "critical_low {} must be below critical_high {}",
                    self.critical_low, self.critical_high
                ),
            ));
        }
        if !(self.stddev.is_finite() && self.stddev > 0.0) {
            return Err(ConfigError::invalid_range(vital, "stddev must be positive"));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(ConfigError::invalid_range(vital, "weight must be positive"));
        }
        Ok(())
    }
}

/// Per-vital reference ranges, always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRanges {
    pub heart_rate: ReferenceRange,
    pub spo2: ReferenceRange,
    pub systolic: ReferenceRange,
    pub diastolic: ReferenceRange,
    pub temperature: ReferenceRange,
    pub respiratory_rate: ReferenceRange,
}

impl ReferenceRanges {
    pub fn get(&self, vital: Vital) -> &ReferenceRange {
        match vital {
            Vital::HeartRate => &self.heart_rate,
            Vital::Spo2 => &self.spo2,
            Vital::Systolic => &self.systolic,
            Vital::Diastolic => &self.diastolic,
            Vital::Temperature => &self.temperature,
            Vital::RespiratoryRate => &self.respiratory_rate,
        }
    }
}

impl Default for ReferenceRanges {
    fn default() -> Self {
        Self {
            heart_rate: ReferenceRange {
                critical_low: 50.0,
                critical_high: 120.0,
                mean: 75.0,
                stddev: 15.0,
                weight: 1.0,
            },
            spo2: ReferenceRange {
                critical_low: 90.0,
                critical_high: 100.0,
                mean: 97.0,
                stddev: 2.0,
                weight: 1.0,
            },
            systolic: ReferenceRange {
                critical_low: 90.0,
                critical_high: 180.0,
                mean: 120.0,
                stddev: 15.0,
                weight: 0.7,
            },
            diastolic: ReferenceRange {
                critical_low: 60.0,
                critical_high: 120.0,
                mean: 80.0,
                stddev: 10.0,
                weight: 0.6,
            },
            temperature: ReferenceRange {
                critical_low: 95.0,
                critical_high: 103.0,
                mean: 98.6,
                stddev: 0.7,
                weight: 0.5,
            },
            respiratory_rate: ReferenceRange {
                critical_low: 12.0,
                critical_high: 25.0,
                mean: 16.0,
                stddev: 3.0,
                weight: 0.8,
            },
        }
    }
}

/// Tunable parameters for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub ranges: ReferenceRanges,
    /// EWMA smoothing constant, in (0, 1]. Higher tracks raw readings
    /// more closely.
    pub ewma_alpha: f64,
    /// Maximum number of recent samples fed to the trend regression.
    pub trend_window: usize,
    /// Total readings required before any prediction is reported.
    pub min_readings: usize,
    /// Z-scores are clipped to ±this magnitude.
    pub z_clip: f64,
    /// Slopes within ±epsilon are reported as a stable trend.
    pub trend_epsilon: f64,
    /// Risk scores at or above this are at least "observe".
    pub observe_threshold: f64,
    /// Risk scores at or above this are "critical".
    pub critical_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ranges: ReferenceRanges::default(),
            ewma_alpha: 0.3,
            trend_window: 10,
            min_readings: 5,
            z_clip: 5.0,
            trend_epsilon: 0.01,
            observe_threshold: 30.0,
            critical_threshold: 60.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ewma_alpha.is_finite() && self.ewma_alpha > 0.0 && self.ewma_alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha(self.ewma_alpha));
        }
        if self.trend_window < 2 {
            return Err(ConfigError::InvalidTrendWindow(self.trend_window));
        }
        if self.min_readings < 1 {
            return Err(ConfigError::InvalidMinReadings(self.min_readings));
        }
        if !(self.z_clip.is_finite() && self.z_clip > 0.0) {
            return Err(ConfigError::InvalidZClip(self.z_clip));
        }
        let bands_ok = self.observe_threshold.is_finite()
            && self.critical_threshold.is_finite()
            && self.observe_threshold > 0.0
            && self.observe_threshold < self.critical_threshold
            && self.critical_threshold <= 100.0;
        if !bands_ok {
            return Err(ConfigError::InvalidRiskBands {
                observe: self.observe_threshold,
                critical: self.critical_threshold,
            });
        }
        for vital in Vital::ALL {
            self.ranges.get(vital).validate(vital)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test_case(0.0; "zero alpha")]
    #[test_case(-0.3; "negative alpha")]
    #[test_case(1.01; "alpha above one")]
    #[test_case(f64::NAN; "nan alpha")]
    fn rejects_bad_alpha(alpha: f64) {
        let config = AnalysisConfig {
            ewma_alpha: alpha,
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAlpha(_))));
    }

    #[test]
    fn rejects_degenerate_trend_window() {
        let config = AnalysisConfig {
            trend_window: 1,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTrendWindow(1))
        ));
    }

    #[test_case(60.0, 30.0; "inverted bands")]
    #[test_case(0.0, 60.0; "zero observe band")]
    #[test_case(30.0, 130.0; "critical above scale")]
    fn rejects_bad_bands(observe: f64, critical: f64) {
        let config = AnalysisConfig {
            observe_threshold: observe,
            critical_threshold: critical,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRiskBands { .. })
        ));
    }

    #[test]
    fn rejects_inverted_reference_range() {
        let mut config = AnalysisConfig::default();
        config.ranges.spo2.critical_low = 101.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { vital: "spo2", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_stddev() {
        let mut config = AnalysisConfig::default();
        config.ranges.heart_rate.stddev = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                vital: "heart_rate",
                ..
            })
        ));
    }

    #[test]
    fn every_vital_has_a_range() {
        let ranges = ReferenceRanges::default();
        for vital in Vital::ALL {
            let range = ranges.get(vital);
            assert!(range.critical_low < range.critical_high, "{:?}", vital);
        }
    }
}
