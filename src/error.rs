use crate::models::Vital;

/// Validation failures for an [`AnalysisConfig`](crate::config::AnalysisConfig).
///
/// Analysis itself never fails: malformed readings are treated as absent
/// fields and degenerate series degrade to the neutral stable result. The
/// only fallible surface of the engine is configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("smoothing alpha must be in (0, 1]; got {0}")]
    InvalidAlpha(f64),
    #[error("trend window must hold at least 2 samples; got {0}")]
    InvalidTrendWindow(usize),
    #[error("minimum readings for prediction must be at least 1; got {0}")]
    InvalidMinReadings(usize),
    #[error("z-score clip must be positive and finite; got {0}")]
    InvalidZClip(f64),
    #[error("risk bands must satisfy 0 < observe < critical <= 100; got observe={observe}, critical={critical}")]
    InvalidRiskBands { observe: f64, critical: f64 },
    #[error("reference range for {vital} is invalid: {reason}")]
    InvalidRange { vital: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid_range(vital: Vital, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            vital: vital.as_str(),
            reason: reason.into(),
        }
    }
}
