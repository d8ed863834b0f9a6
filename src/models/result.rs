use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::vitals::Vital;

/// Three-state clinical risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskStatus {
    Stable,
    Observe,
    Critical,
}

impl RiskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskStatus::Stable => "stable",
            RiskStatus::Observe => "observe",
            RiskStatus::Critical => "critical",
        }
    }
}

/// Direction of a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// One-step-ahead forecast for a single vital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalPrediction {
    /// Forecast value one tick beyond the regression window.
    pub value: f64,
    pub direction: TrendDirection,
    /// Goodness of fit (R²) of the underlying regression, 0 to 1.
    pub confidence: f64,
}

/// Output of a single analysis pass over one patient's series.
///
/// `predictions` is a `BTreeMap` so iteration and serialization order are
/// deterministic; two analyses of the same unmutated series compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: RiskStatus,
    /// Overall risk score, 0 (no concern) to 100.
    pub risk_score: f64,
    /// Human-readable justification, most severe contributor first.
    pub explanation: String,
    /// True once the series is long enough to support forecasting.
    pub can_predict: bool,
    pub predictions: BTreeMap<Vital, VitalPrediction>,
    /// Risk score recomputed against forecast values, when available.
    pub predicted_risk_score: Option<f64>,
}

impl AnalysisResult {
    /// Neutral result for an empty series. Degenerate input degrades to a
    /// conservative non-alarming default rather than failing toward critical.
    pub fn no_data() -> Self {
        Self {
            status: RiskStatus::Stable,
            risk_score: 0.0,
            explanation: "No vital sign readings are available for analysis.".to_string(),
            can_predict: false,
            predictions: BTreeMap::new(),
            predicted_risk_score: None,
        }
    }
}
