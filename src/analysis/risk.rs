//! Stage 5: multi-factor risk aggregation and explanation.

use std::collections::BTreeMap;

use crate::config::AnalysisConfig;
use crate::models::{AnalysisResult, RiskStatus, TrendDirection, Vital, VitalPrediction};

use super::anomaly::{assess_value, VitalAssessment};

// Severity contributions per vital, before clinical weighting.
const BREACH_POINTS: f64 = 60.0;
const Z_POINTS: f64 = 30.0;
const TREND_POINTS: f64 = 10.0;

// Share of the non-dominant contributions blended into the overall score.
const SECONDARY_BLEND: f64 = 0.2;

// Vitals scoring below this are left out of the explanation.
const EXPLANATION_CUTOFF: f64 = 15.0;

/// Scored state of one vital, kept for explanation ordering.
#[derive(Debug, Clone)]
struct VitalSeverity {
    vital: Vital,
    severity: f64,
    contribution: f64,
    breach: bool,
    z_score: f64,
    adverse: Option<TrendDirection>,
    value: f64,
}

/// Combines per-vital anomaly state and trend direction into the final
/// classification.
///
/// Each vital scores `60·breach + 30·|z|/clip + 10·adverse_trend`, scaled
/// by its clinical weight. The overall score is the dominant contribution
/// plus a fraction of the rest: a weighted mean alone would let five
/// normal vitals average a single-vital emergency down below the
/// escalation bands.
pub fn aggregate(
    assessments: &BTreeMap<Vital, VitalAssessment>,
    directions: &BTreeMap<Vital, TrendDirection>,
    predictions: BTreeMap<Vital, VitalPrediction>,
    can_predict: bool,
    config: &AnalysisConfig,
) -> AnalysisResult {
    let mut severities = Vec::new();
    for vital in Vital::ALL {
        let Some(assessment) = assessments.get(&vital) else {
            continue;
        };
        if !assessment.present {
            continue;
        }
        let value = assessment.observed.unwrap_or(0.0);
        let adverse = directions
            .get(&vital)
            .copied()
            .filter(|&d| is_adverse(d, value, config.ranges.get(vital).mean));
        severities.push(score_vital(
            vital,
            assessment.threshold_breach,
            assessment.z_score,
            adverse,
            value,
            config,
        ));
    }

    let risk_score = combine(&severities);
    let status = classify(risk_score, config);
    let explanation = explain(&severities, config);

    let predicted_risk_score = if can_predict {
        Some(projected_score(&severities, &predictions, config))
    } else {
        None
    };

    AnalysisResult {
        status,
        risk_score,
        explanation,
        can_predict,
        predictions,
        predicted_risk_score,
    }
}

fn score_vital(
    vital: Vital,
    breach: bool,
    z_score: f64,
    adverse: Option<TrendDirection>,
    value: f64,
    config: &AnalysisConfig,
) -> VitalSeverity {
    let z_part = z_score.abs().min(config.z_clip) / config.z_clip * Z_POINTS;
    let mut severity = z_part;
    if breach {
        severity += BREACH_POINTS;
    }
    if adverse.is_some() {
        severity += TREND_POINTS;
    }
    let severity = severity.min(100.0);
    let weight = config.ranges.get(vital).weight;
    VitalSeverity {
        vital,
        severity,
        contribution: severity * weight,
        breach,
        z_score,
        adverse,
        value,
    }
}

/// Dominant contribution plus a fraction of the remainder, clamped to 0-100.
fn combine(severities: &[VitalSeverity]) -> f64 {
    let mut contributions: Vec<f64> = severities.iter().map(|s| s.contribution).collect();
    contributions.sort_by(|a, b| b.total_cmp(a));
    let Some((&dominant, rest)) = contributions.split_first() else {
        return 0.0;
    };
    let score = dominant + SECONDARY_BLEND * rest.iter().sum::<f64>();
    round_score(score.clamp(0.0, 100.0))
}

pub(crate) fn classify(risk_score: f64, config: &AnalysisConfig) -> RiskStatus {
    if risk_score >= config.critical_threshold {
        RiskStatus::Critical
    } else if risk_score >= config.observe_threshold {
        RiskStatus::Observe
    } else {
        RiskStatus::Stable
    }
}

fn is_adverse(direction: TrendDirection, value: f64, mean: f64) -> bool {
    match direction {
        TrendDirection::Increasing => value >= mean,
        TrendDirection::Decreasing => value <= mean,
        TrendDirection::Stable => false,
    }
}

/// Re-runs the scoring pass with each vital's forecast value substituted
/// for its observed value. Vitals without a forecast keep their current
/// severity.
fn projected_score(
    severities: &[VitalSeverity],
    predictions: &BTreeMap<Vital, VitalPrediction>,
    config: &AnalysisConfig,
) -> f64 {
    let projected: Vec<VitalSeverity> = severities
        .iter()
        .map(|current| match predictions.get(&current.vital) {
            Some(prediction) => {
                let range = config.ranges.get(current.vital);
                let (breach, z) = assess_value(prediction.value, range, config.z_clip);
                let adverse = Some(prediction.direction)
                    .filter(|&d| is_adverse(d, prediction.value, range.mean));
                score_vital(
                    current.vital,
                    breach,
                    z,
                    adverse,
                    prediction.value,
                    config,
                )
            }
            None => current.clone(),
        })
        .collect();
    combine(&projected)
}

/// Lists contributing vitals in descending severity order.
fn explain(severities: &[VitalSeverity], config: &AnalysisConfig) -> String {
    let mut notable: Vec<&VitalSeverity> = severities
        .iter()
        .filter(|s| s.breach || s.severity >= EXPLANATION_CUTOFF)
        .collect();
    if notable.is_empty() {
        return "All vital signs are within normal limits.".to_string();
    }
    // Stable sort: ties keep clinical-priority order from Vital::ALL.
    notable.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));

    let phrases: Vec<String> = notable.iter().map(|s| phrase(s, config)).collect();
    let mut text = phrases.join("; ");
    text.push('.');
    // Sentence-case the leading phrase.
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => text,
    }
}

fn phrase(severity: &VitalSeverity, config: &AnalysisConfig) -> String {
    let label = severity.vital.label();
    let unit = severity.vital.unit();
    let range = config.ranges.get(severity.vital);
    let trend_suffix = match severity.adverse {
        Some(TrendDirection::Increasing) => " and trending upward",
        Some(TrendDirection::Decreasing) => " and trending downward",
        _ => "",
    };
    if severity.breach {
        let side = if severity.value < range.critical_low {
            "low"
        } else {
            "high"
        };
        format!(
            "{label} critically {side} at {:.1} {unit}{trend_suffix}",
            severity.value
        )
    } else if severity.z_score.abs() >= 2.0 {
        let side = if severity.z_score < 0.0 { "low" } else { "high" };
        format!(
            "{label} unusually {side} at {:.1} {unit}{trend_suffix}",
            severity.value
        )
    } else {
        match severity.adverse {
            Some(TrendDirection::Increasing) => format!("{label} trending upward"),
            Some(TrendDirection::Decreasing) => format!("{label} trending downward"),
            _ => format!("{label} borderline at {:.1} {unit}", severity.value),
        }
    }
}

fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
