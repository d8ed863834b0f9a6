//! Data models for the vital-signs analysis engine.

pub mod result;
pub mod vitals;

pub use result::{AnalysisResult, RiskStatus, TrendDirection, VitalPrediction};
pub use vitals::{Vital, VitalReading};
