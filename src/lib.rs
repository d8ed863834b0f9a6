//! Vitalsentry — sequential vital-signs risk analysis engine.
//!
//! Given an ordered series of one patient's vital-sign readings, the
//! engine detects anomalies against clinical reference ranges, smooths
//! reading noise, estimates per-vital trends, forecasts near-future
//! values, and reduces everything to a single explainable risk
//! classification (`stable` / `observe` / `critical`) suitable for
//! driving clinical escalation.
//!
//! The engine is a pure, synchronous computation: no I/O, no persistence,
//! no background work. Its entire external contract is [`analyze`] (or
//! [`VitalsAnalyzer::analyze`] with a custom [`AnalysisConfig`]):
//! readings in, [`AnalysisResult`] out.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use vitalsentry::{analyze, RiskStatus, VitalReading};
//!
//! let mut reading = VitalReading::at(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
//! reading.heart_rate = Some(72.0);
//! reading.spo2 = Some(98.0);
//!
//! let result = analyze(&[reading]);
//! assert_eq!(result.status, RiskStatus::Stable);
//! ```

pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use analysis::{analyze, VitalsAnalyzer};
pub use cache::AnalysisCache;
pub use config::{AnalysisConfig, ReferenceRange, ReferenceRanges};
pub use error::ConfigError;
pub use models::{
    AnalysisResult, RiskStatus, TrendDirection, Vital, VitalPrediction, VitalReading,
};
