use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the six tracked vital signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    HeartRate,
    Spo2,
    Systolic,
    Diastolic,
    Temperature,
    RespiratoryRate,
}

impl Vital {
    /// All tracked vitals, in clinical-priority order.
    pub const ALL: [Vital; 6] = [
        Vital::Spo2,
        Vital::HeartRate,
        Vital::RespiratoryRate,
        Vital::Systolic,
        Vital::Diastolic,
        Vital::Temperature,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Vital::HeartRate => "heart_rate",
            Vital::Spo2 => "spo2",
            Vital::Systolic => "systolic",
            Vital::Diastolic => "diastolic",
            Vital::Temperature => "temperature",
            Vital::RespiratoryRate => "respiratory_rate",
        }
    }

    /// Human-readable name used in explanations.
    pub fn label(self) -> &'static str {
        match self {
            Vital::HeartRate => "heart rate",
            Vital::Spo2 => "oxygen saturation",
            Vital::Systolic => "systolic blood pressure",
            Vital::Diastolic => "diastolic blood pressure",
            Vital::Temperature => "temperature",
            Vital::RespiratoryRate => "respiratory rate",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Vital::HeartRate => "bpm",
            Vital::Spo2 => "%",
            Vital::Systolic => "mmHg",
            Vital::Diastolic => "mmHg",
            Vital::Temperature => "°F",
            Vital::RespiratoryRate => "breaths/min",
        }
    }
}

/// A single observation of a patient's vital signs.
///
/// Every numeric field is optional: `None` means "not measured", never
/// zero. A missing heart rate on a reading does not affect analysis of
/// the SpO₂ recorded on the same reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    pub recorded_at: DateTime<Utc>,
    /// Heart rate in beats per minute.
    pub heart_rate: Option<f64>,
    /// Peripheral oxygen saturation, percent.
    pub spo2: Option<f64>,
    /// Systolic blood pressure, mmHg.
    pub systolic: Option<f64>,
    /// Diastolic blood pressure, mmHg.
    pub diastolic: Option<f64>,
    /// Body temperature, °F.
    pub temperature: Option<f64>,
    /// Respiratory rate, breaths per minute.
    pub respiratory_rate: Option<f64>,
}

impl VitalReading {
    /// An empty reading at the given time, fields filled in by the caller.
    pub fn at(recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            heart_rate: None,
            spo2: None,
            systolic: None,
            diastolic: None,
            temperature: None,
            respiratory_rate: None,
        }
    }

    pub fn value(&self, vital: Vital) -> Option<f64> {
        match vital {
            Vital::HeartRate => self.heart_rate,
            Vital::Spo2 => self.spo2,
            Vital::Systolic => self.systolic,
            Vital::Diastolic => self.diastolic,
            Vital::Temperature => self.temperature,
            Vital::RespiratoryRate => self.respiratory_rate,
        }
    }

    pub fn set_value(&mut self, vital: Vital, value: Option<f64>) {
        match vital {
            Vital::HeartRate => self.heart_rate = value,
            Vital::Spo2 => self.spo2 = value,
            Vital::Systolic => self.systolic = value,
            Vital::Diastolic => self.diastolic = value,
            Vital::Temperature => self.temperature = value,
            Vital::RespiratoryRate => self.respiratory_rate = value,
        }
    }
}
