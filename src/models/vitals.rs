use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored vitals row per (patient, aggregation window).
///
/// Samples are produced upstream and are immutable here; this service
/// only reads them. Every measurement is truly nullable end to end: a
/// stored zero and a missing reading stay distinguishable until render
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    pub patient_id: String,
    /// Start of the aggregation window; the ordering key.
    pub window_start: DateTime<Utc>,
    pub respiratory_rate: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub blood_pressure: Option<f64>,
    pub heart_rate: Option<f64>,
    pub temperature: Option<f64>,
    pub consciousness: Option<String>,
    /// Composite gdNEWS2 total, computed upstream. 0-20 in observed use.
    pub score_total: Option<f64>,
    pub overall_confidence: Option<f64>,
    pub valid_parameter_count: Option<i64>,
    pub degraded_parameter_count: Option<i64>,
    pub invalid_parameter_count: Option<i64>,
}

impl VitalsSample {
    /// True when the row carries the extended quality-count fields.
    pub fn has_quality_counts(&self) -> bool {
        self.valid_parameter_count.is_some()
            || self.degraded_parameter_count.is_some()
            || self.invalid_parameter_count.is_some()
    }
}

/// The numeric vitals the dashboard charts and lists, with their
/// display labels and units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalKind {
    HeartRate,
    OxygenSaturation,
    RespiratoryRate,
    BloodPressure,
    Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueStatus {
    Normal,
    Warning,
    Critical,
}

impl VitalKind {
    pub const ALL: [VitalKind; 5] = [
        VitalKind::HeartRate,
        VitalKind::OxygenSaturation,
        VitalKind::RespiratoryRate,
        VitalKind::BloodPressure,
        VitalKind::Temperature,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VitalKind::HeartRate => "Heart Rate",
            VitalKind::OxygenSaturation => "SpO2",
            VitalKind::RespiratoryRate => "Respiratory Rate",
            VitalKind::BloodPressure => "Blood Pressure",
            VitalKind::Temperature => "Temperature",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            VitalKind::HeartRate => "bpm",
            VitalKind::OxygenSaturation => "%",
            VitalKind::RespiratoryRate => "/min",
            VitalKind::BloodPressure => "mmHg",
            VitalKind::Temperature => "°C",
        }
    }

    pub fn value(self, sample: &VitalsSample) -> Option<f64> {
        match self {
            VitalKind::HeartRate => sample.heart_rate,
            VitalKind::OxygenSaturation => sample.oxygen_saturation,
            VitalKind::RespiratoryRate => sample.respiratory_rate,
            VitalKind::BloodPressure => sample.blood_pressure,
            VitalKind::Temperature => sample.temperature,
        }
    }

    /// Display status for a present reading. Absent readings are not
    /// classified; the scorecard shows them as Normal with the
    /// "not available" marker.
    pub fn status(self, value: f64) -> ValueStatus {
        match self {
            VitalKind::HeartRate => {
                if !(40.0..=150.0).contains(&value) {
                    ValueStatus::Critical
                } else if !(50.0..=120.0).contains(&value) {
                    ValueStatus::Warning
                } else {
                    ValueStatus::Normal
                }
            }
            VitalKind::OxygenSaturation => {
                if value < 90.0 {
                    ValueStatus::Critical
                } else if value < 92.0 {
                    ValueStatus::Warning
                } else {
                    ValueStatus::Normal
                }
            }
            VitalKind::RespiratoryRate => {
                if value < 8.0 {
                    ValueStatus::Critical
                } else if value > 30.0 {
                    ValueStatus::Warning
                } else {
                    ValueStatus::Normal
                }
            }
            VitalKind::BloodPressure => {
                if !(90.0..=180.0).contains(&value) {
                    ValueStatus::Critical
                } else {
                    ValueStatus::Normal
                }
            }
            VitalKind::Temperature => {
                if !(35.0..=39.0).contains(&value) {
                    ValueStatus::Warning
                } else {
                    ValueStatus::Normal
                }
            }
        }
    }
}
