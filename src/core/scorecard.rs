//! Scorecard built from the single newest sample: the composite score
//! rendered prominently, each vital as a formatted value with unit and
//! display status, consciousness as its literal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::format::{format_consciousness, format_score, format_value};
use crate::models::vitals::{ValueStatus, VitalKind, VitalsSample};

#[derive(Debug, Clone, Serialize)]
pub struct Scorecard {
    pub window_start: DateTime<Utc>,
    pub score: String,
    pub entries: Vec<ScorecardEntry>,
    pub consciousness: String,
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScorecardEntry {
    pub label: &'static str,
    pub value: String,
    pub status: ValueStatus,
}

pub fn build_scorecard(latest: &VitalsSample) -> Scorecard {
    Scorecard {
        window_start: latest.window_start,
        score: format_score(latest.score_total),
        entries: VitalKind::ALL
            .into_iter()
            .map(|kind| {
                let value = kind.value(latest);
                ScorecardEntry {
                    label: kind.label(),
                    value: format_value(value, kind.unit()),
                    status: value.map(|v| kind.status(v)).unwrap_or(ValueStatus::Normal),
                }
            })
            .collect(),
        consciousness: format_consciousness(latest.consciousness.as_deref()),
        confidence: latest
            .overall_confidence
            .map(|c| format_value(Some(c), "")),
    }
}
