//! Chart-ready series built from an ordered sample sequence.
//!
//! Output is a plain data tree for whatever charting surface consumes
//! it: one line series per numeric vital, a composite-score chart with
//! a fixed [0, 20] axis, and (when the rows carry quality counts) a
//! stacked sub-chart sharing the score chart's time axis.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, VitalboardError};
use crate::models::vitals::{VitalKind, VitalsSample};

pub const SCORE_AXIS_RANGE: [f64; 2] = [0.0, 20.0];

#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub vitals: Chart,
    pub score: Chart,
    pub quality: Option<Chart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub title: String,
    pub y_axis: Axis,
    pub stacked: bool,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub label: String,
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Point {
    pub t: DateTime<Utc>,
    pub y: f64,
}

/// Build the chart bundle for a non-empty, newest-first sample
/// sequence. Points are emitted oldest first for the time axis; absent
/// readings are skipped, never zeroed.
pub fn build_charts(samples: &[VitalsSample], title: &str) -> Result<ChartBundle> {
    if samples.is_empty() {
        return Err(VitalboardError::Transform("no samples to chart".into()));
    }
    if let Some(pair) = samples
        .windows(2)
        .find(|pair| pair[0].window_start < pair[1].window_start)
    {
        return Err(VitalboardError::Transform(format!(
            "samples out of order: {} before {}",
            pair[1].window_start, pair[0].window_start
        )));
    }

    let vitals = Chart {
        title: title.to_string(),
        y_axis: Axis {
            label: "Value".into(),
            range: None,
        },
        stacked: false,
        series: VitalKind::ALL
            .into_iter()
            .map(|kind| Series {
                name: kind.label().to_string(),
                points: series_points(samples, |s| kind.value(s)),
            })
            .collect(),
    };

    let score = Chart {
        title: "gdNEWS2 Score".into(),
        y_axis: Axis {
            label: "Score".into(),
            range: Some(SCORE_AXIS_RANGE),
        },
        stacked: false,
        series: vec![Series {
            name: "gdNEWS2".into(),
            points: series_points(samples, |s| s.score_total),
        }],
    };

    let quality = samples
        .iter()
        .any(VitalsSample::has_quality_counts)
        .then(|| Chart {
            title: "Parameter Quality".into(),
            y_axis: Axis {
                label: "Parameters".into(),
                range: None,
            },
            stacked: true,
            series: vec![
                Series {
                    name: "Valid".into(),
                    points: series_points(samples, |s| {
                        s.valid_parameter_count.map(|c| c as f64)
                    }),
                },
                Series {
                    name: "Degraded".into(),
                    points: series_points(samples, |s| {
                        s.degraded_parameter_count.map(|c| c as f64)
                    }),
                },
                Series {
                    name: "Invalid".into(),
                    points: series_points(samples, |s| {
                        s.invalid_parameter_count.map(|c| c as f64)
                    }),
                },
            ],
        });

    Ok(ChartBundle {
        vitals,
        score,
        quality,
    })
}

fn series_points<F>(samples: &[VitalsSample], value: F) -> Vec<Point>
where
    F: Fn(&VitalsSample) -> Option<f64>,
{
    samples
        .iter()
        .rev()
        .filter_map(|s| {
            value(s).map(|y| Point {
                t: s.window_start,
                y,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::TimeZone;

    fn sample(minute: u32, heart_rate: Option<f64>, score: Option<f64>) -> VitalsSample {
        VitalsSample {
            patient_id: "P1".into(),
            window_start: Utc.with_ymd_and_hms(2026, 1, 15, 12, minute, 0).unwrap(),
            respiratory_rate: Some(16.0),
            oxygen_saturation: None,
            blood_pressure: None,
            heart_rate,
            temperature: None,
            consciousness: Some("Alert".into()),
            score_total: score,
            overall_confidence: None,
            valid_parameter_count: None,
            degraded_parameter_count: None,
            invalid_parameter_count: None,
        }
    }

    #[test]
    fn one_series_per_numeric_vital() {
        let samples = vec![sample(10, Some(75.0), Some(5.0)), sample(5, Some(72.0), Some(4.5))];
        let bundle = build_charts(&samples, "Real-time Vitals (Last 5 minutes)").unwrap();

        assert_eq!(bundle.vitals.series.len(), VitalKind::ALL.len());
        assert_eq!(bundle.vitals.title, "Real-time Vitals (Last 5 minutes)");

        let hr = &bundle.vitals.series[0];
        assert_eq!(hr.name, "Heart Rate");
        assert_eq!(hr.points.len(), 2);
        // oldest first on the time axis
        assert!(hr.points[0].t < hr.points[1].t);
        assert_eq!(hr.points[0].y, 72.0);
    }

    #[test]
    fn absent_readings_are_skipped_not_zeroed() {
        let samples = vec![sample(10, None, Some(5.0)), sample(5, Some(72.0), Some(4.5))];
        let bundle = build_charts(&samples, "t").unwrap();

        let hr = &bundle.vitals.series[0];
        assert_eq!(hr.points.len(), 1);
        assert_eq!(hr.points[0].y, 72.0);

        // SpO2 was never present; its series is empty rather than flat zero
        let spo2 = &bundle.vitals.series[1];
        assert!(spo2.points.is_empty());
    }

    #[test]
    fn score_chart_has_fixed_axis() {
        let samples = vec![sample(5, Some(72.0), Some(4.5))];
        let bundle = build_charts(&samples, "t").unwrap();
        assert_eq!(bundle.score.y_axis.range, Some([0.0, 20.0]));
        assert_eq!(bundle.score.series[0].points[0].y, 4.5);
    }

    #[test]
    fn quality_chart_only_when_counts_present() {
        let plain = vec![sample(5, Some(72.0), Some(4.5))];
        assert!(build_charts(&plain, "t").unwrap().quality.is_none());

        let mut extended = sample(5, Some(72.0), Some(4.5));
        extended.valid_parameter_count = Some(5);
        extended.degraded_parameter_count = Some(1);
        extended.invalid_parameter_count = Some(0);
        let bundle = build_charts(&[extended], "t").unwrap();

        let quality = bundle.quality.expect("quality sub-chart");
        assert!(quality.stacked);
        assert_eq!(quality.series.len(), 3);
        assert_eq!(quality.series[0].points[0].y, 5.0);
        // count of zero is a real point, not a gap
        assert_eq!(quality.series[2].points[0].y, 0.0);
    }

    #[test]
    fn out_of_order_input_is_a_transform_error() {
        let samples = vec![sample(5, Some(72.0), None), sample(10, Some(75.0), None)];
        let err = build_charts(&samples, "t").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transform);
    }

    #[test]
    fn empty_input_is_a_transform_error() {
        let err = build_charts(&[], "t").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transform);
    }
}
