//! Refresh engine.
//!
//! Holds the current selection (patient, time window, refresh
//! interval) and turns every trigger — timer tick or input change —
//! into a fresh fetch and a new `DashboardView`. A failed refresh
//! becomes an error view; the loop itself always survives.

use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;
use tracing::warn;

use crate::core::chart::build_charts;
use crate::core::scorecard::build_scorecard;
use crate::core::view::DashboardView;
use crate::db::VitalsSource;

/// Lookback choices offered by the time-range selector, in minutes.
pub const LOOKBACK_CHOICES_MIN: [i64; 5] = [5, 15, 30, 60, 120];

/// Refresh cadence choices, in seconds.
pub const REFRESH_INTERVAL_CHOICES_SEC: [u64; 4] = [1, 5, 10, 30];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("unsupported lookback: {0} minutes (choices: 5, 15, 30, 60, 120)")]
    Lookback(i64),
    #[error("unsupported refresh interval: {0} seconds (choices: 1, 5, 10, 30)")]
    Interval(u64),
}

/// Either a relative lookback from now or an explicit date range.
/// Range bounds may be partially filled while the user is editing;
/// the engine renders a placeholder until both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeWindow {
    Lookback { minutes: i64 },
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl TimeWindow {
    pub fn lookback(minutes: i64) -> Result<Self, InvalidSelection> {
        if LOOKBACK_CHOICES_MIN.contains(&minutes) {
            Ok(TimeWindow::Lookback { minutes })
        } else {
            Err(InvalidSelection::Lookback(minutes))
        }
    }

    pub fn title(&self) -> String {
        match self {
            TimeWindow::Lookback { minutes } => {
                format!("Real-time Vitals (Last {minutes} minutes)")
            }
            TimeWindow::Range {
                start: Some(start),
                end: Some(end),
            } => format!("Vitals {start} to {end}"),
            TimeWindow::Range { .. } => "Vitals".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshInterval {
    seconds: u64,
}

impl RefreshInterval {
    pub fn from_seconds(seconds: u64) -> Result<Self, InvalidSelection> {
        if REFRESH_INTERVAL_CHOICES_SEC.contains(&seconds) {
            Ok(Self { seconds })
        } else {
            Err(InvalidSelection::Interval(seconds))
        }
    }

    pub fn seconds(self) -> u64 {
        self.seconds
    }

    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(self.seconds)
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub patient_id: Option<String>,
    pub window: TimeWindow,
    pub interval: RefreshInterval,
}

/// One display instance. Refreshes are serialized by the caller (the
/// engine sits behind an async mutex); there is no query timeout and
/// no cancellation, so a slow fetch simply delays the next tick's
/// effect.
pub struct Dashboard<S> {
    source: S,
    selection: Selection,
    view: DashboardView,
}

impl<S: VitalsSource> Dashboard<S> {
    pub fn new(source: S, window: TimeWindow, interval: RefreshInterval) -> Self {
        Self {
            source,
            selection: Selection {
                patient_id: None,
                window,
                interval,
            },
            view: DashboardView::NothingSelected,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn set_patient(&mut self, patient_id: Option<String>) {
        self.selection.patient_id = patient_id;
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.selection.window = window;
    }

    /// The scheduler is rescheduled separately by the caller; the
    /// engine only records the selection.
    pub fn set_interval(&mut self, interval: RefreshInterval) {
        self.selection.interval = interval;
    }

    /// Re-fetch and rebuild the view. Called on every trigger: timer
    /// tick, patient change, window change, interval change.
    pub async fn refresh(&mut self) -> &DashboardView {
        self.view = self.render().await;
        &self.view
    }

    async fn render(&self) -> DashboardView {
        let Some(patient_id) = self.selection.patient_id.as_deref() else {
            return DashboardView::NothingSelected;
        };

        let fetched = match &self.selection.window {
            TimeWindow::Lookback { minutes } => {
                self.source
                    .fetch_recent(patient_id, Duration::minutes(*minutes))
                    .await
            }
            TimeWindow::Range {
                start: Some(start),
                end: Some(end),
            } => self.source.fetch_range(patient_id, *start, *end).await,
            TimeWindow::Range { .. } => return DashboardView::NothingSelected,
        };

        let samples = match fetched {
            Ok(samples) => samples,
            Err(e) => {
                warn!(patient_id, error = %e, "refresh fetch failed");
                return DashboardView::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                };
            }
        };

        if samples.is_empty() {
            return DashboardView::NoData;
        }

        match build_charts(&samples, &self.selection.window.title()) {
            Ok(charts) => DashboardView::Ready {
                charts,
                scorecard: build_scorecard(&samples[0]),
                refreshed_at: Utc::now(),
            },
            Err(e) => {
                warn!(patient_id, error = %e, "refresh transform failed");
                DashboardView::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        }
    }
}
