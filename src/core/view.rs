//! The rendered view model.
//!
//! Four distinct states: nothing selected, selection with no matching
//! rows, a failed refresh, and a ready dashboard. The renderer must be
//! able to tell them apart, so they never collapse into one another.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::chart::ChartBundle;
use crate::core::scorecard::Scorecard;
use crate::error::ErrorKind;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    /// No patient selected, or range mode with a missing bound.
    NothingSelected,
    /// The fetch succeeded but matched zero rows.
    NoData,
    /// A query or transform failure; the refresh loop survives and the
    /// next trigger retries.
    Error { kind: ErrorKind, message: String },
    Ready {
        charts: ChartBundle,
        scorecard: Scorecard,
        refreshed_at: DateTime<Utc>,
    },
}
