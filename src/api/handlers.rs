use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::error;

use crate::core::refresh::{Dashboard, RefreshInterval, TimeWindow};
use crate::core::scheduler::RefreshScheduler;
use crate::db::{VitalsSource, VitalsStore};

pub struct AppState {
    pub store: VitalsStore,
    pub dashboard: Mutex<Dashboard<VitalsStore>>,
    pub scheduler: Mutex<RefreshScheduler>,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn list_patients(state: web::Data<AppState>) -> HttpResponse {
    match state.store.list_patient_ids().await {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(e) => {
            error!(error = %e, "listing patient ids failed");
            HttpResponse::ServiceUnavailable().json(json!({ "error": e.to_string() }))
        }
    }
}

pub async fn dashboard_view(state: web::Data<AppState>) -> HttpResponse {
    let dashboard = state.dashboard.lock().await;
    HttpResponse::Ok().json(dashboard.view())
}

/// Whole-selection update, the way the UI controls submit it: the
/// patient is always set (null deselects); the window is replaced when
/// present and kept otherwise.
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub patient_id: Option<String>,
    pub window: Option<WindowRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WindowRequest {
    Lookback { minutes: i64 },
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

pub async fn update_selection(
    state: web::Data<AppState>,
    body: web::Json<SelectionRequest>,
) -> HttpResponse {
    let req = body.into_inner();

    let window = match req.window {
        Some(WindowRequest::Lookback { minutes }) => match TimeWindow::lookback(minutes) {
            Ok(window) => Some(window),
            Err(e) => {
                return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
            }
        },
        Some(WindowRequest::Range { start, end }) => Some(TimeWindow::Range { start, end }),
        None => None,
    };

    let mut dashboard = state.dashboard.lock().await;
    dashboard.set_patient(req.patient_id);
    if let Some(window) = window {
        dashboard.set_window(window);
    }
    let view = dashboard.refresh().await;
    HttpResponse::Ok().json(view)
}

#[derive(Debug, Deserialize)]
pub struct IntervalRequest {
    pub seconds: u64,
}

pub async fn update_interval(
    state: web::Data<AppState>,
    body: web::Json<IntervalRequest>,
) -> HttpResponse {
    let interval = match RefreshInterval::from_seconds(body.seconds) {
        Ok(interval) => interval,
        Err(e) => return HttpResponse::BadRequest().json(json!({ "error": e.to_string() })),
    };

    state
        .scheduler
        .lock()
        .await
        .reschedule(interval.as_duration());

    let mut dashboard = state.dashboard.lock().await;
    dashboard.set_interval(interval);
    let view = dashboard.refresh().await;
    HttpResponse::Ok().json(view)
}
