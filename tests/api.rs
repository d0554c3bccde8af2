//! HTTP surface tests: the JSON contract between the service and the
//! charting UI.

use std::time::Duration;

use actix_web::{test, web, App};
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::sync::{mpsc, Mutex};
use vitalboard::api;
use vitalboard::api::handlers::AppState;
use vitalboard::core::refresh::{Dashboard, RefreshInterval, TimeWindow};
use vitalboard::core::scheduler::RefreshScheduler;
use vitalboard::db::VitalsStore;

const SCHEMA: &str = "CREATE TABLE gdnews2_scores (
    patient_id TEXT NOT NULL,
    window_start INTEGER NOT NULL,
    respiratory_rate_value REAL,
    oxygen_saturation_value REAL,
    blood_pressure_value REAL,
    heart_rate_value REAL,
    temperature_value REAL,
    consciousness_value TEXT,
    gdnews2_total REAL,
    overall_confidence REAL,
    valid_parameter_count INTEGER,
    degraded_parameter_count INTEGER,
    invalid_parameter_count INTEGER,
    PRIMARY KEY (patient_id, window_start)
)";

async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::query(SCHEMA).execute(&pool).await.expect("schema");

    sqlx::query(
        "INSERT INTO gdnews2_scores \
         (patient_id, window_start, heart_rate_value, consciousness_value, gdnews2_total) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind("P1")
    .bind(Utc::now().timestamp() - 120)
    .bind(72.0)
    .bind("Alert")
    .bind(4.5)
    .execute(&pool)
    .await
    .expect("seed row");

    pool
}

fn app_state(store: VitalsStore) -> web::Data<AppState> {
    let (tick_tx, _tick_rx) = mpsc::channel(1);
    let scheduler = RefreshScheduler::start(Duration::from_secs(5), tick_tx);
    let dashboard = Dashboard::new(
        store.clone(),
        TimeWindow::lookback(5).expect("default lookback"),
        RefreshInterval::from_seconds(5).expect("default interval"),
    );
    web::Data::new(AppState {
        store,
        dashboard: Mutex::new(dashboard),
        scheduler: Mutex::new(scheduler),
    })
}

#[actix_web::test]
async fn selection_flow_renders_the_dashboard() {
    let pool = seeded_pool().await;
    let state = app_state(VitalsStore::new(pool));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/patients").to_request();
    let ids: Vec<String> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids, vec!["P1"]);

    // before any selection the view is the placeholder
    let req = test::TestRequest::get().uri("/api/dashboard").to_request();
    let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["state"], "nothing_selected");

    let req = test::TestRequest::put()
        .uri("/api/selection")
        .set_json(serde_json::json!({
            "patient_id": "P1",
            "window": { "mode": "lookback", "minutes": 5 }
        }))
        .to_request();
    let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["state"], "ready");
    assert_eq!(view["scorecard"]["score"], "4.5");
    assert_eq!(view["scorecard"]["consciousness"], "Alert");

    // deselecting goes back to the placeholder
    let req = test::TestRequest::put()
        .uri("/api/selection")
        .set_json(serde_json::json!({ "patient_id": null }))
        .to_request();
    let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["state"], "nothing_selected");
}

#[actix_web::test]
async fn unknown_patient_renders_no_data() {
    let pool = seeded_pool().await;
    let state = app_state(VitalsStore::new(pool));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/selection")
        .set_json(serde_json::json!({ "patient_id": "P9" }))
        .to_request();
    let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["state"], "no_data");
}

#[actix_web::test]
async fn off_menu_choices_are_rejected() {
    let pool = seeded_pool().await;
    let state = app_state(VitalsStore::new(pool));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/selection")
        .set_json(serde_json::json!({
            "patient_id": "P1",
            "window": { "mode": "lookback", "minutes": 7 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/interval")
        .set_json(serde_json::json!({ "seconds": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn interval_update_reschedules_and_refreshes() {
    let pool = seeded_pool().await;
    let state = app_state(VitalsStore::new(pool));
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/api/interval")
        .set_json(serde_json::json!({ "seconds": 10 }))
        .to_request();
    let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    // still no patient selected; the refresh ran and kept the placeholder
    assert_eq!(view["state"], "nothing_selected");

    assert_eq!(
        state.scheduler.lock().await.interval(),
        Duration::from_secs(10)
    );
    assert_eq!(
        state.dashboard.lock().await.selection().interval.seconds(),
        10
    );
}
