//! vitalboard service entry point.

use actix_web::{web, App, HttpServer};
use tokio::sync::{mpsc, Mutex};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use vitalboard::api;
use vitalboard::api::handlers::AppState;
use vitalboard::config;
use vitalboard::core::refresh::{Dashboard, RefreshInterval, TimeWindow};
use vitalboard::core::scheduler::RefreshScheduler;
use vitalboard::db::Database;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = config::load()?;

    // Connection failure here is fatal; everything after it is
    // recoverable per refresh.
    let database = Database::connect(&settings.database.url).await?;
    let store = database.vitals_store();

    let window = TimeWindow::lookback(settings.dashboard.default_lookback_minutes)?;
    let interval = RefreshInterval::from_seconds(settings.dashboard.default_refresh_seconds)?;

    let (tick_tx, mut tick_rx) = mpsc::channel(1);
    let scheduler = RefreshScheduler::start(interval.as_duration(), tick_tx);
    let dashboard = Dashboard::new(store.clone(), window, interval);

    let state = web::Data::new(AppState {
        store,
        dashboard: Mutex::new(dashboard),
        scheduler: Mutex::new(scheduler),
    });

    let tick_state = state.clone();
    tokio::spawn(async move {
        while tick_rx.recv().await.is_some() {
            let mut dashboard = tick_state.dashboard.lock().await;
            dashboard.refresh().await;
        }
    });

    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        "starting vitalboard"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(actix_cors::Cors::permissive())
            .configure(api::configure)
    })
    .bind((settings.server.host.as_str(), settings.server.port))?
    .run()
    .await?;

    Ok(())
}
