//! MCTiers Back binary entrypoint wiring REST, SSE, and table gateway layers.

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::{storage::StorageResult, table_store::TableStore};
use services::{roster_service, sse_events};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let app_state = AppState::new(AppConfig::load());

    tokio::spawn(run_storage_supervisor(app_state.clone()));
    tokio::spawn(broadcast_degraded_changes(app_state.clone()));

    // Hold the change feed for the whole server lifetime; every remote write
    // observed on it triggers a full snapshot reload.
    let feed = roster_service::subscribe(app_state.clone());

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    feed.unsubscribe();
    Ok(())
}

/// Supervises the gateway connection by retrying in the background and
/// toggling degraded mode when connectivity changes.
async fn run_storage_supervisor(state: SharedState) {
    let initial_delay_ms = 1000;
    let mut delay = Duration::from_millis(initial_delay_ms);
    let max_delay = Duration::from_secs(10);

    loop {
        if let Some(store) = state.table_store().await {
            match store.health_check().await {
                Ok(()) => {
                    // Healthy connection: reset the retry backoff and avoid
                    // hammering the gateway with probes.
                    delay = Duration::from_millis(initial_delay_ms);
                    sleep(Duration::from_secs(5)).await;
                }
                Err(err) => {
                    // Existing connection failed: drop it, flip to degraded
                    // mode, and retry with exponential backoff.
                    warn!(error = %err, "gateway health check failed; entering degraded mode");
                    state.clear_table_store().await;
                    sleep(delay).await;
                    delay = (delay * 2).min(max_delay);
                }
            }
            continue;
        }

        match connect_table_store().await {
            Ok(store) => {
                info!("table store connected; leaving degraded mode");
                state.install_table_store(store).await;
                delay = Duration::from_millis(initial_delay_ms);
            }
            Err(err) => {
                // Could not reach the gateway at all: wait and retry with
                // exponential backoff.
                warn!(error = %err, "gateway connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(max_delay);
            }
        }
    }
}

/// Build a store from the environment, preferring the hosted REST gateway
/// and falling back to the in-process store for local development.
async fn connect_table_store() -> StorageResult<Arc<dyn TableStore>> {
    #[cfg(feature = "rest-store")]
    {
        use crate::dao::table_store::rest::{RestConfig, RestTableStore};

        match RestConfig::from_env() {
            Ok(rest_config) => {
                let store = RestTableStore::connect(rest_config).await?;
                return Ok(Arc::new(store));
            }
            Err(err) => {
                info!(error = %err, "gateway environment not configured; using in-memory store");
            }
        }
    }

    Ok(Arc::new(dao::table_store::memory::MemoryTableStore::new()))
}

/// Mirror degraded-mode transitions onto the SSE stream.
async fn broadcast_degraded_changes(state: SharedState) {
    let mut watcher = state.degraded_watcher();
    while watcher.changed().await.is_ok() {
        let degraded = *watcher.borrow_and_update();
        sse_events::broadcast_system_status(&state, degraded);
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
