mod config;
mod state;
mod types;
mod routes_dashboard;
mod routes_dataset;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;
    info!(path = %cfg.data_path.display(), "config: ok");

    // --- Dataset (blocking IO, loaded once) ---
    let path = cfg.data_path.clone();
    let dataset = tokio::task::spawn_blocking(move || rowtable::load_csv(path))
        .await
        .context("Dataset load task panicked")?
        .with_context(|| format!("Failed to load dataset {}", cfg.data_path.display()))?;

    let range = dataset.table.full_range();
    info!(
        rows = dataset.table.len(),
        %range,
        hash = %hex::encode(dataset.content_hash),
        "dataset: ok"
    );

    let app_state: SharedState = Arc::new(AppState::new(dataset));

    let app = Router::new()
        .route("/health", get(crate::routes_dataset::get_health))
        .route("/dataset", get(crate::routes_dataset::get_dataset))
        .route("/dashboard", get(crate::routes_dashboard::get_dashboard))
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("dashboard listening on http://{addr}");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
