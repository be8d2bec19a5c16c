#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Headless dashboard.
//!
//! Loads the census data, starts the dashboard task with a logging
//! surface, and optionally drives a selection from
//! `CITY_COMPARE_SELECT` (comma-separated commune codes). Runs until
//! Ctrl-C.

use std::sync::Arc;

use city_compare_dashboard::{Dashboard, LogSurface, RenderSurface};
use city_compare_dataset::config::SourceConfig;
use city_compare_dataset::load::{LoadError, load_all};
use city_compare_weather::join::AsyncJoinOrchestrator;
use city_compare_weather::open_meteo::OpenMeteoProvider;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Dashboard(#[from] city_compare_dashboard::DashboardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dashboard task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = SourceConfig::from_env();
    log::info!("Loading data (dataset: {})", config.dataset);

    let client = reqwest::Client::new();
    let loaded = load_all(&client, &config).await?;
    log::info!(
        "Loaded {} boundary features",
        loaded.boundaries.features.len()
    );

    let provider = Arc::new(OpenMeteoProvider::with_client(
        config.weather_url.clone(),
        client,
    ));
    let orchestrator = Arc::new(AsyncJoinOrchestrator::new(provider, config.timeout()));
    let surface: Arc<dyn RenderSurface> = Arc::new(LogSurface);
    let dashboard = Dashboard::new(Arc::new(loaded.dataset), orchestrator, surface);
    let (handle, task) = city_compare_dashboard::spawn(dashboard);

    if let Ok(ids) = std::env::var("CITY_COMPARE_SELECT") {
        for id in ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            handle.select(id).await?;
        }
    }

    log::info!("Dashboard running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    drop(handle);
    task.await?;
    Ok(())
}
