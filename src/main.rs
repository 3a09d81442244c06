// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::ChartService;
use crate::application::metrics_repository::MetricsRepository;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::csv_repository::CsvMetricsRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_dashboard_config().context("Failed to load configuration")?;

    // Initialize tracing, RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load the dataset once; a bad file aborts startup
    let repository = CsvMetricsRepository::new(&config.data.path);
    let table = repository
        .load_table()
        .await
        .with_context(|| format!("Failed to load metrics from {}", config.data.path.display()))?;

    if table.is_empty() {
        tracing::warn!("Loaded an empty metrics table from {}", config.data.path.display());
    } else if let (Some(first), Some(last)) = (table.first_timestamp(), table.last_timestamp()) {
        tracing::info!("Loaded {} rows spanning {} to {}", table.len(), first, last);
    }

    // Create services (application layer)
    let chart_service = ChartService::new(Arc::new(table));

    // Create application state
    let state = Arc::new(AppState {
        chart_service,
        page_title: config.page.title.clone(),
    });

    // Start server
    let addr = config.server.bind;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Starting web-analytics dashboard on {}", addr);

    axum::serve(listener, router(state)).await?;

    Ok(())
}
