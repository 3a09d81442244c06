// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{chart_json, chart_svg, health_check, index, list_metrics};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/metrics", get(list_metrics))
        .route("/api/chart", get(chart_json))
        .route("/chart.svg", get(chart_svg))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
