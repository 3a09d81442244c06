// HTTP request handlers
use crate::domain::chart::{ChartError, CHART_TITLE};
use crate::domain::metrics::{MetricId, Selection, UnknownMetric};
use crate::infrastructure::http_response::{
    accepts_brotli, encoded_response, json_response, CONTENT_TYPE_SVG,
};
use crate::presentation::app_state::AppState;
use crate::presentation::chart_svg::{render_chart, render_message};
use crate::presentation::page::render_page;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Response, StatusCode},
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ChartQuery {
    /// Comma separated metric columns; absent means every metric
    pub metrics: Option<String>,
}

impl ChartQuery {
    fn selection(&self) -> Result<Selection, UnknownMetric> {
        match &self.metrics {
            Some(list) => Selection::parse_list(list),
            None => Ok(Selection::all()),
        }
    }
}

#[derive(Serialize)]
pub struct MetricOption {
    pub id: MetricId,
    pub label: &'static str,
    pub default_selected: bool,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
}

impl From<&ChartError> for ApiError {
    fn from(e: &ChartError) -> Self {
        Self {
            error: e.kind(),
            message: e.to_string(),
        }
    }
}

impl From<&UnknownMetric> for ApiError {
    fn from(e: &UnknownMetric) -> Self {
        Self {
            error: "unknown_metric",
            message: e.to_string(),
        }
    }
}

fn finish(result: Result<Response<Body>, StatusCode>) -> Response<Body> {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page with every metric selected
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.page_title, &Selection::all()))
}

/// List the selectable metrics
pub async fn list_metrics(headers: HeaderMap) -> impl IntoResponse {
    let options: Vec<MetricOption> = MetricId::ALL
        .into_iter()
        .map(|metric| MetricOption {
            id: metric,
            label: metric.label(),
            default_selected: true,
        })
        .collect();

    finish(json_response(StatusCode::OK, &options, accepts_brotli(&headers)).await)
}

/// Chart spec as JSON
pub async fn chart_json(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    let selection = match query.selection() {
        Ok(selection) => selection,
        Err(e) => {
            tracing::debug!("Rejected chart request: {}", e);
            let body = ApiError::from(&e);
            return finish(json_response(StatusCode::BAD_REQUEST, &body, compress).await);
        }
    };

    let result = match state.chart_service.chart(&selection) {
        Ok(spec) => json_response(StatusCode::OK, &spec, compress).await,
        Err(e) => {
            let body = ApiError::from(&e);
            json_response(StatusCode::UNPROCESSABLE_ENTITY, &body, compress).await
        }
    };
    finish(result)
}

/// Chart rendered as SVG; chart errors render as a message so the page stays usable
pub async fn chart_svg(
    Query(query): Query<ChartQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let compress = accepts_brotli(&headers);

    let selection = match query.selection() {
        Ok(selection) => selection,
        Err(e) => {
            tracing::debug!("Rejected chart request: {}", e);
            let body = ApiError::from(&e);
            return finish(json_response(StatusCode::BAD_REQUEST, &body, compress).await);
        }
    };

    let rendered = match state.chart_service.chart(&selection) {
        Ok(spec) => render_chart(&spec),
        Err(ChartError::NoData) => render_message(CHART_TITLE, "No data available"),
        Err(ChartError::DegenerateMetric { metric }) => render_message(
            CHART_TITLE,
            &format!("{} is flat at or below zero and cannot be normalized", metric.label()),
        ),
    };

    let svg = match rendered {
        Ok(svg) => svg,
        Err(e) => {
            tracing::error!("Failed to render chart: {:#}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    finish(encoded_response(StatusCode::OK, CONTENT_TYPE_SVG, svg.into_bytes(), compress).await)
}
