// Chart domain models
use super::metrics::MetricId;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const CHART_TITLE: &str = "Website Analytics Over Time (Normalized)";
pub const X_AXIS_LABEL: &str = "Timestamp";
pub const Y_AXIS_LABEL: &str = "Normalized Value";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

impl TimeSeriesPoint {
    pub fn new(x: NaiveDateTime, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub metric: MetricId,
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl Series {
    pub fn new(metric: MetricId, points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            metric,
            name: format!("{} (Normalized)", metric.label()),
            points,
        }
    }
}

/// Render-ready description of the combined chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub show_legend: bool,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            title: CHART_TITLE,
            x_axis_label: X_AXIS_LABEL,
            y_axis_label: Y_AXIS_LABEL,
            show_legend: true,
            series,
        }
    }
}

/// Recoverable failures while building a chart
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("no data to chart")]
    NoData,
    #[error("metric '{metric}' has no positive maximum and cannot be normalized")]
    DegenerateMetric { metric: MetricId },
}

impl ChartError {
    /// Short machine-readable kind for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            ChartError::NoData => "no_data",
            ChartError::DegenerateMetric { .. } => "degenerate_metric",
        }
    }
}
