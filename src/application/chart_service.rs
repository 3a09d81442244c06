// Chart service - Use case for building normalized charts from a selection
use crate::domain::chart::{ChartError, ChartSpec, Series, TimeSeriesPoint};
use crate::domain::metrics::{MetricId, Selection, Table};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    table: Arc<Table>,
}

impl ChartService {
    pub fn new(table: Arc<Table>) -> Self {
        Self { table }
    }

    pub fn chart(&self, selection: &Selection) -> Result<ChartSpec, ChartError> {
        let result = build_chart(&self.table, selection);
        match &result {
            Ok(spec) => tracing::debug!("Built chart with {} series", spec.series.len()),
            Err(e) => tracing::warn!("Chart not available: {}", e),
        }
        result
    }
}

/// Build one series per selected metric, each scaled by its own column maximum.
///
/// Series always come out in `MetricId::ALL` order. An empty selection is a
/// valid chart with no series, even for an empty table.
pub fn build_chart(table: &Table, selection: &Selection) -> Result<ChartSpec, ChartError> {
    if selection.is_empty() {
        return Ok(ChartSpec::new(Vec::new()));
    }

    let mut series = Vec::new();
    for metric in MetricId::ALL {
        if !selection.contains(metric) {
            continue;
        }
        series.push(normalized_series(table, metric)?);
    }

    Ok(ChartSpec::new(series))
}

fn normalized_series(table: &Table, metric: MetricId) -> Result<Series, ChartError> {
    let max = table.max(metric).ok_or(ChartError::NoData)?;

    if max.is_nan() || max <= 0.0 {
        return Err(ChartError::DegenerateMetric { metric });
    }

    let points = table
        .rows()
        .iter()
        .map(|row| TimeSeriesPoint::new(row.timestamp, metric.value(row) / max))
        .collect();

    Ok(Series::new(metric, points))
}
