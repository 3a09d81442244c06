// Website metrics domain models
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The closed set of tracked website metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricId {
    PageLoadTime,
    RequestsPerSecond,
    ServerResponseTime,
    ActiveUsers,
    ErrorRate,
}

impl MetricId {
    /// Canonical order, used for checklists and chart series
    pub const ALL: [MetricId; 5] = [
        MetricId::PageLoadTime,
        MetricId::RequestsPerSecond,
        MetricId::ServerResponseTime,
        MetricId::ActiveUsers,
        MetricId::ErrorRate,
    ];

    /// Column name in the source CSV, also used as the wire identifier
    pub fn column(self) -> &'static str {
        match self {
            MetricId::PageLoadTime => "page_load_time(ms)",
            MetricId::RequestsPerSecond => "requests_per_second",
            MetricId::ServerResponseTime => "server_response_time(ms)",
            MetricId::ActiveUsers => "active_users",
            MetricId::ErrorRate => "error_rate(%)",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricId::PageLoadTime => "Page Load Time (ms)",
            MetricId::RequestsPerSecond => "Requests per Second",
            MetricId::ServerResponseTime => "Server Response Time (ms)",
            MetricId::ActiveUsers => "Active Users",
            MetricId::ErrorRate => "Error Rate (%)",
        }
    }

    pub fn value(self, row: &MetricRow) -> f64 {
        match self {
            MetricId::PageLoadTime => row.page_load_time_ms,
            MetricId::RequestsPerSecond => row.requests_per_second,
            MetricId::ServerResponseTime => row.server_response_time_ms,
            MetricId::ActiveUsers => row.active_users,
            MetricId::ErrorRate => row.error_rate_percent,
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl Serialize for MetricId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricId {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricId::ALL
            .into_iter()
            .find(|metric| metric.column() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// One sample point of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub timestamp: NaiveDateTime,
    pub page_load_time_ms: f64,
    pub requests_per_second: f64,
    pub server_response_time_ms: f64,
    pub active_users: f64,
    pub error_rate_percent: f64,
}

/// Immutable sample table, ordered by timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<MetricRow>,
}

impl Table {
    /// Rows with equal timestamps keep their relative order.
    pub fn new(mut rows: Vec<MetricRow>) -> Self {
        rows.sort_by_key(|row| row.timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|row| row.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|row| row.timestamp)
    }

    pub fn values(&self, metric: MetricId) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| metric.value(row))
    }

    /// Column maximum, `None` for an empty table
    pub fn max(&self, metric: MetricId) -> Option<f64> {
        self.values(metric).reduce(f64::max)
    }
}

/// Set of metrics the user wants charted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(HashSet<MetricId>);

impl Selection {
    pub fn all() -> Self {
        MetricId::ALL.into_iter().collect()
    }

    pub fn contains(&self, metric: MetricId) -> bool {
        self.0.contains(&metric)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a comma separated list of column names, e.g. `active_users,error_rate(%)`
    pub fn parse_list(list: &str) -> Result<Self, UnknownMetric> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(MetricId::from_str)
            .collect()
    }
}

impl FromIterator<MetricId> for Selection {
    fn from_iter<I: IntoIterator<Item = MetricId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    pub(crate) fn row(timestamp: &str, value: f64) -> MetricRow {
        MetricRow {
            timestamp: ts(timestamp),
            page_load_time_ms: value,
            requests_per_second: value,
            server_response_time_ms: value,
            active_users: value,
            error_rate_percent: value,
        }
    }

    #[test]
    fn test_table_sorts_by_timestamp() {
        let table = Table::new(vec![
            row("2024-01-01 00:02:00", 3.0),
            row("2024-01-01 00:00:00", 1.0),
            row("2024-01-01 00:01:00", 2.0),
        ]);

        let values: Vec<f64> = table.values(MetricId::ActiveUsers).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(table.first_timestamp(), Some(ts("2024-01-01 00:00:00")));
        assert_eq!(table.last_timestamp(), Some(ts("2024-01-01 00:02:00")));
    }

    #[test]
    fn test_table_sort_is_stable_and_idempotent() {
        let table = Table::new(vec![
            row("2024-01-01 00:01:00", 7.0),
            row("2024-01-01 00:00:00", 1.0),
            row("2024-01-01 00:01:00", 5.0),
        ]);
        let values: Vec<f64> = table.values(MetricId::ErrorRate).collect();
        assert_eq!(values, vec![1.0, 7.0, 5.0]);

        let resorted = Table::new(table.rows().to_vec());
        assert_eq!(resorted, table);
    }

    #[test]
    fn test_max_of_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.max(MetricId::PageLoadTime), None);
    }

    #[test]
    fn test_metric_id_round_trips_column_name() {
        for metric in MetricId::ALL {
            assert_eq!(metric.column().parse::<MetricId>(), Ok(metric));
        }
        assert_eq!(
            "bounce_rate".parse::<MetricId>(),
            Err(UnknownMetric("bounce_rate".to_string()))
        );
    }

    #[test]
    fn test_selection_parse_list() {
        let selection = Selection::parse_list("active_users, error_rate(%),,").unwrap();
        assert!(selection.contains(MetricId::ActiveUsers));
        assert!(selection.contains(MetricId::ErrorRate));
        assert!(!selection.contains(MetricId::PageLoadTime));

        assert!(Selection::parse_list("").unwrap().is_empty());
        assert!(Selection::parse_list("active_users,nope").is_err());
        assert_eq!(
            Selection::parse_list("active_users,active_users").unwrap(),
            Selection::from_iter([MetricId::ActiveUsers])
        );
    }
}
