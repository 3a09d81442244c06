// CSV file repository implementation
use crate::application::metrics_repository::{LoadError, MetricsRepository};
use crate::domain::metrics::{MetricId, MetricRow, Table};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct CsvMetricsRepository {
    path: PathBuf,
}

/// Raw CSV record, columns are parsed by hand to report typed errors
#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    #[serde(rename = "page_load_time(ms)")]
    page_load_time: String,
    requests_per_second: String,
    #[serde(rename = "server_response_time(ms)")]
    server_response_time: String,
    active_users: String,
    #[serde(rename = "error_rate(%)")]
    error_rate: String,
}

impl CsvRecord {
    fn into_row(self, line: u64) -> Result<MetricRow, LoadError> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| LoadError::MalformedTimestamp {
                line,
                value: self.timestamp.clone(),
            })?;

        Ok(MetricRow {
            timestamp,
            page_load_time_ms: parse_number(line, MetricId::PageLoadTime, &self.page_load_time)?,
            requests_per_second: parse_number(
                line,
                MetricId::RequestsPerSecond,
                &self.requests_per_second,
            )?,
            server_response_time_ms: parse_number(
                line,
                MetricId::ServerResponseTime,
                &self.server_response_time,
            )?,
            active_users: parse_number(line, MetricId::ActiveUsers, &self.active_users)?,
            error_rate_percent: parse_number(line, MetricId::ErrorRate, &self.error_rate)?,
        })
    }
}

fn parse_number(line: u64, metric: MetricId, value: &str) -> Result<f64, LoadError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::MalformedNumber {
            line,
            column: metric.column(),
            value: value.to_string(),
        })
}

/// Parse a metrics CSV with a header row into a sorted table
pub fn parse_table<R: Read>(input: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let raw: CsvRecord = record.deserialize(Some(&headers))?;
        rows.push(raw.into_row(line)?);
    }

    Ok(Table::new(rows))
}

impl CsvMetricsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MetricsRepository for CsvMetricsRepository {
    async fn load_table(&self) -> Result<Table, LoadError> {
        tracing::debug!("Reading metrics from {}", self.path.display());
        let content = tokio::fs::read(&self.path).await?;

        let table = parse_table(content.as_slice())?;
        tracing::debug!("Parsed {} rows from {}", table.len(), self.path.display());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "timestamp,page_load_time(ms),requests_per_second,\
                          server_response_time(ms),active_users,error_rate(%)\n";

    fn csv(body: &str) -> String {
        format!("{}{}", HEADER, body)
    }

    #[test]
    fn test_parse_sorts_rows() {
        let input = csv(
            "2024-03-01 10:02:00,300,12,80,15,0.5\n\
             2024-03-01 10:00:00,100,10,60,10,0.1\n\
             2024-03-01 10:01:00,200,11,70,20,0.2\n",
        );
        let table = parse_table(input.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        let users: Vec<f64> = table.values(MetricId::ActiveUsers).collect();
        assert_eq!(users, vec![10.0, 20.0, 15.0]);
        assert!(table.rows().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_parse_header_only_gives_empty_table() {
        let table = parse_table(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_columns_may_appear_in_any_order() {
        let input = "active_users,timestamp,error_rate(%),requests_per_second,\
                     server_response_time(ms),page_load_time(ms),region\n\
                     42,2024-03-01 10:00:00,1.5,9,70,250,eu\n";
        let table = parse_table(input.as_bytes()).unwrap();

        let row = &table.rows()[0];
        assert_eq!(row.active_users, 42.0);
        assert_eq!(row.page_load_time_ms, 250.0);
        assert_eq!(row.error_rate_percent, 1.5);
    }

    #[test]
    fn test_malformed_timestamp() {
        let input = csv(
            "2024-03-01 10:00:00,100,10,60,10,0.1\n\
             03/01/2024 10:01,200,11,70,20,0.2\n",
        );
        match parse_table(input.as_bytes()) {
            Err(LoadError::MalformedTimestamp { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "03/01/2024 10:01");
            }
            other => panic!("expected MalformedTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number() {
        let input = csv("2024-03-01 10:00:00,100,ten,60,10,0.1\n");
        match parse_table(input.as_bytes()) {
            Err(LoadError::MalformedNumber { line, column, value }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "requests_per_second");
                assert_eq!(value, "ten");
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_number_is_malformed() {
        let input = csv("2024-03-01 10:00:00,100,10,60,NaN,0.1\n");
        assert!(matches!(
            parse_table(input.as_bytes()),
            Err(LoadError::MalformedNumber { column: "active_users", .. })
        ));
    }

    #[test]
    fn test_missing_column_is_csv_error() {
        let input = "timestamp,active_users\n2024-03-01 10:00:00,10\n";
        assert!(matches!(parse_table(input.as_bytes()), Err(LoadError::Csv(_))));
    }

    #[tokio::test]
    async fn test_repository_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            csv(
                "2024-03-01 10:01:00,200,11,70,20,0.2\n\
                 2024-03-01 10:00:00,100,10,60,10,0.1\n",
            )
            .as_bytes(),
        )
        .unwrap();

        let repository = CsvMetricsRepository::new(file.path());
        let table = repository.load_table().await.unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].page_load_time_ms, 100.0);
    }

    #[tokio::test]
    async fn test_repository_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repository = CsvMetricsRepository::new(dir.path().join("missing.csv"));

        assert!(matches!(repository.load_table().await, Err(LoadError::Io(_))));
    }
}
