// Repository trait for loading the metrics table
use crate::domain::metrics::Table;
use async_trait::async_trait;

/// Fatal failures while loading the dataset at startup
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read metrics source: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: malformed timestamp '{value}', expected YYYY-MM-DD HH:MM:SS")]
    MalformedTimestamp { line: u64, value: String },

    #[error("line {line}: malformed number '{value}' in column '{column}'")]
    MalformedNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Load every sample, sorted ascending by timestamp
    async fn load_table(&self) -> Result<Table, LoadError>;
}
