// Domain layer - Metrics table and chart models
pub mod chart;
pub mod metrics;
