// Application layer - Use cases and repository traits
pub mod chart_service;
pub mod metrics_repository;
