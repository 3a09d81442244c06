// Presentation layer - HTTP handlers, page and chart rendering
pub mod app_state;
pub mod chart_svg;
pub mod handlers;
pub mod page;
pub mod routes;
