// Application state for HTTP handlers
use crate::application::chart_service::ChartService;

#[derive(Clone)]
pub struct AppState {
    pub chart_service: ChartService,
    pub page_title: String,
}
