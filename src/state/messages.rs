use crate::state::app_state::DashboardData;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Run one full dashboard load cycle for the given cycle token.
    LoadDashboard { cycle: u64 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// All four fetches succeeded; `data` is their atomic merge.
    DashboardLoaded { cycle: u64, data: DashboardData },
    Error { cycle: u64, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
