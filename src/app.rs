use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, DashboardData};
use chrono::Local;
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Standings,
    Teams,
    FreeAgents,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Load-cycle management — called from main_ui_loop and keys
    // -----------------------------------------------------------------------

    /// Enter a new load cycle and return its token. The caller is responsible
    /// for enqueuing the matching network request.
    pub fn begin_load_cycle(&mut self) -> u64 {
        self.state.scroll_offset = 0;
        self.state.dashboard.begin_cycle()
    }

    pub fn on_dashboard_loaded(&mut self, cycle: u64, data: DashboardData) {
        if self.state.dashboard.apply_success(cycle, data) {
            self.state.last_loaded_at = Some(Local::now().format("%H:%M").to_string());
        } else {
            debug!("discarding results from superseded load cycle {cycle}");
        }
    }

    pub fn on_dashboard_failed(&mut self, cycle: u64, message: String) {
        if !self.state.dashboard.apply_failure(cycle, message) {
            debug!("discarding failure from superseded load cycle {cycle}");
        }
    }

    // -----------------------------------------------------------------------
    // Tab management — selection is view-only state, no I/O
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.scroll_offset = 0;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn scroll_down(&mut self) {
        self.state.scroll_offset = self.state.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.state.scroll_offset = self.state.scroll_offset.saturating_sub(1);
    }
}
