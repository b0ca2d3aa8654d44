use crate::app::MenuItem;
use fantasy_api::{FreeAgent, LeagueInfo, Standing, Team};

// ---------------------------------------------------------------------------
// Dashboard load-cycle state machine
// ---------------------------------------------------------------------------

/// Atomic merge of the four dashboard fetch results. Built fresh each cycle;
/// never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub league: LeagueInfo,
    pub teams: Vec<Team>,
    pub standings: Vec<Standing>,
    pub free_agents: Vec<FreeAgent>,
}

#[derive(Debug, Default, PartialEq)]
pub enum LoadPhase {
    /// Initial state, re-entered on every retry. No data is valid here.
    #[default]
    Loading,
    /// Terminal for the cycle; retains no entity data from earlier cycles.
    Error { message: String },
    /// Terminal for the cycle; reachable only when all four fetches succeed.
    Ready(DashboardData),
}

/// Versioned view state for the dashboard. The cycle token distinguishes
/// overlapping load cycles so a stale cycle's results can never overwrite a
/// newer cycle's state.
#[derive(Debug, Default)]
pub struct DashboardState {
    phase: LoadPhase,
    cycle: u64,
}

impl DashboardState {
    /// Start a new load cycle: bump the token, drop whatever was on screen.
    /// Returns the token the caller must attach to its fetch request.
    pub fn begin_cycle(&mut self) -> u64 {
        self.cycle += 1;
        self.phase = LoadPhase::Loading;
        self.cycle
    }

    /// Apply a successful merge. Returns false (and changes nothing) when
    /// `cycle` is no longer the current token.
    pub fn apply_success(&mut self, cycle: u64, data: DashboardData) -> bool {
        if cycle != self.cycle {
            return false;
        }
        self.phase = LoadPhase::Ready(data);
        true
    }

    /// Apply a cycle failure, same staleness rule as `apply_success`.
    pub fn apply_failure(&mut self, cycle: u64, message: String) -> bool {
        if cycle != self.cycle {
            return false;
        }
        self.phase = LoadPhase::Error { message };
        true
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match &self.phase {
            LoadPhase::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub dashboard: DashboardState,
    /// Vertical scroll within the active tab; reset on tab change and reload.
    pub scroll_offset: u16,
    pub last_loaded_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> DashboardData {
        DashboardData {
            league: LeagueInfo { name: "Test League".into(), size: 2, ..Default::default() },
            teams: vec![Team { name: "Ballers".into(), ..Default::default() }],
            standings: vec![Standing { rank: 1, team_name: "Ballers".into(), ..Default::default() }],
            free_agents: vec![FreeAgent { name: "B. Lopez".into(), ..Default::default() }],
        }
    }

    #[test]
    fn cycle_completes_into_ready() {
        let mut state = DashboardState::default();
        let cycle = state.begin_cycle();
        assert!(state.is_loading());
        assert!(state.apply_success(cycle, sample_data()));
        assert_eq!(state.data().unwrap().teams.len(), 1);
    }

    #[test]
    fn stale_cycle_results_are_discarded() {
        let mut state = DashboardState::default();
        let first = state.begin_cycle();
        let second = state.begin_cycle();
        assert!(!state.apply_success(first, sample_data()));
        assert!(state.is_loading(), "stale results must not leave Loading");
        assert!(state.apply_success(second, sample_data()));
    }

    #[test]
    fn stale_failure_is_discarded_too() {
        let mut state = DashboardState::default();
        let first = state.begin_cycle();
        let second = state.begin_cycle();
        assert!(!state.apply_failure(first, "old failure".into()));
        assert!(state.apply_success(second, sample_data()));
        assert!(state.error().is_none());
    }

    #[test]
    fn failure_retains_no_entity_data() {
        let mut state = DashboardState::default();
        let cycle = state.begin_cycle();
        assert!(state.apply_success(cycle, sample_data()));

        let retry = state.begin_cycle();
        assert!(state.data().is_none(), "Loading must not expose prior data");
        assert!(state.apply_failure(retry, "API error: 500".into()));
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some("API error: 500"));
    }

    #[test]
    fn retry_re_enters_loading_from_error() {
        let mut state = DashboardState::default();
        let cycle = state.begin_cycle();
        state.apply_failure(cycle, "boom".into());
        state.begin_cycle();
        assert!(state.is_loading());
        assert!(state.error().is_none());
    }
}
