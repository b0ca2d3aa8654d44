use crate::state::app_state::DashboardData;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use fantasy_api::Standing;
use fantasy_api::client::{ApiResult, FantasyApi};
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

/// Free agents requested for the dashboard view.
pub const DASHBOARD_FREE_AGENT_LIMIT: usize = 10;

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: FantasyApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: FantasyApi::default(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadDashboard { cycle } => self.handle_load_dashboard(cycle).await,
            };

            debug!("network request complete");
            let is_ok = !matches!(response, NetworkResponse::Error { .. });
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dashboard(&self, cycle: u64) -> NetworkResponse {
        debug!("loading dashboard data (cycle {cycle})");
        match load_dashboard(&self.client).await {
            Ok(data) => {
                check_rank_invariant(&data.standings, data.teams.len());
                NetworkResponse::DashboardLoaded { cycle, data }
            }
            Err(err) => NetworkResponse::Error { cycle, message: err.to_string() },
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// One dashboard load cycle: league info, teams, standings and free agents
/// fetched concurrently, merged only if all four succeed. Combined latency is
/// that of the slowest fetch.
///
/// All four futures have settled at the join point, so when more than one
/// fails the reported failure is deterministic: the earliest operation in
/// league → teams → standings → free-agents order wins.
pub async fn load_dashboard(client: &FantasyApi) -> ApiResult<DashboardData> {
    let (league, teams, standings, free_agents) = tokio::join!(
        client.get_league(),
        client.get_teams(),
        client.get_standings(),
        client.get_free_agents(DASHBOARD_FREE_AGENT_LIMIT),
    );
    Ok(DashboardData {
        league: league?,
        teams: teams?,
        standings: standings?,
        free_agents: free_agents?,
    })
}

/// Standings ranks must form a contiguous 1..N permutation with N equal to
/// the team count of the same cycle. A mismatch is a service-side bug, so it
/// is logged rather than failing the cycle.
fn check_rank_invariant(standings: &[Standing], team_count: usize) {
    if !ranks_are_contiguous(standings, team_count) {
        warn!(
            "standings ranks are not a contiguous 1..{team_count} permutation ({} rows)",
            standings.len()
        );
    }
}

fn ranks_are_contiguous(standings: &[Standing], team_count: usize) -> bool {
    if standings.len() != team_count {
        return false;
    }
    let mut ranks: Vec<u16> = standings.iter().map(|s| s.rank).collect();
    ranks.sort_unstable();
    ranks.iter().enumerate().all(|(i, &rank)| rank as usize == i + 1)
}
