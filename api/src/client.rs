use crate::wire::{
    FreeAgentWire, FreeAgentsResponse, LeagueWire, OwnerWire, PlayerWire, StandingWire,
    StandingsResponse, TeamWire, TeamsResponse,
};
use crate::{FreeAgent, LeagueInfo, Owner, Player, Standing, Team};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, RequestError>;

/// Local development address used when no base URL is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8081";
const BASE_URL_ENV: &str = "HOOPTUI_API_URL";

/// Fantasy league dashboard client backed by the aggregation service.
///
/// Stateless apart from its configuration: safe to clone and share across
/// concurrent operations. Each method issues exactly one HTTP request — no
/// caching, no retries, no deduplication of identical in-flight calls.
#[derive(Debug, Clone)]
pub struct FantasyApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for FantasyApi {
    fn default() -> Self {
        Self::new(resolve_base_url())
    }
}

/// The single error kind at the client boundary. Covers transport failures,
/// non-2xx statuses and response bodies that fail to parse; the message text
/// alone differentiates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    fn transport(url: &str, err: &reqwest::Error) -> Self {
        Self { message: format!("request failed for {url}: {err}") }
    }

    fn status(url: &str, status: StatusCode) -> Self {
        Self { message: format!("API error for {url}: {status}") }
    }

    fn parse(url: &str, err: &reqwest::Error) -> Self {
        Self { message: format!("unexpected response from {url}: {err}") }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RequestError {}

fn resolve_base_url() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

impl FantasyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::builder()
                .user_agent("hooptui/0.1 (terminal league dashboard)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// Service health probe. Payload shape is owned by the service.
    pub async fn get_health(&self) -> ApiResult<Value> {
        self.get("/api/espn/health").await
    }

    /// Current league metadata (name, season year, size, week).
    pub async fn get_league(&self) -> ApiResult<LeagueInfo> {
        let raw: LeagueWire = self.get("/api/espn/league").await?;
        Ok(map_league(raw))
    }

    /// All teams with their owners and full rosters, in service order.
    pub async fn get_teams(&self) -> ApiResult<Vec<Team>> {
        let raw: TeamsResponse = self.get("/api/espn/teams").await?;
        Ok(raw.teams.unwrap_or_default().into_iter().map(map_team).collect())
    }

    /// League standings, ranked by the service. Row order is authoritative;
    /// callers must not re-sort.
    pub async fn get_standings(&self) -> ApiResult<Vec<Standing>> {
        let raw: StandingsResponse = self.get("/api/espn/standings").await?;
        Ok(raw
            .standings
            .unwrap_or_default()
            .into_iter()
            .map(map_standing)
            .collect())
    }

    /// Top free agents, bounded by `limit`. The service applies its own
    /// default when the query parameter is absent, so the limit is required
    /// here to keep the result size explicit at every call site.
    pub async fn get_free_agents(&self, limit: usize) -> ApiResult<Vec<FreeAgent>> {
        let raw: FreeAgentsResponse = self
            .get_with_query("/api/espn/free-agents", &[("limit", limit.to_string())])
            .await?;
        Ok(raw
            .players
            .unwrap_or_default()
            .into_iter()
            .map(map_free_agent)
            .collect())
    }

    // -----------------------------------------------------------------------
    // Analytics endpoints — payload shapes are still settling upstream, so
    // these return raw JSON under the same success/failure contract.
    // -----------------------------------------------------------------------

    pub async fn get_streaming_recommendations(&self) -> ApiResult<Value> {
        self.get("/api/v1/analytics/streaming").await
    }

    /// Evaluate a proposed trade between two sets of player IDs; returns the
    /// service's fairness verdict.
    pub async fn calculate_trade(
        &self,
        team1_players: &[u64],
        team2_players: &[u64],
    ) -> ApiResult<Value> {
        let body = serde_json::json!({
            "team1_players": team1_players,
            "team2_players": team2_players,
        });
        self.post("/api/v1/analytics/trade", &body).await
    }

    pub async fn get_power_rankings(&self) -> ApiResult<Value> {
        self.get("/api/v1/analytics/power-rankings").await
    }

    pub async fn get_matchup_prediction(&self, week: u16) -> ApiResult<Value> {
        self.get(&format!("/api/v1/analytics/matchup/{week}")).await
    }

    pub async fn get_players(&self) -> ApiResult<Value> {
        self.get("/api/v1/players").await
    }

    pub async fn get_player(&self, id: u64) -> ApiResult<Value> {
        self.get(&format!("/api/v1/players/{id}")).await
    }

    pub async fn get_player_stats(&self, id: u64) -> ApiResult<Value> {
        self.get(&format!("/api/v1/players/{id}/stats")).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RequestError::transport(&url, &e))?;
        decode(&url, response).await
    }

    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, body: &Value) -> ApiResult<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RequestError::transport(&url, &e))?;
        decode(&url, response).await
    }
}

/// Any non-success status is an error — callers observe failure explicitly,
/// never a silently empty collection.
async fn decode<T: serde::de::DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(RequestError::status(url, status));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| RequestError::parse(url, &e))
}

// ---------------------------------------------------------------------------
// Mapping: service wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_league(raw: LeagueWire) -> LeagueInfo {
    LeagueInfo {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        year: raw.year.unwrap_or_default(),
        size: raw.size.unwrap_or_default(),
        current_week: raw.current_week.unwrap_or_default(),
    }
}

fn map_team(raw: TeamWire) -> Team {
    Team {
        id: raw.id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        owners: map_owners(raw.owners),
        wins: raw.wins.unwrap_or_default(),
        losses: raw.losses.unwrap_or_default(),
        roster: raw
            .roster
            .unwrap_or_default()
            .into_iter()
            .map(map_player)
            .collect(),
    }
}

fn map_standing(raw: StandingWire) -> Standing {
    Standing {
        rank: raw.rank.unwrap_or_default(),
        team_name: raw.team_name.unwrap_or_default(),
        owners: map_owners(raw.owners),
        wins: raw.wins.unwrap_or_default(),
        losses: raw.losses.unwrap_or_default(),
        points_for: raw.points_for.unwrap_or_default(),
        points_against: raw.points_against.unwrap_or_default(),
    }
}

fn map_owners(raw: Option<Vec<OwnerWire>>) -> Vec<Owner> {
    raw.unwrap_or_default().into_iter().map(map_owner).collect()
}

fn map_owner(raw: OwnerWire) -> Owner {
    match raw {
        OwnerWire::Full { id, display_name, first_name, last_name } => Owner {
            id: id.unwrap_or_default(),
            display_name: display_name.unwrap_or_default(),
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
        },
        // Bare-string owner: the service had only a display name to give.
        OwnerWire::Name(name) => Owner { display_name: name, ..Default::default() },
    }
}

fn map_player(raw: PlayerWire) -> Player {
    Player {
        name: raw.name.unwrap_or_default(),
        position: raw.position.unwrap_or_default(),
        pro_team: raw.pro_team.unwrap_or_default(),
        injured: raw.injured.unwrap_or_default(),
    }
}

fn map_free_agent(raw: FreeAgentWire) -> FreeAgent {
    FreeAgent {
        name: raw.name.unwrap_or_default(),
        position: raw.position.unwrap_or_default(),
        pro_team: raw.pro_team.unwrap_or_default(),
        avg_points: raw.avg_points.unwrap_or_default(),
        total_points: raw.total_points.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    // -----------------------------------------------------------------------
    // Wire → domain mapping
    // -----------------------------------------------------------------------

    #[test]
    fn owner_object_maps_all_fields() {
        let raw = OwnerWire::Full {
            id: Some("{ABC-123}".into()),
            display_name: Some("Alex".into()),
            first_name: Some("Alex".into()),
            last_name: Some("Chen".into()),
        };
        let owner = map_owner(raw);
        assert_eq!(owner.id, "{ABC-123}");
        assert_eq!(owner.display_name, "Alex");
        assert_eq!(owner.last_name, "Chen");
    }

    #[test]
    fn bare_string_owner_becomes_display_name_only() {
        let owner = map_owner(OwnerWire::Name("Sam".into()));
        assert_eq!(owner.display_name, "Sam");
        assert!(owner.id.is_empty());
        assert!(owner.first_name.is_empty());
    }

    #[test]
    fn mixed_owner_shapes_deserialize_in_one_array() {
        let raw: Vec<OwnerWire> =
            serde_json::from_str(r#"[{"displayName": "Alex", "id": "1"}, "Sam"]"#)
                .expect("both owner shapes should parse");
        let owners: Vec<Owner> = raw.into_iter().map(map_owner).collect();
        assert_eq!(owners[0].display_name, "Alex");
        assert_eq!(owners[1].display_name, "Sam");
    }

    #[test]
    fn team_with_missing_fields_maps_to_defaults() {
        let team = map_team(TeamWire::default());
        assert_eq!(team.id, 0);
        assert!(team.roster.is_empty());
        assert_eq!(team.primary_owner(), "Unknown");
    }

    #[test]
    fn player_injury_flag_defaults_to_false() {
        let raw: PlayerWire =
            serde_json::from_str(r#"{"name": "J. Doe", "position": "PG", "proTeam": "BOS"}"#)
                .unwrap();
        let player = map_player(raw);
        assert_eq!(player.pro_team, "BOS");
        assert!(!player.injured);
    }

    // -----------------------------------------------------------------------
    // HTTP contract
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn league_endpoint_parses_into_league_info() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/league")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id": 1356604871, "name": "Downtown Hoops", "year": 2026, "size": 10, "current_week": 14}"#,
            )
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        let league = api.get_league().await.expect("league should parse");
        assert_eq!(league.name, "Downtown Hoops");
        assert_eq!(league.size, 10);
        assert_eq!(league.current_week, 14);
    }

    #[tokio::test]
    async fn server_error_surfaces_status_line() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/standings")
            .with_status(500)
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        let err = api.get_standings().await.expect_err("500 must be an error");
        assert!(
            err.message.contains("500"),
            "message should carry the status line, got: {}",
            err.message
        );
    }

    #[tokio::test]
    async fn client_error_is_an_error_not_an_empty_collection() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/teams")
            .with_status(404)
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        assert!(api.get_teams().await.is_err());
    }

    #[tokio::test]
    async fn malformed_body_surfaces_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/league")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>definitely not json</html>")
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        let err = api.get_league().await.expect_err("bad body must be an error");
        assert!(err.message.contains("unexpected response"));
    }

    #[tokio::test]
    async fn free_agents_sends_explicit_limit() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/free-agents")
            .match_query(Matcher::UrlEncoded("limit".into(), "10".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"players": [{"name": "B. Lopez", "position": "C", "proTeam": "MIL", "avg_points": 28.35, "total_points": 411.5}]}"#,
            )
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        let players = api.get_free_agents(10).await.expect("free agents should parse");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].pro_team, "MIL");
        assert_eq!(players[0].avg_points, 28.35);
    }

    #[tokio::test]
    async fn trade_evaluation_posts_both_player_arrays() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/api/v1/analytics/trade")
            .match_body(Matcher::Json(serde_json::json!({
                "team1_players": [101, 102],
                "team2_players": [201],
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"verdict": "fair", "delta": 1.3}"#)
            .create_async()
            .await;

        let api = FantasyApi::new(server.url());
        let verdict = api
            .calculate_trade(&[101, 102], &[201])
            .await
            .expect("trade verdict should parse");
        assert_eq!(verdict["verdict"], "fair");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_tolerated() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/espn/league")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 1, "name": "L", "year": 2026, "size": 8, "current_week": 1}"#)
            .create_async()
            .await;

        let api = FantasyApi::new(format!("{}/", server.url()));
        assert!(api.get_league().await.is_ok());
    }
}
