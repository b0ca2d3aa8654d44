//! Fantasy service raw wire types — serde shapes for deserializing dashboard
//! responses. These map to the clean domain types via functions in client.rs.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeagueWire {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub year: Option<u16>,
    pub size: Option<usize>,
    pub current_week: Option<u16>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub teams: Option<Vec<TeamWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamWire {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub owners: Option<Vec<OwnerWire>>,
    pub wins: Option<u16>,
    pub losses: Option<u16>,
    pub roster: Option<Vec<PlayerWire>>,
}

/// Owners arrive either as full objects or, when the upstream record has no
/// owner metadata, as bare display-name strings.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum OwnerWire {
    Full {
        id: Option<String>,
        #[serde(rename = "displayName")]
        display_name: Option<String>,
        #[serde(rename = "firstName")]
        first_name: Option<String>,
        #[serde(rename = "lastName")]
        last_name: Option<String>,
    },
    Name(String),
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerWire {
    pub name: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "proTeam")]
    pub pro_team: Option<String>,
    pub injured: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    pub standings: Option<Vec<StandingWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingWire {
    pub rank: Option<u16>,
    pub team_name: Option<String>,
    pub owners: Option<Vec<OwnerWire>>,
    pub wins: Option<u16>,
    pub losses: Option<u16>,
    pub points_for: Option<f64>,
    pub points_against: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FreeAgentsResponse {
    pub players: Option<Vec<FreeAgentWire>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct FreeAgentWire {
    pub name: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "proTeam")]
    pub pro_team: Option<String>,
    pub avg_points: Option<f64>,
    pub total_points: Option<f64>,
}
