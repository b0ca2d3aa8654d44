pub mod client;
pub mod wire;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the service wire format
// ---------------------------------------------------------------------------

/// Sentinel shown when a team or standing carries no owner records.
pub const UNKNOWN_OWNER: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueInfo {
    pub id: u64,
    pub name: String,
    pub year: u16,
    /// Number of teams in the league.
    pub size: usize,
    pub current_week: u16,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
}

/// A rostered player on a fantasy team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub name: String,
    pub position: String,
    /// Professional-team code, e.g. "LAL".
    pub pro_team: String,
    pub injured: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: u32,
    pub name: String,
    /// First owner is primary for display.
    pub owners: Vec<Owner>,
    pub wins: u16,
    pub losses: u16,
    /// Roster in service order; display truncation never reorders it.
    pub roster: Vec<Player>,
}

impl Team {
    /// Primary owner's display name, or the "Unknown" sentinel.
    pub fn primary_owner(&self) -> &str {
        primary_owner(&self.owners)
    }
}

/// A ranked projection of a team in the league standings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standing {
    /// 1-based; the standings sequence carries a contiguous 1..N permutation.
    pub rank: u16,
    pub team_name: String,
    pub owners: Vec<Owner>,
    pub wins: u16,
    pub losses: u16,
    pub points_for: f64,
    pub points_against: f64,
}

impl Standing {
    pub fn primary_owner(&self) -> &str {
        primary_owner(&self.owners)
    }
}

/// A player not rostered by any team in the league.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeAgent {
    pub name: String,
    pub position: String,
    pub pro_team: String,
    pub avg_points: f64,
    pub total_points: f64,
}

fn primary_owner(owners: &[Owner]) -> &str {
    owners
        .first()
        .map(|o| o.display_name.as_str())
        .unwrap_or(UNKNOWN_OWNER)
}
