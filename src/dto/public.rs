//! DTO definitions for the public read-only REST surface.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    dao::models::Phase,
    dto::common::{MatchSummary, PlayoffMatchSummary, ResultSummary, StandingRow, TeamSummary},
};

/// Teams currently registered in the competition.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamsResponse {
    /// Active teams in alphabetical order.
    pub teams: Vec<TeamSummary>,
}

/// Outcome letter of one past match, newest first in form strings.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub enum FormOutcome {
    /// Win.
    W,
    /// Draw.
    D,
    /// Loss.
    L,
}

/// Full public view of one team.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamDetailResponse {
    /// The team itself.
    pub team: TeamSummary,
    /// Its league table line, if the table exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standing: Option<StandingRow>,
    /// All fixtures involving the team, in schedule order.
    pub matches: Vec<MatchSummary>,
    /// Validated results involving the team, newest first.
    pub results: Vec<ResultSummary>,
    /// Recent form over the last five validated results, newest first.
    pub form: Vec<FormOutcome>,
}

/// Filters accepted by the match calendar listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MatchFilterQuery {
    /// Only fixtures involving this team.
    pub team: Option<Uuid>,
    /// Only fixtures of this matchday.
    pub matchday: Option<u32>,
    /// Only fixtures of this phase.
    pub phase: Option<Phase>,
}

/// Fixtures of one matchday within one phase.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchdayGroup {
    /// Phase of the group.
    pub phase: Phase,
    /// 1-based matchday index.
    pub matchday: u32,
    /// Fixtures of the group, in creation order.
    pub matches: Vec<MatchSummary>,
}

/// Match calendar grouped by phase and matchday.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchListResponse {
    /// Groups ordered by phase then matchday.
    pub groups: Vec<MatchdayGroup>,
    /// Matchday indices available for filtering.
    pub matchdays: Vec<u32>,
}

/// Validated results of one matchday within one phase.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultGroup {
    /// Phase of the group.
    pub phase: Phase,
    /// 1-based matchday index.
    pub matchday: u32,
    /// Validated results of the group.
    pub results: Vec<ResultSummary>,
}

/// Validated results grouped by phase and matchday, newest phase first.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultListResponse {
    /// Result groups.
    pub groups: Vec<ResultGroup>,
}

/// Ordered league table.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingsResponse {
    /// Table lines in ranked order; the stable JSON chart contract.
    pub standings: Vec<StandingRow>,
}

/// Query parameters of the goals chart.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct GoalsChartQuery {
    /// How many teams to include, best attack first.
    pub top: Option<usize>,
}

/// Goals chart series, aligned by index.
#[derive(Debug, Serialize, ToSchema)]
pub struct GoalsChartResponse {
    /// Team names.
    pub teams: Vec<String>,
    /// Goals scored per team.
    pub goals_for: Vec<u32>,
    /// Goals conceded per team.
    pub goals_against: Vec<u32>,
}

/// Aggregate competition figures for the public dashboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsOverviewResponse {
    /// Active teams.
    pub total_teams: usize,
    /// Fixtures across both phases.
    pub total_matches: usize,
    /// Fixtures with a recorded result.
    pub matches_played: usize,
    /// Fixtures still to play.
    pub matches_remaining: usize,
    /// Goals across validated results.
    pub total_goals: u32,
    /// Goals per played match, rounded to two decimals.
    pub average_goals: f64,
    /// Played share of the schedule, in percent.
    pub progress: f64,
    /// Top five table lines.
    pub top_standings: Vec<StandingRow>,
    /// Latest validated results.
    pub last_results: Vec<ResultSummary>,
    /// Next unplayed fixtures.
    pub next_matches: Vec<MatchSummary>,
    /// Best attack (most goals scored), if a table exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_attack: Option<StandingRow>,
    /// Best defense (fewest goals conceded), if a table exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_defense: Option<StandingRow>,
}

/// Knockout bracket view.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayoffBracketResponse {
    /// Whether a bracket has been seeded.
    pub seeded: bool,
    /// Both legs of the first semifinal.
    pub semifinal_one: Vec<PlayoffMatchSummary>,
    /// Both legs of the second semifinal.
    pub semifinal_two: Vec<PlayoffMatchSummary>,
    /// Third-place match, once the bracket is seeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_place: Option<PlayoffMatchSummary>,
    /// Final, once the bracket is seeded.
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_match: Option<PlayoffMatchSummary>,
    /// Current top four of the table.
    pub top_four: Vec<StandingRow>,
}
