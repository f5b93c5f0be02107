//! Snapshot projections shared by the public and admin REST surfaces.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::{
        MatchEntity, Phase, PlayoffMatchEntity, PlayoffRound, ResultEntity, StandingEntity,
        TeamEntity,
    },
    dto::format_system_time,
    league::League,
};

/// Public projection of a registered team.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    /// Team identifier.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Player behind the team.
    pub player_name: String,
    /// In-game alias.
    pub gamer_alias: String,
    /// Optional contact.
    pub contact: Option<String>,
    /// Optional logo URL.
    pub logo_url: Option<String>,
    /// Whether the team takes part in schedule generation.
    pub active: bool,
    /// Registration timestamp (RFC 3339).
    pub created_at: String,
}

impl From<TeamEntity> for TeamSummary {
    fn from(team: TeamEntity) -> Self {
        Self {
            id: team.id,
            name: team.name,
            player_name: team.player_name,
            gamer_alias: team.gamer_alias,
            contact: team.contact,
            logo_url: team.logo_url,
            active: team.active,
            created_at: format_system_time(team.created_at),
        }
    }
}

/// Score attached to a fixture in match listings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScoreSummary {
    /// Goals scored by the home team.
    pub home_score: u8,
    /// Goals scored by the away team.
    pub away_score: u8,
    /// Whether the score counts towards the standings.
    pub validated: bool,
}

/// Public projection of a scheduled fixture.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchSummary {
    /// Fixture identifier.
    pub id: Uuid,
    /// Home team identifier.
    pub home_team_id: Uuid,
    /// Home team name.
    pub home_team: String,
    /// Away team identifier.
    pub away_team_id: Uuid,
    /// Away team name.
    pub away_team: String,
    /// 1-based matchday index.
    pub matchday: u32,
    /// Phase the fixture belongs to.
    pub phase: Phase,
    /// Whether a result has been recorded.
    pub played: bool,
    /// When the match was played (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub played_at: Option<String>,
    /// Recorded score, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreSummary>,
}

impl MatchSummary {
    /// Project a fixture, resolving team names and the attached result.
    pub fn from_league(league: &League, fixture: &MatchEntity) -> Self {
        let result = league.result_for_match(fixture.id).map(|r| ScoreSummary {
            home_score: r.home_score,
            away_score: r.away_score,
            validated: r.validated,
        });

        Self {
            id: fixture.id,
            home_team_id: fixture.home_team_id,
            home_team: league.team_name(fixture.home_team_id),
            away_team_id: fixture.away_team_id,
            away_team: league.team_name(fixture.away_team_id),
            matchday: fixture.matchday,
            phase: fixture.phase,
            played: fixture.played,
            played_at: fixture.played_at.map(format_system_time),
            result,
        }
    }
}

/// Public projection of a recorded result.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResultSummary {
    /// Result identifier.
    pub id: Uuid,
    /// Fixture the result belongs to.
    pub match_id: Uuid,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Matchday of the fixture.
    pub matchday: u32,
    /// Phase of the fixture.
    pub phase: Phase,
    /// Goals scored by the home team.
    pub home_score: u8,
    /// Goals scored by the away team.
    pub away_score: u8,
    /// Whether the score counts towards the standings.
    pub validated: bool,
    /// Admin who validated the result, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_by: Option<String>,
    /// First entry timestamp (RFC 3339).
    pub recorded_at: String,
}

impl ResultSummary {
    /// Project a result, resolving the fixture and team names.
    ///
    /// Returns `None` when the fixture no longer exists, which only happens
    /// transiently while a cascade delete is in flight.
    pub fn from_league(league: &League, result: &ResultEntity) -> Option<Self> {
        let fixture = league.match_by_id(result.match_id)?;
        Some(Self {
            id: result.id,
            match_id: result.match_id,
            home_team: league.team_name(fixture.home_team_id),
            away_team: league.team_name(fixture.away_team_id),
            matchday: fixture.matchday,
            phase: fixture.phase,
            home_score: result.home_score,
            away_score: result.away_score,
            validated: result.validated,
            validated_by: result.validated_by.clone(),
            recorded_at: format_system_time(result.recorded_at),
        })
    }
}

/// One line of the league table; the stable JSON chart contract.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingRow {
    /// 1-based rank.
    pub position: u32,
    /// Team identifier.
    pub team_id: Uuid,
    /// Team name.
    pub team: String,
    /// Points (3 per win, 1 per draw).
    pub points: u32,
    /// Matches counted.
    pub played: u32,
    /// Wins.
    pub won: u32,
    /// Draws.
    pub drawn: u32,
    /// Losses.
    pub lost: u32,
    /// Goals scored.
    pub goals_for: u32,
    /// Goals conceded.
    pub goals_against: u32,
    /// goals_for - goals_against.
    pub goal_difference: i64,
}

impl StandingRow {
    /// Project a table line, resolving the team name.
    pub fn from_league(league: &League, line: &StandingEntity) -> Self {
        Self {
            position: line.position,
            team_id: line.team_id,
            team: league.team_name(line.team_id),
            points: line.points,
            played: line.played,
            won: line.won,
            drawn: line.drawn,
            lost: line.lost,
            goals_for: line.goals_for,
            goals_against: line.goals_against,
            goal_difference: line.goal_difference,
        }
    }
}

/// Public projection of a knockout-stage match.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayoffMatchSummary {
    /// Playoff match identifier.
    pub id: Uuid,
    /// Bracket slot.
    pub round: PlayoffRound,
    /// Home team identifier, unset until qualification is known.
    pub home_team_id: Option<Uuid>,
    /// Home team name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    /// Away team identifier, unset until qualification is known.
    pub away_team_id: Option<Uuid>,
    /// Away team name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    /// Goals scored by the home team.
    pub home_score: u8,
    /// Goals scored by the away team.
    pub away_score: u8,
    /// Whether a score has been recorded.
    pub played: bool,
    /// Whether the match went to extra time.
    pub extra_time: bool,
    /// Whether a shootout decided the match.
    pub penalties: bool,
    /// Shootout winner identifier, if recorded.
    pub penalty_winner_id: Option<Uuid>,
    /// Shootout winner name, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_winner: Option<String>,
}

impl PlayoffMatchSummary {
    /// Project a playoff match, resolving participant names where known.
    pub fn from_league(league: &League, playoff: &PlayoffMatchEntity) -> Self {
        Self {
            id: playoff.id,
            round: playoff.round,
            home_team_id: playoff.home_team_id,
            home_team: playoff.home_team_id.map(|id| league.team_name(id)),
            away_team_id: playoff.away_team_id,
            away_team: playoff.away_team_id.map(|id| league.team_name(id)),
            home_score: playoff.home_score,
            away_score: playoff.away_score,
            played: playoff.played,
            extra_time: playoff.extra_time,
            penalties: playoff.penalties,
            penalty_winner_id: playoff.penalty_winner_id,
            penalty_winner: playoff.penalty_winner_id.map(|id| league.team_name(id)),
        }
    }
}
