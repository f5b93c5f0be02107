use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Registered team and its roster metadata, shared across layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Team name, unique across the competition.
    pub name: String,
    /// Real name of the player behind the team.
    pub player_name: String,
    /// In-game alias of the player.
    pub gamer_alias: String,
    /// Optional contact (phone number).
    pub contact: Option<String>,
    /// Optional URL of the team logo; upload storage lives outside the backend.
    pub logo_url: Option<String>,
    /// Inactive teams are excluded from schedule generation.
    pub active: bool,
    /// Registration timestamp.
    pub created_at: SystemTime,
}

/// Half of the double round-robin a fixture belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening half of the season.
    FirstLeg,
    /// Return half, home/away reversed.
    SecondLeg,
}

/// Scheduled fixture between two teams.
///
/// The unordered team pair is unique within a phase; the generator is the only
/// producer of these rows and recording a result is the only mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEntity {
    /// Stable identifier for the fixture.
    pub id: Uuid,
    /// Team playing at home.
    pub home_team_id: Uuid,
    /// Team playing away.
    pub away_team_id: Uuid,
    /// 1-based matchday index within the phase.
    pub matchday: u32,
    /// Which half of the season the fixture belongs to.
    pub phase: Phase,
    /// Set once a result has been recorded.
    pub played: bool,
    /// When the match was played, if known.
    pub played_at: Option<SystemTime>,
}

/// Recorded score for a fixture, at most one per match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultEntity {
    /// Stable identifier for the result.
    pub id: Uuid,
    /// Fixture this score belongs to.
    pub match_id: Uuid,
    /// Goals scored by the home team.
    pub home_score: u8,
    /// Goals scored by the away team.
    pub away_score: u8,
    /// Only validated results feed the standings.
    pub validated: bool,
    /// Name of the admin who validated the result.
    pub validated_by: Option<String>,
    /// First time the result was entered.
    pub recorded_at: SystemTime,
    /// Last modification timestamp.
    pub updated_at: SystemTime,
}

/// Aggregate line of the league table for one team.
///
/// Entirely derived from validated results; never hand-edited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StandingEntity {
    /// Team this line belongs to.
    pub team_id: Uuid,
    /// Matches counted (won + drawn + lost).
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
    /// 3 per win, 1 per draw.
    pub points: u32,
    /// 1-based rank; 0 until the first ranking pass.
    pub position: u32,
}

impl StandingEntity {
    /// Zeroed line for a team that has not played yet.
    pub fn zeroed(team_id: Uuid) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position: 0,
        }
    }
}

/// Slot in the four-team knockout bracket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayoffRound {
    /// First semifinal, opening leg (rank 1 at home vs rank 4).
    Semi1Leg1,
    /// First semifinal, return leg (rank 4 at home vs rank 1).
    Semi1Leg2,
    /// Second semifinal, opening leg (rank 2 at home vs rank 3).
    Semi2Leg1,
    /// Second semifinal, return leg (rank 3 at home vs rank 2).
    Semi2Leg2,
    /// Single match between the two semifinal losers.
    ThirdPlace,
    /// Single match between the two semifinal winners.
    Final,
}

/// Knockout-stage match.
///
/// Third place and final start with unset participants; the bracket engine
/// back-fills them once both legs of each semifinal are played.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayoffMatchEntity {
    /// Stable identifier for the playoff match.
    pub id: Uuid,
    /// Bracket slot this match occupies.
    pub round: PlayoffRound,
    /// Home team, unset until qualification is known.
    pub home_team_id: Option<Uuid>,
    /// Away team, unset until qualification is known.
    pub away_team_id: Option<Uuid>,
    /// Goals scored by the home team.
    pub home_score: u8,
    /// Goals scored by the away team.
    pub away_score: u8,
    /// Set once a score has been recorded.
    pub played: bool,
    /// Whether the match went to extra time.
    pub extra_time: bool,
    /// Whether the match was decided by a penalty shootout.
    pub penalties: bool,
    /// Shootout winner, constrained to the two participants.
    pub penalty_winner_id: Option<Uuid>,
}

impl PlayoffMatchEntity {
    /// Empty bracket slot for the given round.
    pub fn unset(round: PlayoffRound) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            home_team_id: None,
            away_team_id: None,
            home_score: 0,
            away_score: 0,
            played: false,
            extra_time: false,
            penalties: false,
            penalty_winner_id: None,
        }
    }

    /// Seeded bracket slot with both participants known.
    pub fn seeded(round: PlayoffRound, home_team_id: Uuid, away_team_id: Uuid) -> Self {
        Self {
            home_team_id: Some(home_team_id),
            away_team_id: Some(away_team_id),
            ..Self::unset(round)
        }
    }
}

/// Aggregate competition snapshot persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueEntity {
    /// Registered teams.
    pub teams: Vec<TeamEntity>,
    /// Scheduled fixtures for both phases.
    pub matches: Vec<MatchEntity>,
    /// Recorded results, one per played fixture.
    pub results: Vec<ResultEntity>,
    /// League table lines in ranked order.
    pub standings: Vec<StandingEntity>,
    /// Knockout bracket rows.
    pub playoffs: Vec<PlayoffMatchEntity>,
    /// Last time the aggregate was modified.
    pub updated_at: SystemTime,
}
