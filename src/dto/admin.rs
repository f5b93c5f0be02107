//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::{
    common::{ResultSummary, StandingRow},
    validation::validate_team_name,
};

fn default_true() -> bool {
    true
}

/// Payload to register a new team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    /// Team name, unique across the competition.
    pub name: String,
    /// Real name of the player behind the team.
    pub player_name: String,
    /// In-game alias of the player.
    pub gamer_alias: String,
    /// Optional contact (phone number).
    #[serde(default)]
    pub contact: Option<String>,
    /// Optional logo URL.
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Validate for CreateTeamRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_name(&self.name) {
            errors.add("name", e);
        }
        if self.player_name.trim().is_empty() {
            errors.add("player_name", validator::ValidationError::new("required"));
        }
        if self.gamer_alias.trim().is_empty() {
            errors.add("gamer_alias", validator::ValidationError::new("required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Payload to update an existing team.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTeamRequest {
    /// New team name.
    pub name: String,
    /// Real name of the player behind the team.
    pub player_name: String,
    /// In-game alias of the player.
    pub gamer_alias: String,
    /// Optional contact (phone number).
    #[serde(default)]
    pub contact: Option<String>,
    /// Optional logo URL.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Whether the team takes part in future schedule generation.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Validate for UpdateTeamRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_team_name(&self.name) {
            errors.add("name", e);
        }
        if self.player_name.trim().is_empty() {
            errors.add("player_name", validator::ValidationError::new("required"));
        }
        if self.gamer_alias.trim().is_empty() {
            errors.add("gamer_alias", validator::ValidationError::new("required"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Request to regenerate the double round-robin schedule.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenerateScheduleRequest {
    /// Shuffle the draw order before pairing; affects only which team meets
    /// which on a given matchday, never fixture completeness.
    #[serde(default = "default_true")]
    pub shuffle: bool,
}

/// Outcome of a schedule generation run.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateScheduleResponse {
    /// Fixtures created across both phases.
    pub matches_created: usize,
    /// Matchdays per phase.
    pub matchdays: u32,
}

/// Payload to record or overwrite the result of a league fixture.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordResultRequest {
    /// Goals scored by the home team.
    #[validate(range(max = 99))]
    pub home_score: u8,
    /// Goals scored by the away team.
    #[validate(range(max = 99))]
    pub away_score: u8,
    /// Whether the result is validated immediately; unvalidated results wait
    /// on the dashboard and do not feed the standings.
    #[serde(default = "default_true")]
    pub validated: bool,
}

/// Payload to record the result of a playoff match.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct PlayoffResultRequest {
    /// Goals scored by the home team.
    #[validate(range(max = 99))]
    pub home_score: u8,
    /// Goals scored by the away team.
    #[validate(range(max = 99))]
    pub away_score: u8,
    /// Whether the match went to extra time.
    #[serde(default)]
    pub extra_time: bool,
    /// Whether a penalty shootout decided the match.
    #[serde(default)]
    pub penalties: bool,
    /// Shootout winner; must be one of the two participants.
    #[serde(default)]
    pub penalty_winner_id: Option<Uuid>,
}

/// Outcome of a playoff seeding run.
#[derive(Debug, Serialize, ToSchema)]
pub struct GeneratePlayoffsResponse {
    /// Whether a fresh bracket was created.
    pub bracket_created: bool,
}

/// Ordered league table returned by an explicit recompute.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecomputeStandingsResponse {
    /// Table lines in ranked order.
    pub standings: Vec<StandingRow>,
    /// How many lines changed position during the re-rank.
    pub positions_changed: usize,
}

/// Administration dashboard figures.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Active teams.
    pub total_teams: usize,
    /// Fixtures across both phases.
    pub total_matches: usize,
    /// Fixtures with a recorded result.
    pub matches_played: usize,
    /// Goals across validated results.
    pub total_goals: u32,
    /// Whether a schedule exists.
    pub schedule_generated: bool,
    /// Results awaiting validation, newest first.
    pub pending_results: Vec<ResultSummary>,
}
