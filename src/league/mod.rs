//! Runtime competition state and the pure competition-logic engine.
//!
//! The [`League`] aggregate mirrors the persisted [`LeagueEntity`] with
//! indexed lookups for the service layer. The engine submodules hold the
//! algorithmic core: fixture generation, standings computation and playoff
//! bracket resolution. All of them are plain functions over the aggregate so
//! every derived value can be rebuilt from stored data at any time.

pub mod playoffs;
pub mod schedule;
pub mod standings;

use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::{
    LeagueEntity, MatchEntity, PlayoffMatchEntity, PlayoffRound, ResultEntity, StandingEntity,
    TeamEntity,
};

/// In-memory competition aggregate, the working set of every service call.
#[derive(Debug, Clone)]
pub struct League {
    /// Registered teams keyed by id, in registration order.
    pub teams: IndexMap<Uuid, TeamEntity>,
    /// Scheduled fixtures for both phases.
    pub matches: Vec<MatchEntity>,
    /// Recorded results, one per played fixture.
    pub results: Vec<ResultEntity>,
    /// League table lines, kept in ranked order.
    pub standings: Vec<StandingEntity>,
    /// Knockout bracket rows.
    pub playoffs: Vec<PlayoffMatchEntity>,
    /// Last time the aggregate was modified.
    pub updated_at: SystemTime,
}

impl Default for League {
    fn default() -> Self {
        Self {
            teams: IndexMap::new(),
            matches: Vec::new(),
            results: Vec::new(),
            standings: Vec::new(),
            playoffs: Vec::new(),
            // Epoch marks a pristine aggregate that a persisted snapshot may
            // replace on startup.
            updated_at: UNIX_EPOCH,
        }
    }
}

impl League {
    /// Whether the aggregate still holds the untouched default state.
    pub fn is_pristine(&self) -> bool {
        self.updated_at == UNIX_EPOCH && self.teams.is_empty()
    }

    /// Teams participating in the competition, in registration order.
    pub fn active_teams(&self) -> Vec<&TeamEntity> {
        self.teams.values().filter(|team| team.active).collect()
    }

    /// Look up a team by id.
    pub fn team(&self, id: Uuid) -> Option<&TeamEntity> {
        self.teams.get(&id)
    }

    /// Display name for a team id, or a placeholder when unknown.
    pub fn team_name(&self, id: Uuid) -> String {
        self.teams
            .get(&id)
            .map(|team| team.name.clone())
            .unwrap_or_else(|| "unknown".into())
    }

    /// Whether another team already uses `name` (case-insensitive).
    pub fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> bool {
        self.teams.values().any(|team| {
            team.name.eq_ignore_ascii_case(name) && Some(team.id) != exclude
        })
    }

    /// Look up a fixture by id.
    pub fn match_by_id(&self, id: Uuid) -> Option<&MatchEntity> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Mutable fixture lookup.
    pub fn match_by_id_mut(&mut self, id: Uuid) -> Option<&mut MatchEntity> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Result attached to a fixture, if any.
    pub fn result_for_match(&self, match_id: Uuid) -> Option<&ResultEntity> {
        self.results.iter().find(|r| r.match_id == match_id)
    }

    /// Look up a result by its own id.
    pub fn result_by_id(&self, id: Uuid) -> Option<&ResultEntity> {
        self.results.iter().find(|r| r.id == id)
    }

    /// Mutable result lookup by id.
    pub fn result_by_id_mut(&mut self, id: Uuid) -> Option<&mut ResultEntity> {
        self.results.iter_mut().find(|r| r.id == id)
    }

    /// League table line for a team, if one exists.
    pub fn standing_for(&self, team_id: Uuid) -> Option<&StandingEntity> {
        self.standings.iter().find(|s| s.team_id == team_id)
    }

    /// Look up a playoff match by id.
    pub fn playoff_by_id(&self, id: Uuid) -> Option<&PlayoffMatchEntity> {
        self.playoffs.iter().find(|p| p.id == id)
    }

    /// Playoff match occupying the given bracket slot.
    pub fn playoff_by_round(&self, round: PlayoffRound) -> Option<&PlayoffMatchEntity> {
        self.playoffs.iter().find(|p| p.round == round)
    }
}

impl From<LeagueEntity> for League {
    fn from(entity: LeagueEntity) -> Self {
        Self {
            teams: entity
                .teams
                .into_iter()
                .map(|team| (team.id, team))
                .collect(),
            matches: entity.matches,
            results: entity.results,
            standings: entity.standings,
            playoffs: entity.playoffs,
            updated_at: entity.updated_at,
        }
    }
}

impl From<League> for LeagueEntity {
    fn from(league: League) -> Self {
        Self {
            teams: league.teams.into_values().collect(),
            matches: league.matches,
            results: league.results,
            standings: league.standings,
            playoffs: league.playoffs,
            updated_at: league.updated_at,
        }
    }
}
