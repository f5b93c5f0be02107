use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::dao::models::{
    LeagueEntity, MatchEntity, PlayoffMatchEntity, ResultEntity, StandingEntity, TeamEntity,
};

/// Fixed `_id` of the single league document; the competition has one season
/// at a time and regeneration overwrites it in place.
pub const LEAGUE_DOC_ID: &str = "league";

/// BSON document shape of the persisted league snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoLeagueDocument {
    #[serde(rename = "_id")]
    id: String,
    updated_at: DateTime,
    teams: Vec<TeamEntity>,
    matches: Vec<MatchEntity>,
    results: Vec<ResultEntity>,
    standings: Vec<StandingEntity>,
    playoffs: Vec<PlayoffMatchEntity>,
}

impl From<LeagueEntity> for MongoLeagueDocument {
    fn from(value: LeagueEntity) -> Self {
        Self {
            id: LEAGUE_DOC_ID.to_owned(),
            updated_at: DateTime::from_system_time(value.updated_at),
            teams: value.teams,
            matches: value.matches,
            results: value.results,
            standings: value.standings,
            playoffs: value.playoffs,
        }
    }
}

impl From<MongoLeagueDocument> for LeagueEntity {
    fn from(value: MongoLeagueDocument) -> Self {
        Self {
            teams: value.teams,
            matches: value.matches,
            results: value.results,
            standings: value.standings,
            playoffs: value.playoffs,
            updated_at: value.updated_at.to_system_time(),
        }
    }
}
