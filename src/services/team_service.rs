//! Roster management: team registration, updates and removal. Creating a team
//! immediately gives it a zeroed table line; deleting one cascades over its
//! fixtures and results and rebuilds the standings.

use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::TeamEntity,
    dto::{
        admin::{CreateTeamRequest, UpdateTeamRequest},
        common::TeamSummary,
    },
    error::ServiceError,
    league::standings,
    state::SharedState,
};

/// Register a new team and give it a zeroed standings line.
pub async fn create_team(
    state: &SharedState,
    request: CreateTeamRequest,
) -> Result<TeamSummary, ServiceError> {
    let team = state
        .mutate(|league| {
            if league.name_taken(&request.name, None) {
                return Err(ServiceError::InvalidInput(format!(
                    "team name `{}` is already taken",
                    request.name
                )));
            }

            let team = TeamEntity {
                id: Uuid::new_v4(),
                name: request.name.trim().to_owned(),
                player_name: request.player_name.trim().to_owned(),
                gamer_alias: request.gamer_alias.trim().to_owned(),
                contact: request.contact.clone(),
                logo_url: request.logo_url.clone(),
                active: true,
                created_at: SystemTime::now(),
            };

            standings::ensure_line(league, team.id);
            standings::rank(&mut league.standings);
            league.teams.insert(team.id, team.clone());
            Ok(team)
        })
        .await?;

    info!(team = %team.name, id = %team.id, "team registered");
    Ok(team.into())
}

/// Update a team's roster metadata and active flag.
pub async fn update_team(
    state: &SharedState,
    team_id: Uuid,
    request: UpdateTeamRequest,
) -> Result<TeamSummary, ServiceError> {
    let team = state
        .mutate(|league| {
            if league.name_taken(&request.name, Some(team_id)) {
                return Err(ServiceError::InvalidInput(format!(
                    "team name `{}` is already taken",
                    request.name
                )));
            }

            let team = league
                .teams
                .get_mut(&team_id)
                .ok_or_else(|| ServiceError::NotFound(format!("team `{team_id}` not found")))?;

            team.name = request.name.trim().to_owned();
            team.player_name = request.player_name.trim().to_owned();
            team.gamer_alias = request.gamer_alias.trim().to_owned();
            team.contact = request.contact.clone();
            team.logo_url = request.logo_url.clone();
            team.active = request.active;

            Ok(team.clone())
        })
        .await?;

    info!(team = %team.name, id = %team.id, active = team.active, "team updated");
    Ok(team.into())
}

/// Remove a team together with its fixtures, results and table line, then
/// rebuild the standings from what remains.
pub async fn delete_team(state: &SharedState, team_id: Uuid) -> Result<(), ServiceError> {
    let name = state
        .mutate(|league| {
            let team = league
                .teams
                .shift_remove(&team_id)
                .ok_or_else(|| ServiceError::NotFound(format!("team `{team_id}` not found")))?;

            let removed_matches: Vec<Uuid> = league
                .matches
                .iter()
                .filter(|m| m.home_team_id == team_id || m.away_team_id == team_id)
                .map(|m| m.id)
                .collect();
            league
                .matches
                .retain(|m| m.home_team_id != team_id && m.away_team_id != team_id);
            league
                .results
                .retain(|r| !removed_matches.contains(&r.match_id));
            league.standings.retain(|s| s.team_id != team_id);

            // Bracket slots the team occupied disappear with it; a shootout
            // credit alone is cleared in place.
            league.playoffs.retain(|p| {
                p.home_team_id != Some(team_id) && p.away_team_id != Some(team_id)
            });
            for playoff in &mut league.playoffs {
                if playoff.penalty_winner_id == Some(team_id) {
                    playoff.penalty_winner_id = None;
                }
            }

            standings::recompute_all(league);
            Ok(team.name)
        })
        .await?;

    info!(team = %name, id = %team_id, "team deleted with its fixtures and results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::state_with_memory_store;

    fn request(name: &str) -> CreateTeamRequest {
        CreateTeamRequest {
            name: name.into(),
            player_name: format!("{name} player"),
            gamer_alias: name.to_lowercase(),
            contact: None,
            logo_url: None,
        }
    }

    #[tokio::test]
    async fn a_new_team_gets_a_zeroed_standings_line() {
        let state = state_with_memory_store().await;
        let team = create_team(&state, request("Alpha")).await.unwrap();

        state
            .with_league(|league| {
                let line = league.standing_for(team.id).expect("line must exist");
                assert_eq!(line.played, 0);
                assert_eq!(line.points, 0);
                assert_eq!(line.position, 1);
            })
            .await;
    }

    #[tokio::test]
    async fn duplicate_names_are_rejected_case_insensitively() {
        let state = state_with_memory_store().await;
        create_team(&state, request("Alpha")).await.unwrap();

        let err = create_team(&state, request("ALPHA")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deleting_a_team_cascades_and_rebuilds_the_table() {
        let state = state_with_memory_store().await;
        for name in ["Alpha", "Beta", "Gamma", "Delta"] {
            create_team(&state, request(name)).await.unwrap();
        }
        crate::services::schedule_service::generate_schedule(
            &state,
            crate::dto::admin::GenerateScheduleRequest { shuffle: false },
        )
        .await
        .unwrap();

        let victim = state
            .with_league(|league| league.teams.values().next().unwrap().id)
            .await;
        delete_team(&state, victim).await.unwrap();

        state
            .with_league(|league| {
                assert_eq!(league.teams.len(), 3);
                assert!(league.matches.iter().all(|m| {
                    m.home_team_id != victim && m.away_team_id != victim
                }));
                assert!(league.standing_for(victim).is_none());
                assert_eq!(league.standings.len(), 3);
            })
            .await;
    }
}
