//! Double round-robin schedule generation.
//!
//! Generation is destructive: prior fixtures and results are cleared and the
//! standings are reset to zeroed lines for the active teams. Preconditions are
//! checked before anything is touched and the whole run lands in one snapshot
//! write, so a refused generation mutates nothing.

use std::collections::HashSet;

use rand::{rng, seq::SliceRandom};
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{MatchEntity, StandingEntity},
    dto::admin::{GenerateScheduleRequest, GenerateScheduleResponse},
    error::ServiceError,
    league::{schedule, standings},
    state::SharedState,
};

/// Regenerate the complete double round-robin calendar.
pub async fn generate_schedule(
    state: &SharedState,
    request: GenerateScheduleRequest,
) -> Result<GenerateScheduleResponse, ServiceError> {
    let response = state
        .mutate(|league| {
            let mut team_ids: Vec<Uuid> =
                league.active_teams().iter().map(|team| team.id).collect();
            if team_ids.len() < 2 {
                return Err(ServiceError::InsufficientTeams {
                    active: team_ids.len(),
                });
            }

            if request.shuffle {
                team_ids.shuffle(&mut rng());
            }

            let fixtures = schedule::double_round_robin(&team_ids);

            // The generator covers each unordered pair exactly once per phase;
            // verify it anyway before wiping the previous calendar.
            let mut seen = HashSet::new();
            for fixture in &fixtures {
                let pair = if fixture.home < fixture.away {
                    (fixture.home, fixture.away)
                } else {
                    (fixture.away, fixture.home)
                };
                if !seen.insert((pair, fixture.phase)) {
                    return Err(ServiceError::DuplicateFixture {
                        home: fixture.home,
                        away: fixture.away,
                        phase: fixture.phase,
                    });
                }
            }

            let matchdays = fixtures
                .iter()
                .map(|fixture| fixture.matchday)
                .max()
                .unwrap_or(0);

            league.matches = fixtures
                .into_iter()
                .map(|fixture| MatchEntity {
                    id: Uuid::new_v4(),
                    home_team_id: fixture.home,
                    away_team_id: fixture.away,
                    matchday: fixture.matchday,
                    phase: fixture.phase,
                    played: false,
                    played_at: None,
                })
                .collect();
            league.results.clear();

            league.standings = team_ids
                .iter()
                .map(|&team_id| StandingEntity::zeroed(team_id))
                .collect();
            standings::rank(&mut league.standings);

            Ok(GenerateScheduleResponse {
                matches_created: league.matches.len(),
                matchdays,
            })
        })
        .await?;

    info!(
        matches = response.matches_created,
        matchdays = response.matchdays,
        "schedule regenerated"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::team_service;
    use crate::state::testing::state_with_memory_store;

    async fn state_with_teams(count: usize) -> SharedState {
        let state = state_with_memory_store().await;
        for index in 0..count {
            team_service::create_team(
                &state,
                crate::dto::admin::CreateTeamRequest {
                    name: format!("Team {index}"),
                    player_name: format!("Player {index}"),
                    gamer_alias: format!("alias{index}"),
                    contact: None,
                    logo_url: None,
                },
            )
            .await
            .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn refuses_to_generate_with_a_single_team() {
        let state = state_with_teams(1).await;
        let err = generate_schedule(&state, GenerateScheduleRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientTeams { active: 1 }));

        // Nothing was mutated by the refusal.
        state
            .with_league(|league| assert!(league.matches.is_empty()))
            .await;
    }

    #[tokio::test]
    async fn generates_the_expected_fixture_count() {
        for count in [4usize, 5] {
            let state = state_with_teams(count).await;
            let response = generate_schedule(&state, GenerateScheduleRequest::default())
                .await
                .unwrap();
            assert_eq!(response.matches_created, count * (count - 1));
        }
    }

    #[tokio::test]
    async fn regeneration_clears_results_and_resets_standings() {
        let state = state_with_teams(4).await;
        generate_schedule(&state, GenerateScheduleRequest::default())
            .await
            .unwrap();

        let match_id = state.with_league(|league| league.matches[0].id).await;
        crate::services::result_service::record_result(
            &state,
            match_id,
            crate::dto::admin::RecordResultRequest {
                home_score: 2,
                away_score: 1,
                validated: true,
            },
            &crate::config::AdminIdentity {
                name: "admin".into(),
                display_name: None,
            },
        )
        .await
        .unwrap();

        generate_schedule(&state, GenerateScheduleRequest::default())
            .await
            .unwrap();

        state
            .with_league(|league| {
                assert!(league.results.is_empty());
                assert!(league.standings.iter().all(|line| line.points == 0));
                assert!(league.matches.iter().all(|m| !m.played));
            })
            .await;
    }
}
