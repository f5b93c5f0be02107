//! Playoff lifecycle: seeding the four-team bracket from the final table and
//! recording two-legged semifinal scores until the bracket resolves.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{GeneratePlayoffsResponse, PlayoffResultRequest},
        common::PlayoffMatchSummary,
    },
    error::ServiceError,
    league::playoffs::{self, BRACKET_SIZE},
    state::SharedState,
};

/// Seed a fresh bracket from the current top four, wiping any previous one.
pub async fn generate_playoffs(
    state: &SharedState,
) -> Result<GeneratePlayoffsResponse, ServiceError> {
    let response = state
        .mutate(|league| {
            let ranked = league.standings.len();
            if ranked < BRACKET_SIZE {
                return Err(ServiceError::InsufficientRankedTeams { ranked });
            }

            league.playoffs = playoffs::seed_bracket(&league.standings[..BRACKET_SIZE]);
            Ok(GeneratePlayoffsResponse {
                bracket_created: true,
            })
        })
        .await?;

    info!("playoff bracket seeded from the top four");
    Ok(response)
}

/// Record the score of one playoff match, then re-run the bracket advancement
/// check. Re-entering a leg overwrites the previous score.
pub async fn record_playoff_leg(
    state: &SharedState,
    playoff_id: Uuid,
    request: PlayoffResultRequest,
) -> Result<PlayoffMatchSummary, ServiceError> {
    let summary = state
        .mutate(move |league| {
            let playoff = league
                .playoffs
                .iter_mut()
                .find(|p| p.id == playoff_id)
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("playoff match `{playoff_id}` not found"))
                })?;

            let (Some(home), Some(away)) = (playoff.home_team_id, playoff.away_team_id) else {
                return Err(ServiceError::InvalidState(
                    "participants of this playoff match are not known yet".into(),
                ));
            };

            if let Some(winner) = request.penalty_winner_id {
                if !request.penalties {
                    return Err(ServiceError::InvalidInput(
                        "a shootout winner requires the penalties flag".into(),
                    ));
                }
                if winner != home && winner != away {
                    return Err(ServiceError::InvalidInput(
                        "the shootout winner must be one of the two participants".into(),
                    ));
                }
            }

            playoff.home_score = request.home_score;
            playoff.away_score = request.away_score;
            playoff.extra_time = request.extra_time;
            playoff.penalties = request.penalties;
            playoff.penalty_winner_id = request.penalty_winner_id;
            playoff.played = true;

            let resolved = playoffs::advance_bracket(&mut league.playoffs);
            if resolved {
                info!("both semifinals resolved; final and third-place pairings set");
            } else {
                debug!("bracket not resolved yet after this leg");
            }

            let playoff = league
                .playoff_by_id(playoff_id)
                .expect("playoff row just updated");
            Ok(PlayoffMatchSummary::from_league(league, playoff))
        })
        .await?;

    info!(
        round = ?summary.round,
        score = format!("{}-{}", summary.home_score, summary.away_score),
        "playoff result recorded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminIdentity;
    use crate::dao::models::PlayoffRound;
    use crate::dto::admin::{CreateTeamRequest, GenerateScheduleRequest, RecordResultRequest};
    use crate::services::{result_service, schedule_service, team_service};
    use crate::state::testing::state_with_memory_store;

    fn leg(home: u8, away: u8) -> PlayoffResultRequest {
        PlayoffResultRequest {
            home_score: home,
            away_score: away,
            extra_time: false,
            penalties: false,
            penalty_winner_id: None,
        }
    }

    /// Four teams with a deterministic table: Alpha > Beta > Gamma > Delta.
    async fn state_with_final_table() -> SharedState {
        let state = state_with_memory_store().await;
        for name in ["Alpha", "Beta", "Gamma", "Delta"] {
            team_service::create_team(
                &state,
                CreateTeamRequest {
                    name: name.into(),
                    player_name: name.into(),
                    gamer_alias: name.to_lowercase(),
                    contact: None,
                    logo_url: None,
                },
            )
            .await
            .unwrap();
        }
        schedule_service::generate_schedule(&state, GenerateScheduleRequest { shuffle: false })
            .await
            .unwrap();

        // Give each team a different goal haul in one matchday's worth of
        // results so the ranking is strict.
        let admin = AdminIdentity {
            name: "admin".into(),
            display_name: None,
        };
        let ordered: Vec<Uuid> = state
            .with_league(|league| league.teams.values().map(|t| t.id).collect())
            .await;
        for (index, &team_id) in ordered.iter().enumerate() {
            let fixture = state
                .with_league(|league| {
                    league
                        .matches
                        .iter()
                        .find(|m| m.home_team_id == team_id)
                        .map(|m| m.id)
                        .unwrap()
                })
                .await;
            let goals = (ordered.len() - index) as u8 * 2;
            result_service::record_result(
                &state,
                fixture,
                RecordResultRequest {
                    home_score: goals,
                    away_score: 0,
                    validated: true,
                },
                &admin,
            )
            .await
            .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn seeding_requires_four_ranked_teams() {
        let state = state_with_memory_store().await;
        let err = generate_playoffs(&state).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InsufficientRankedTeams { ranked: 0 }
        ));
        state
            .with_league(|league| assert!(league.playoffs.is_empty()))
            .await;
    }

    #[tokio::test]
    async fn seeding_pairs_ranks_one_four_and_two_three() {
        let state = state_with_final_table().await;
        generate_playoffs(&state).await.unwrap();

        state
            .with_league(|league| {
                let top: Vec<Uuid> = league.standings.iter().map(|s| s.team_id).collect();
                let semi_1 = league.playoff_by_round(PlayoffRound::Semi1Leg1).unwrap();
                assert_eq!(semi_1.home_team_id, Some(top[0]));
                assert_eq!(semi_1.away_team_id, Some(top[3]));
                let semi_2 = league.playoff_by_round(PlayoffRound::Semi2Leg1).unwrap();
                assert_eq!(semi_2.home_team_id, Some(top[1]));
                assert_eq!(semi_2.away_team_id, Some(top[2]));
            })
            .await;
    }

    #[tokio::test]
    async fn recording_all_legs_fills_the_final() {
        let state = state_with_final_table().await;
        generate_playoffs(&state).await.unwrap();

        let leg_id = |state: &SharedState, round: PlayoffRound| {
            let state = state.clone();
            async move {
                state
                    .with_league(|league| league.playoff_by_round(round).unwrap().id)
                    .await
            }
        };

        record_playoff_leg(&state, leg_id(&state, PlayoffRound::Semi1Leg1).await, leg(2, 0))
            .await
            .unwrap();
        record_playoff_leg(&state, leg_id(&state, PlayoffRound::Semi1Leg2).await, leg(1, 1))
            .await
            .unwrap();
        record_playoff_leg(&state, leg_id(&state, PlayoffRound::Semi2Leg1).await, leg(0, 1))
            .await
            .unwrap();
        record_playoff_leg(&state, leg_id(&state, PlayoffRound::Semi2Leg2).await, leg(2, 0))
            .await
            .unwrap();

        state
            .with_league(|league| {
                let top: Vec<Uuid> = league.standings.iter().map(|s| s.team_id).collect();
                let final_match = league.playoff_by_round(PlayoffRound::Final).unwrap();
                // Semi 1 went to rank 1, semi 2 to rank 3.
                assert_eq!(final_match.home_team_id, Some(top[0]));
                assert_eq!(final_match.away_team_id, Some(top[2]));
                let third = league.playoff_by_round(PlayoffRound::ThirdPlace).unwrap();
                assert_eq!(third.home_team_id, Some(top[3]));
                assert_eq!(third.away_team_id, Some(top[1]));
            })
            .await;
    }

    #[tokio::test]
    async fn the_final_cannot_be_recorded_before_it_is_paired() {
        let state = state_with_final_table().await;
        generate_playoffs(&state).await.unwrap();
        let final_id = state
            .with_league(|league| league.playoff_by_round(PlayoffRound::Final).unwrap().id)
            .await;

        let err = record_playoff_leg(&state, final_id, leg(1, 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[tokio::test]
    async fn a_foreign_shootout_winner_is_rejected() {
        let state = state_with_final_table().await;
        generate_playoffs(&state).await.unwrap();
        let leg2_id = state
            .with_league(|league| league.playoff_by_round(PlayoffRound::Semi1Leg2).unwrap().id)
            .await;

        let request = PlayoffResultRequest {
            home_score: 1,
            away_score: 1,
            extra_time: true,
            penalties: true,
            penalty_winner_id: Some(Uuid::new_v4()),
        };
        let err = record_playoff_leg(&state, leg2_id, request).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
