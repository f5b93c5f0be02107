//! Read-only projections: team pages, calendar, results, standings snapshots,
//! chart series and the dashboards.

use uuid::Uuid;

use crate::{
    dao::models::{Phase, PlayoffRound},
    dto::{
        admin::DashboardResponse,
        common::{MatchSummary, PlayoffMatchSummary, ResultSummary, StandingRow, TeamSummary},
        public::{
            FormOutcome, GoalsChartResponse, MatchFilterQuery, MatchListResponse, MatchdayGroup,
            PlayoffBracketResponse, ResultGroup, ResultListResponse, StandingsResponse,
            StatsOverviewResponse, TeamDetailResponse, TeamsResponse,
        },
    },
    error::ServiceError,
    league::{League, playoffs::BRACKET_SIZE},
    state::SharedState,
};

/// How many entries the overview lists carry.
const OVERVIEW_LIST_LEN: usize = 5;

fn phase_order(phase: Phase) -> u8 {
    match phase {
        Phase::FirstLeg => 0,
        Phase::SecondLeg => 1,
    }
}

/// Active teams in alphabetical order.
pub async fn list_teams(state: &SharedState) -> Result<TeamsResponse, ServiceError> {
    let teams = state
        .with_league(|league| {
            let mut teams: Vec<TeamSummary> = league
                .active_teams()
                .into_iter()
                .cloned()
                .map(Into::into)
                .collect();
            teams.sort_by(|a, b| a.name.cmp(&b.name));
            teams
        })
        .await;

    Ok(TeamsResponse { teams })
}

/// Full public view of one team: fixtures, results, table line and form.
pub async fn team_detail(
    state: &SharedState,
    team_id: Uuid,
) -> Result<TeamDetailResponse, ServiceError> {
    state
        .with_league(|league| {
            let team = league
                .team(team_id)
                .ok_or_else(|| ServiceError::NotFound(format!("team `{team_id}` not found")))?;

            let mut matches: Vec<MatchSummary> = league
                .matches
                .iter()
                .filter(|m| m.home_team_id == team_id || m.away_team_id == team_id)
                .map(|m| MatchSummary::from_league(league, m))
                .collect();
            matches.sort_by_key(|m| (phase_order(m.phase), m.matchday));

            let mut validated: Vec<&crate::dao::models::ResultEntity> = league
                .results
                .iter()
                .filter(|r| r.validated)
                .filter(|r| {
                    league.match_by_id(r.match_id).is_some_and(|m| {
                        m.home_team_id == team_id || m.away_team_id == team_id
                    })
                })
                .collect();
            validated.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

            let form = validated
                .iter()
                .take(OVERVIEW_LIST_LEN)
                .filter_map(|result| {
                    let fixture = league.match_by_id(result.match_id)?;
                    let (scored, conceded) = if fixture.home_team_id == team_id {
                        (result.home_score, result.away_score)
                    } else {
                        (result.away_score, result.home_score)
                    };
                    Some(if scored > conceded {
                        FormOutcome::W
                    } else if scored == conceded {
                        FormOutcome::D
                    } else {
                        FormOutcome::L
                    })
                })
                .collect();

            let results = validated
                .iter()
                .filter_map(|&result| ResultSummary::from_league(league, result))
                .collect();

            Ok(TeamDetailResponse {
                team: team.clone().into(),
                standing: league
                    .standing_for(team_id)
                    .map(|line| StandingRow::from_league(league, line)),
                matches,
                results,
                form,
            })
        })
        .await
}

/// Match calendar with optional team/matchday/phase filters, grouped by phase
/// and matchday.
pub async fn list_matches(
    state: &SharedState,
    filter: MatchFilterQuery,
) -> Result<MatchListResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let mut fixtures: Vec<&crate::dao::models::MatchEntity> = league
                .matches
                .iter()
                .filter(|m| {
                    filter
                        .team
                        .is_none_or(|team| m.home_team_id == team || m.away_team_id == team)
                })
                .filter(|m| filter.matchday.is_none_or(|day| m.matchday == day))
                .filter(|m| filter.phase.is_none_or(|phase| m.phase == phase))
                .collect();
            fixtures.sort_by_key(|m| (phase_order(m.phase), m.matchday));

            let mut groups: Vec<MatchdayGroup> = Vec::new();
            for fixture in fixtures {
                let summary = MatchSummary::from_league(league, fixture);
                match groups.last_mut() {
                    Some(group)
                        if group.phase == fixture.phase && group.matchday == fixture.matchday =>
                    {
                        group.matches.push(summary);
                    }
                    _ => groups.push(MatchdayGroup {
                        phase: fixture.phase,
                        matchday: fixture.matchday,
                        matches: vec![summary],
                    }),
                }
            }

            let mut matchdays: Vec<u32> = league.matches.iter().map(|m| m.matchday).collect();
            matchdays.sort_unstable();
            matchdays.dedup();

            MatchListResponse { groups, matchdays }
        })
        .await;

    Ok(response)
}

/// Validated results grouped by phase and matchday, most recent phase first.
pub async fn list_results(state: &SharedState) -> Result<ResultListResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let mut entries: Vec<(Phase, u32, ResultSummary)> = league
                .results
                .iter()
                .filter(|r| r.validated)
                .filter_map(|r| {
                    let summary = ResultSummary::from_league(league, r)?;
                    Some((summary.phase, summary.matchday, summary))
                })
                .collect();
            // Return phase before first phase, late matchdays first.
            entries.sort_by(|a, b| {
                phase_order(b.0)
                    .cmp(&phase_order(a.0))
                    .then(b.1.cmp(&a.1))
            });

            let mut groups: Vec<ResultGroup> = Vec::new();
            for (phase, matchday, summary) in entries {
                match groups.last_mut() {
                    Some(group) if group.phase == phase && group.matchday == matchday => {
                        group.results.push(summary);
                    }
                    _ => groups.push(ResultGroup {
                        phase,
                        matchday,
                        results: vec![summary],
                    }),
                }
            }

            ResultListResponse { groups }
        })
        .await;

    Ok(response)
}

/// Ordered league table; the stable JSON contract for charting clients.
pub async fn standings_snapshot(state: &SharedState) -> Result<StandingsResponse, ServiceError> {
    let standings = state
        .with_league(|league| {
            league
                .standings
                .iter()
                .map(|line| StandingRow::from_league(league, line))
                .collect()
        })
        .await;

    Ok(StandingsResponse { standings })
}

/// Goals-for/goals-against series for the `top_n` best attacks.
pub async fn goals_snapshot(
    state: &SharedState,
    top_n: usize,
) -> Result<GoalsChartResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let mut lines = league.standings.clone();
            lines.sort_by(|a, b| b.goals_for.cmp(&a.goals_for));
            lines.truncate(top_n);

            GoalsChartResponse {
                teams: lines
                    .iter()
                    .map(|line| league.team_name(line.team_id))
                    .collect(),
                goals_for: lines.iter().map(|line| line.goals_for).collect(),
                goals_against: lines.iter().map(|line| line.goals_against).collect(),
            }
        })
        .await;

    Ok(response)
}

fn total_validated_goals(league: &League) -> u32 {
    league
        .results
        .iter()
        .filter(|r| r.validated)
        .map(|r| u32::from(r.home_score) + u32::from(r.away_score))
        .sum()
}

/// Aggregate figures for the public dashboard.
pub async fn stats_overview(state: &SharedState) -> Result<StatsOverviewResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let total_matches = league.matches.len();
            let matches_played = league.matches.iter().filter(|m| m.played).count();
            let total_goals = total_validated_goals(league);

            let average_goals = if matches_played > 0 {
                (f64::from(total_goals) / matches_played as f64 * 100.0).round() / 100.0
            } else {
                0.0
            };
            let progress = if total_matches > 0 {
                (matches_played as f64 / total_matches as f64 * 1000.0).round() / 10.0
            } else {
                0.0
            };

            let mut last_results: Vec<&crate::dao::models::ResultEntity> =
                league.results.iter().filter(|r| r.validated).collect();
            last_results.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

            let mut next_matches: Vec<&crate::dao::models::MatchEntity> =
                league.matches.iter().filter(|m| !m.played).collect();
            next_matches.sort_by_key(|m| (phase_order(m.phase), m.matchday));

            let best_attack = league
                .standings
                .iter()
                .max_by_key(|line| line.goals_for)
                .map(|line| StandingRow::from_league(league, line));
            let best_defense = league
                .standings
                .iter()
                .min_by_key(|line| line.goals_against)
                .map(|line| StandingRow::from_league(league, line));

            StatsOverviewResponse {
                total_teams: league.active_teams().len(),
                total_matches,
                matches_played,
                matches_remaining: total_matches - matches_played,
                total_goals,
                average_goals,
                progress,
                top_standings: league
                    .standings
                    .iter()
                    .take(OVERVIEW_LIST_LEN)
                    .map(|line| StandingRow::from_league(league, line))
                    .collect(),
                last_results: last_results
                    .into_iter()
                    .take(OVERVIEW_LIST_LEN)
                    .filter_map(|r| ResultSummary::from_league(league, r))
                    .collect(),
                next_matches: next_matches
                    .into_iter()
                    .take(OVERVIEW_LIST_LEN)
                    .map(|m| MatchSummary::from_league(league, m))
                    .collect(),
                best_attack,
                best_defense,
            }
        })
        .await;

    Ok(response)
}

/// Knockout bracket view with the current top four.
pub async fn playoff_bracket(state: &SharedState) -> Result<PlayoffBracketResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let by_round = |round: PlayoffRound| {
                league
                    .playoff_by_round(round)
                    .map(|p| PlayoffMatchSummary::from_league(league, p))
            };

            PlayoffBracketResponse {
                seeded: !league.playoffs.is_empty(),
                semifinal_one: [PlayoffRound::Semi1Leg1, PlayoffRound::Semi1Leg2]
                    .into_iter()
                    .filter_map(by_round)
                    .collect(),
                semifinal_two: [PlayoffRound::Semi2Leg1, PlayoffRound::Semi2Leg2]
                    .into_iter()
                    .filter_map(by_round)
                    .collect(),
                third_place: by_round(PlayoffRound::ThirdPlace),
                final_match: by_round(PlayoffRound::Final),
                top_four: league
                    .standings
                    .iter()
                    .take(BRACKET_SIZE)
                    .map(|line| StandingRow::from_league(league, line))
                    .collect(),
            }
        })
        .await;

    Ok(response)
}

/// Administration dashboard: totals plus the results awaiting validation.
pub async fn admin_dashboard(state: &SharedState) -> Result<DashboardResponse, ServiceError> {
    let response = state
        .with_league(|league| {
            let mut pending: Vec<&crate::dao::models::ResultEntity> =
                league.results.iter().filter(|r| !r.validated).collect();
            pending.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

            DashboardResponse {
                total_teams: league.active_teams().len(),
                total_matches: league.matches.len(),
                matches_played: league.matches.iter().filter(|m| m.played).count(),
                total_goals: total_validated_goals(league),
                schedule_generated: !league.matches.is_empty(),
                pending_results: pending
                    .into_iter()
                    .filter_map(|r| ResultSummary::from_league(league, r))
                    .collect(),
            }
        })
        .await;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminIdentity;
    use crate::dto::admin::{CreateTeamRequest, GenerateScheduleRequest, RecordResultRequest};
    use crate::services::{result_service, schedule_service, team_service};
    use crate::state::testing::state_with_memory_store;

    async fn seeded_state() -> SharedState {
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
        state
    }

    #[tokio::test]
    async fn the_calendar_groups_fixtures_by_phase_and_matchday() {
        let state = seeded_state().await;
        let calendar = list_matches(&state, MatchFilterQuery::default()).await.unwrap();

        // 4 teams: 3 matchdays per phase, two fixtures each.
        assert_eq!(calendar.groups.len(), 6);
        assert!(calendar.groups.iter().all(|g| g.matches.len() == 2));
        assert_eq!(calendar.matchdays, vec![1, 2, 3]);

        let first = &calendar.groups[0];
        assert_eq!(first.phase, Phase::FirstLeg);
        assert_eq!(first.matchday, 1);
    }

    #[tokio::test]
    async fn the_goals_chart_is_capped_and_sorted_by_attack() {
        let state = seeded_state().await;
        let admin = AdminIdentity {
            name: "admin".into(),
            display_name: None,
        };
        let match_id = state.with_league(|league| league.matches[0].id).await;
        result_service::record_result(
            &state,
            match_id,
            RecordResultRequest {
                home_score: 5,
                away_score: 1,
                validated: true,
            },
            &admin,
        )
        .await
        .unwrap();

        let chart = goals_snapshot(&state, 2).await.unwrap();
        assert_eq!(chart.teams.len(), 2);
        assert_eq!(chart.goals_for[0], 5);
        assert!(chart.goals_for[0] >= chart.goals_for[1]);
    }

    #[tokio::test]
    async fn the_overview_counts_played_and_remaining_fixtures() {
        let state = seeded_state().await;
        let admin = AdminIdentity {
            name: "admin".into(),
            display_name: None,
        };
        let match_id = state.with_league(|league| league.matches[0].id).await;
        result_service::record_result(
            &state,
            match_id,
            RecordResultRequest {
                home_score: 2,
                away_score: 2,
                validated: true,
            },
            &admin,
        )
        .await
        .unwrap();

        let overview = stats_overview(&state).await.unwrap();
        assert_eq!(overview.total_matches, 12);
        assert_eq!(overview.matches_played, 1);
        assert_eq!(overview.matches_remaining, 11);
        assert_eq!(overview.total_goals, 4);
        assert_eq!(overview.average_goals, 4.0);
        assert_eq!(overview.last_results.len(), 1);
    }

    #[tokio::test]
    async fn pending_results_show_on_the_admin_dashboard() {
        let state = seeded_state().await;
        let admin = AdminIdentity {
            name: "admin".into(),
            display_name: None,
        };
        let match_id = state.with_league(|league| league.matches[0].id).await;
        result_service::record_result(
            &state,
            match_id,
            RecordResultRequest {
                home_score: 1,
                away_score: 0,
                validated: false,
            },
            &admin,
        )
        .await
        .unwrap();

        let dashboard = admin_dashboard(&state).await.unwrap();
        assert_eq!(dashboard.pending_results.len(), 1);
        assert_eq!(dashboard.total_goals, 0, "pending goals are not counted");
        assert!(dashboard.schedule_generated);
    }
}
