use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::public::{
        GoalsChartQuery, GoalsChartResponse, MatchFilterQuery, MatchListResponse,
        PlayoffBracketResponse, ResultListResponse, StandingsResponse, StatsOverviewResponse,
        TeamDetailResponse, TeamsResponse,
    },
    error::AppError,
    services::stats_service,
    state::SharedState,
};

/// Public read-only endpoints exposing the competition state.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/public/teams", get(list_teams))
        .route("/public/teams/{id}", get(team_detail))
        .route("/public/matches", get(list_matches))
        .route("/public/results", get(list_results))
        .route("/public/standings", get(standings))
        .route("/public/charts/goals", get(goals_chart))
        .route("/public/stats", get(stats_overview))
        .route("/public/playoffs", get(playoff_bracket))
}

#[utoipa::path(
    get,
    path = "/public/teams",
    tag = "public",
    responses((status = 200, description = "Active teams", body = TeamsResponse))
)]
/// Return the active teams in alphabetical order.
pub async fn list_teams(
    State(state): State<SharedState>,
) -> Result<Json<TeamsResponse>, AppError> {
    Ok(Json(stats_service::list_teams(&state).await?))
}

#[utoipa::path(
    get,
    path = "/public/teams/{id}",
    tag = "public",
    params(("id" = Uuid, Path, description = "Identifier of the team")),
    responses(
        (status = 200, description = "Team detail", body = TeamDetailResponse),
        (status = 404, description = "Unknown team")
    )
)]
/// Return one team with its fixtures, validated results, table line and form.
pub async fn team_detail(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamDetailResponse>, AppError> {
    Ok(Json(stats_service::team_detail(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/public/matches",
    tag = "public",
    params(MatchFilterQuery),
    responses((status = 200, description = "Match calendar", body = MatchListResponse))
)]
/// Return the match calendar grouped by phase and matchday.
pub async fn list_matches(
    State(state): State<SharedState>,
    Query(filter): Query<MatchFilterQuery>,
) -> Result<Json<MatchListResponse>, AppError> {
    Ok(Json(stats_service::list_matches(&state, filter).await?))
}

#[utoipa::path(
    get,
    path = "/public/results",
    tag = "public",
    responses((status = 200, description = "Validated results", body = ResultListResponse))
)]
/// Return the validated results grouped by phase and matchday.
pub async fn list_results(
    State(state): State<SharedState>,
) -> Result<Json<ResultListResponse>, AppError> {
    Ok(Json(stats_service::list_results(&state).await?))
}

#[utoipa::path(
    get,
    path = "/public/standings",
    tag = "public",
    responses((status = 200, description = "Ordered league table", body = StandingsResponse))
)]
/// Return the ordered league table.
pub async fn standings(
    State(state): State<SharedState>,
) -> Result<Json<StandingsResponse>, AppError> {
    Ok(Json(stats_service::standings_snapshot(&state).await?))
}

#[utoipa::path(
    get,
    path = "/public/charts/goals",
    tag = "public",
    params(GoalsChartQuery),
    responses((status = 200, description = "Goals chart series", body = GoalsChartResponse))
)]
/// Return goals-for/goals-against series for charting clients.
pub async fn goals_chart(
    State(state): State<SharedState>,
    Query(query): Query<GoalsChartQuery>,
) -> Result<Json<GoalsChartResponse>, AppError> {
    let top_n = query.top.unwrap_or_else(|| state.config().chart_top_n());
    Ok(Json(stats_service::goals_snapshot(&state, top_n).await?))
}

#[utoipa::path(
    get,
    path = "/public/stats",
    tag = "public",
    responses((status = 200, description = "Competition overview", body = StatsOverviewResponse))
)]
/// Return aggregate competition figures for the public dashboard.
pub async fn stats_overview(
    State(state): State<SharedState>,
) -> Result<Json<StatsOverviewResponse>, AppError> {
    Ok(Json(stats_service::stats_overview(&state).await?))
}

#[utoipa::path(
    get,
    path = "/public/playoffs",
    tag = "public",
    responses((status = 200, description = "Knockout bracket", body = PlayoffBracketResponse))
)]
/// Return the knockout bracket together with the current top four.
pub async fn playoff_bracket(
    State(state): State<SharedState>,
) -> Result<Json<PlayoffBracketResponse>, AppError> {
    Ok(Json(stats_service::playoff_bracket(&state).await?))
}
