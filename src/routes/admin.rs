use axum::{
    Extension, Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    config::AdminIdentity,
    dto::{
        admin::{
            CreateTeamRequest, DashboardResponse, GeneratePlayoffsResponse,
            GenerateScheduleRequest, GenerateScheduleResponse, PlayoffResultRequest,
            RecomputeStandingsResponse, RecordResultRequest, UpdateTeamRequest,
        },
        common::{PlayoffMatchSummary, ResultSummary, TeamSummary},
    },
    error::AppError,
    services::{
        playoff_service, result_service, schedule_service, standings_service, stats_service,
        team_service,
    },
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin-only management endpoints for running the competition.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/teams", post(create_team))
        .route("/admin/teams/{id}", put(update_team).delete(delete_team))
        .route("/admin/schedule/generate", post(generate_schedule))
        .route("/admin/matches/{id}/result", post(record_result))
        .route("/admin/results/{id}/validate", post(validate_result))
        .route("/admin/results/{id}", delete(delete_result))
        .route("/admin/standings/recompute", post(recompute_standings))
        .route("/admin/playoffs/generate", post(generate_playoffs))
        .route("/admin/playoffs/{id}/result", post(record_playoff_result))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

#[utoipa::path(
    get,
    path = "/admin/dashboard",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account")),
    responses((status = 200, description = "Administration dashboard", body = DashboardResponse))
)]
/// Return administration figures including results awaiting validation.
pub async fn dashboard(
    State(state): State<SharedState>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(stats_service::admin_dashboard(&state).await?))
}

#[utoipa::path(
    post,
    path = "/admin/teams",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account")),
    request_body = CreateTeamRequest,
    responses((status = 200, description = "Team registered", body = TeamSummary))
)]
/// Register a new team; it immediately receives a zeroed standings line.
pub async fn create_team(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<CreateTeamRequest>>,
) -> Result<Json<TeamSummary>, AppError> {
    Ok(Json(team_service::create_team(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/admin/teams/{id}",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the team to update")),
    request_body = UpdateTeamRequest,
    responses((status = 200, description = "Team updated", body = TeamSummary))
)]
/// Update a team's roster metadata or exclude it from future schedules.
pub async fn update_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<UpdateTeamRequest>>,
) -> Result<Json<TeamSummary>, AppError> {
    Ok(Json(team_service::update_team(&state, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/admin/teams/{id}",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the team to delete")),
    responses((status = 204, description = "Team deleted with its fixtures and results"))
)]
/// Delete a team, cascading over its fixtures and results.
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    team_service::delete_team(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/schedule/generate",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account")),
    request_body = GenerateScheduleRequest,
    responses(
        (status = 200, description = "Schedule regenerated", body = GenerateScheduleResponse),
        (status = 409, description = "Fewer than two active teams")
    )
)]
/// Regenerate the double round-robin calendar, wiping previous fixtures,
/// results and standings.
pub async fn generate_schedule(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateScheduleRequest>,
) -> Result<Json<GenerateScheduleResponse>, AppError> {
    Ok(Json(
        schedule_service::generate_schedule(&state, payload).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/admin/matches/{id}/result",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the fixture")),
    request_body = RecordResultRequest,
    responses(
        (status = 200, description = "Result recorded", body = ResultSummary),
        (status = 404, description = "Unknown fixture")
    )
)]
/// Record or overwrite the result of a fixture; validated results rebuild the
/// standings before the response is returned.
pub async fn record_result(
    State(state): State<SharedState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<RecordResultRequest>>,
) -> Result<Json<ResultSummary>, AppError> {
    Ok(Json(
        result_service::record_result(&state, id, payload, &identity).await?,
    ))
}

#[utoipa::path(
    post,
    path = "/admin/results/{id}/validate",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the pending result")),
    responses(
        (status = 200, description = "Result validated", body = ResultSummary),
        (status = 404, description = "Unknown result")
    )
)]
/// Validate a pending result and rebuild the standings.
pub async fn validate_result(
    State(state): State<SharedState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultSummary>, AppError> {
    Ok(Json(
        result_service::validate_result(&state, id, &identity).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/admin/results/{id}",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the result to delete")),
    responses((status = 204, description = "Result deleted and standings rebuilt"))
)]
/// Delete a result; the fixture returns to the unplayed pool and the
/// standings are rebuilt.
pub async fn delete_result(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    result_service::delete_result(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/standings/recompute",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account")),
    responses((status = 200, description = "Standings rebuilt", body = RecomputeStandingsResponse))
)]
/// Force a full standings rebuild; idempotent.
pub async fn recompute_standings(
    State(state): State<SharedState>,
) -> Result<Json<RecomputeStandingsResponse>, AppError> {
    Ok(Json(standings_service::recompute_standings(&state).await?))
}

#[utoipa::path(
    post,
    path = "/admin/playoffs/generate",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account")),
    responses(
        (status = 200, description = "Bracket seeded", body = GeneratePlayoffsResponse),
        (status = 409, description = "Fewer than four ranked teams")
    )
)]
/// Seed the four-team knockout bracket from the current table, wiping any
/// previous bracket.
pub async fn generate_playoffs(
    State(state): State<SharedState>,
) -> Result<Json<GeneratePlayoffsResponse>, AppError> {
    Ok(Json(playoff_service::generate_playoffs(&state).await?))
}

#[utoipa::path(
    post,
    path = "/admin/playoffs/{id}/result",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Token of a configured admin account"),
    ("id" = Uuid, Path, description = "Identifier of the playoff match")),
    request_body = PlayoffResultRequest,
    responses(
        (status = 200, description = "Playoff result recorded", body = PlayoffMatchSummary),
        (status = 404, description = "Unknown playoff match")
    )
)]
/// Record the score of one playoff match and re-run bracket advancement.
pub async fn record_playoff_result(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Valid(Json(payload)): Valid<Json<PlayoffResultRequest>>,
) -> Result<Json<PlayoffMatchSummary>, AppError> {
    Ok(Json(
        playoff_service::record_playoff_leg(&state, id, payload).await?,
    ))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    let identity = state
        .config()
        .admin_for_token(&provided)
        .ok_or_else(|| AppError::Unauthorized("invalid admin token".into()))?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
