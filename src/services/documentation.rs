use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Matchday Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::public::list_teams,
        crate::routes::public::team_detail,
        crate::routes::public::list_matches,
        crate::routes::public::list_results,
        crate::routes::public::standings,
        crate::routes::public::goals_chart,
        crate::routes::public::stats_overview,
        crate::routes::public::playoff_bracket,
        crate::routes::admin::dashboard,
        crate::routes::admin::create_team,
        crate::routes::admin::update_team,
        crate::routes::admin::delete_team,
        crate::routes::admin::generate_schedule,
        crate::routes::admin::record_result,
        crate::routes::admin::validate_result,
        crate::routes::admin::delete_result,
        crate::routes::admin::recompute_standings,
        crate::routes::admin::generate_playoffs,
        crate::routes::admin::record_playoff_result,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::TeamSummary,
            crate::dto::common::MatchSummary,
            crate::dto::common::ScoreSummary,
            crate::dto::common::ResultSummary,
            crate::dto::common::StandingRow,
            crate::dto::common::PlayoffMatchSummary,
            crate::dao::models::Phase,
            crate::dao::models::PlayoffRound,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "public", description = "Read-only competition views"),
        (name = "admin", description = "Token-guarded competition management"),
    )
)]
pub struct ApiDoc;
