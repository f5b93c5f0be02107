/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Playoff seeding and bracket advancement.
pub mod playoff_service;
/// Result entry, validation and deletion.
pub mod result_service;
/// Schedule generation.
pub mod schedule_service;
/// Standings recomputation entry points.
pub mod standings_service;
/// Read-only projections for the public and admin dashboards.
pub mod stats_service;
/// Storage persistence supervisor.
pub mod storage_supervisor;
/// Team registration and roster management.
pub mod team_service;
