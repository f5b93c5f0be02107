//! Matchday Back binary entrypoint wiring the REST API, the competition
//! engine and the storage supervisor.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod league;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::{league_store::LeagueStore, storage::StorageError};
use services::storage_supervisor;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let app_config = AppConfig::load();
    let app_state = AppState::new(app_config);

    tokio::spawn(storage_supervisor::run(app_state.clone(), connect_store));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Connect the configured storage backend: MongoDB when the `mongo-store`
/// feature is enabled, the in-process store otherwise.
#[cfg(feature = "mongo-store")]
async fn connect_store() -> Result<Arc<dyn LeagueStore>, StorageError> {
    use dao::league_store::mongodb::{MongoLeagueStore, config::MongoConfig};

    let mongo_config = MongoConfig::from_env().await?;
    let store = MongoLeagueStore::connect(mongo_config).await?;
    Ok(Arc::new(store))
}

/// Connect the configured storage backend: MongoDB when the `mongo-store`
/// feature is enabled, the in-process store otherwise.
#[cfg(not(feature = "mongo-store"))]
async fn connect_store() -> Result<Arc<dyn LeagueStore>, StorageError> {
    use dao::league_store::memory::MemoryLeagueStore;

    Ok(Arc::new(MemoryLeagueStore::new()))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
