use std::sync::Arc;

use futures::future::BoxFuture;
use mongodb::{Client, Collection, Database, bson::doc};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{LEAGUE_DOC_ID, MongoLeagueDocument},
};
use crate::dao::{league_store::LeagueStore, models::LeagueEntity, storage::StorageResult};

const LEAGUE_COLLECTION_NAME: &str = "league";

/// MongoDB-backed league store holding the snapshot in a single document.
#[derive(Clone)]
pub struct MongoLeagueStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoLeagueStore {
    /// Establish a connection to MongoDB.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        Ok(Self { inner })
    }

    async fn collection(&self) -> Collection<MongoLeagueDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoLeagueDocument>(LEAGUE_COLLECTION_NAME)
    }

    async fn save_league(&self, league: LeagueEntity) -> MongoResult<()> {
        let document: MongoLeagueDocument = league.into();
        let collection = self.collection().await;
        collection
            .replace_one(doc! { "_id": LEAGUE_DOC_ID }, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveLeague { source })?;

        Ok(())
    }

    async fn load_league(&self) -> MongoResult<Option<LeagueEntity>> {
        let collection = self.collection().await;

        let document = collection
            .find_one(doc! { "_id": LEAGUE_DOC_ID })
            .await
            .map_err(|source| MongoDaoError::LoadLeague { source })?;

        Ok(document.map(Into::into))
    }
}

impl LeagueStore for MongoLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_league(league).await.map_err(Into::into) })
    }

    fn load_league(&self) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_league().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
