//! Shared application state: the in-memory league aggregate, the installed
//! storage backend and the degraded-mode flag.

use std::{sync::Arc, time::SystemTime};

use tokio::sync::{Mutex, RwLock, watch};

use crate::{
    config::AppConfig,
    dao::league_store::LeagueStore,
    error::ServiceError,
    league::League,
};

/// Cheaply clonable handle to [`AppState`].
pub type SharedState = Arc<AppState>;

/// Central application state shared by every request handler.
pub struct AppState {
    store: RwLock<Option<Arc<dyn LeagueStore>>>,
    league: RwLock<League>,
    degraded: watch::Sender<bool>,
    config: Arc<AppConfig>,
    /// Serializes mutating operations so a reader never observes a
    /// half-updated table for longer than one snapshot write.
    write_gate: Mutex<()>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned
    /// cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is
    /// installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            store: RwLock::new(None),
            league: RwLock::new(League::default()),
            degraded: degraded_tx,
            config: Arc::new(config),
            write_gate: Mutex::new(()),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the store handle or fail with [`ServiceError::Degraded`].
    pub async fn require_store(&self) -> Result<Arc<dyn LeagueStore>, ServiceError> {
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a storage backend and leave degraded mode.
    ///
    /// A persisted snapshot replaces the in-memory aggregate only while the
    /// aggregate is still pristine; after that, memory is authoritative and
    /// the store trails it by exactly the mutations refused during outages
    /// (none, since mutations require the store).
    pub async fn install_store(&self, store: Arc<dyn LeagueStore>) -> Result<(), ServiceError> {
        let persisted = store.load_league().await?;

        {
            let mut guard = self.store.write().await;
            *guard = Some(store);
        }

        if let Some(entity) = persisted {
            let mut league = self.league.write().await;
            if league.is_pristine() {
                *league = entity.into();
            }
        }

        self.update_degraded(false).await;
        Ok(())
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        {
            let mut guard = self.store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag. Set while no store is installed, and also while
    /// the supervisor is fighting a failing backend.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        if self.is_degraded().await == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Run a read-only projection over the league aggregate.
    pub async fn with_league<T>(&self, read: impl FnOnce(&League) -> T) -> T {
        let guard = self.league.read().await;
        read(&guard)
    }

    /// Apply a mutation to the league aggregate and persist the new snapshot.
    ///
    /// The mutation runs on a draft copy: if the closure rejects the operation
    /// or the snapshot write fails, the in-memory aggregate is untouched, so
    /// every operation is all-or-nothing. The write gate keeps concurrent
    /// mutations strictly sequential.
    pub async fn mutate<T>(
        &self,
        work: impl FnOnce(&mut League) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let store = self.require_store().await?;

        let mut draft = {
            let guard = self.league.read().await;
            guard.clone()
        };

        let value = work(&mut draft)?;
        draft.updated_at = SystemTime::now();

        store.save_league(draft.clone().into()).await?;

        {
            let mut guard = self.league.write().await;
            *guard = draft;
        }

        Ok(value)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::dao::league_store::memory::MemoryLeagueStore;

    /// Shared state backed by the in-memory store, ready for service tests.
    pub(crate) async fn state_with_memory_store() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryLeagueStore::new()))
            .await
            .expect("memory store always installs");
        state
    }
}

#[cfg(test)]
mod tests {
    use super::testing::state_with_memory_store;
    use super::*;
    use crate::dao::league_store::memory::MemoryLeagueStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_degraded().await);

        let err = state.mutate(|_| Ok(())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Degraded));

        state
            .install_store(Arc::new(MemoryLeagueStore::new()))
            .await
            .unwrap();
        assert!(!state.is_degraded().await);
    }

    #[tokio::test]
    async fn rejected_mutations_leave_the_aggregate_untouched() {
        let state = state_with_memory_store().await;

        let result: Result<(), ServiceError> = state
            .mutate(|league| {
                league.standings.push(crate::dao::models::StandingEntity::zeroed(
                    uuid::Uuid::new_v4(),
                ));
                Err(ServiceError::InvalidInput("rejected".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(state.with_league(|league| league.standings.len()).await, 0);
    }
}
