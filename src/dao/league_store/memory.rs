use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::dao::{league_store::LeagueStore, models::LeagueEntity, storage::StorageResult};

/// In-process store keeping the snapshot in a mutex-guarded slot.
///
/// Used by the test suite and as the runtime backend when the crate is built
/// without a database feature. Contents do not survive a restart.
#[derive(Clone, Default)]
pub struct MemoryLeagueStore {
    slot: Arc<Mutex<Option<LeagueEntity>>>,
}

impl MemoryLeagueStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeagueStore for MemoryLeagueStore {
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>> {
        let slot = self.slot.clone();
        Box::pin(async move {
            *slot.lock().expect("memory store poisoned") = Some(league);
            Ok(())
        })
    }

    fn load_league(&self) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>> {
        let slot = self.slot.clone();
        Box::pin(async move { Ok(slot.lock().expect("memory store poisoned").clone()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}
