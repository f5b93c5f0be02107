/// Volatile store used by tests and as a fallback without a database.
pub mod memory;
#[cfg(feature = "mongo-store")]
/// MongoDB-backed store.
pub mod mongodb;

use futures::future::BoxFuture;

use crate::dao::models::LeagueEntity;
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the competition snapshot.
///
/// The whole league is saved and loaded as one aggregate: the working set is
/// a handful of teams and a few hundred fixtures, and a single snapshot write
/// keeps every mutation all-or-nothing.
pub trait LeagueStore: Send + Sync {
    /// Replace the persisted snapshot with `league`.
    fn save_league(&self, league: LeagueEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch the persisted snapshot, if one exists.
    fn load_league(&self) -> BoxFuture<'static, StorageResult<Option<LeagueEntity>>>;
    /// Cheap reachability probe used by the supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a dropped backend connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
