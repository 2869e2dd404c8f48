//! The log store capability trait

use async_trait::async_trait;

use crate::entry::LogEntry;
use crate::error::StoreResult;

/// Durable, index-keyed log storage.
///
/// Implementations must provide read-after-write visibility: a `store_log`
/// or `delete_range` completed on one task is visible to subsequent
/// `get_log` / `bounds` calls from any task. `bounds` must return a
/// consistent pair even while a `delete_range` is in flight — the caller
/// must never observe `first > last`.
#[async_trait]
pub trait LogStore: Send + Sync + 'static {
    /// Store `entry` at `entry.index`, overwriting any existing entry there.
    ///
    /// Index `0` is reserved as the empty-log sentinel; storing it fails
    /// with `StoreError::Write`.
    async fn store_log(&self, entry: &LogEntry) -> StoreResult<()>;

    /// Fetch the entry at `index`, or `StoreError::NotFound` if absent.
    async fn get_log(&self, index: u64) -> StoreResult<LogEntry>;

    /// Remove all entries in the inclusive range `[min, max]`.
    ///
    /// Driven by the compaction actor once a snapshot has superseded the
    /// range; the index-tracking layer itself never calls this.
    async fn delete_range(&self, min: u64, max: u64) -> StoreResult<()>;

    /// The minimum and maximum indices currently present, or `None` when
    /// the store holds no entries.
    async fn bounds(&self) -> StoreResult<Option<(u64, u64)>>;

    /// Flush and release the store's resources.
    async fn close(&self) -> StoreResult<()>;
}

#[async_trait]
impl<T: LogStore> LogStore for std::sync::Arc<T> {
    async fn store_log(&self, entry: &LogEntry) -> StoreResult<()> {
        (**self).store_log(entry).await
    }

    async fn get_log(&self, index: u64) -> StoreResult<LogEntry> {
        (**self).get_log(index).await
    }

    async fn delete_range(&self, min: u64, max: u64) -> StoreResult<()> {
        (**self).delete_range(min, max).await
    }

    async fn bounds(&self) -> StoreResult<Option<(u64, u64)>> {
        (**self).bounds().await
    }

    async fn close(&self) -> StoreResult<()> {
        (**self).close().await
    }
}
