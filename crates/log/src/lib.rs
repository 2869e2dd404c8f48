//! Index bookkeeping over the replicated log store
//!
//! The consensus module appends entries to the store directly and a
//! compaction actor deletes leading ranges once snapshots supersede them;
//! neither path goes through this crate. [`Log`] observes those mutations
//! lazily, re-deriving the current bounds from the store on every query and
//! reconciling its command-index cache against them. Compaction and snapshot
//! scheduling hang off three questions answered here: the first index
//! present, the last index present, and the last index whose entry carries a
//! state-machine command.

use tessera_storage::{EntryKind, LogStore, StoreError, StoreResult};
use tessera_storage_rocksdb::RocksDbLogStore;
use tokio::sync::Mutex;

/// The most recently computed last-command-index and the log state it was
/// valid for. Process-local, never persisted.
#[derive(Debug, Clone, Copy, Default)]
struct CommandIndexCache {
    /// Index of the most recently found command entry, or 0
    value: u64,
    /// The last index in effect when `value` was computed
    valid_through: u64,
}

/// Index-tracking view over a [`LogStore`].
///
/// All queries report `0` for an empty log rather than erroring, and all
/// backend I/O failures propagate to the caller unmodified — retry policy
/// belongs to the consensus module.
pub struct Log<S = RocksDbLogStore> {
    store: S,
    last_command: Mutex<CommandIndexCache>,
}

impl Log<RocksDbLogStore> {
    /// Open or create the durable log store at `path` and wrap it.
    pub fn open(path: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        let store = RocksDbLogStore::open(path)?;
        Ok(Self::new(store))
    }
}

impl<S: LogStore> Log<S> {
    /// Wrap an already-open log store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_command: Mutex::new(CommandIndexCache::default()),
        }
    }

    /// The minimum index currently present, or `0` if the log is empty.
    pub async fn first_index(&self) -> StoreResult<u64> {
        Ok(self.indexes().await?.0)
    }

    /// The maximum index currently present, or `0` if the log is empty.
    pub async fn last_index(&self) -> StoreResult<u64> {
        Ok(self.indexes().await?.1)
    }

    /// Both index bounds as one consistent pair, `(0, 0)` when empty.
    ///
    /// A single `bounds` read backs both values, so a concurrent
    /// `delete_range` can never be observed as `first > last`.
    pub async fn indexes(&self) -> StoreResult<(u64, u64)> {
        Ok(self.store.bounds().await?.unwrap_or((0, 0)))
    }

    /// The index of the most recent command entry, or `0` if no command
    /// exists in the current range.
    ///
    /// The result is cached against the last index it was computed at. A
    /// hit answers without touching entries; a miss scans backward over at
    /// most the indices that appended since the previous scan, falling back
    /// to a full scan of `[first, last]` when compaction has invalidated
    /// the cached value.
    pub async fn last_command_index(&self) -> StoreResult<u64> {
        let Some((first, last)) = self.store.bounds().await? else {
            let mut cache = self.last_command.lock().await;
            *cache = CommandIndexCache::default();
            return Ok(0);
        };

        let cached = *self.last_command.lock().await;

        // A cached 0 survives prefix deletion: compaction cannot introduce
        // a command entry. A nonzero value survives only while its entry is
        // still inside the range.
        if cached.valid_through == last && (cached.value == 0 || cached.value >= first) {
            tracing::trace!(value = cached.value, last, "command index cache hit");
            return Ok(cached.value);
        }

        // The log grew and the previous answer still holds for the old
        // range: only the unscanned suffix needs reading.
        let (floor, fallback) = if cached.valid_through >= first
            && cached.valid_through < last
            && (cached.value == 0 || cached.value >= first)
        {
            (cached.valid_through + 1, cached.value)
        } else {
            (first, 0)
        };

        let mut found = fallback;
        for index in (floor..=last).rev() {
            match self.store.get_log(index).await {
                Ok(entry) => {
                    if entry.kind == EntryKind::Command {
                        found = entry.index;
                        break;
                    }
                }
                // Running past the populated range ends the scan; it is not
                // a read fault.
                Err(StoreError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(value = found, floor, last, "recomputed last command index");

        let mut cache = self.last_command.lock().await;
        *cache = CommandIndexCache {
            value: found,
            valid_through: last,
        };
        Ok(found)
    }

    /// Close the underlying store. One call per `Log` lifetime; no further
    /// operations are valid afterwards.
    pub async fn close(&self) -> StoreResult<()> {
        self.store.close().await
    }
}

impl<S: LogStore> std::fmt::Debug for Log<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Log")
    }
}
