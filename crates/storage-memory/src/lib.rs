//! In-memory log store implementation

use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Arc};
use tessera_storage::{LogEntry, LogStore, StoreError, StoreResult};
use tokio::sync::RwLock;

/// In-memory log store backed by a `BTreeMap` for index ordering.
///
/// Used by unit tests and embedded deployments. All operations go through a
/// single lock, so `bounds` is trivially consistent with concurrent deletes.
#[derive(Clone, Default)]
pub struct MemoryLogStore {
    entries: Arc<RwLock<BTreeMap<u64, LogEntry>>>,
}

impl MemoryLogStore {
    /// Create an empty in-memory log store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn store_log(&self, entry: &LogEntry) -> StoreResult<()> {
        if entry.index == 0 {
            return Err(StoreError::Write(
                "index 0 is reserved for the empty log".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        entries.insert(entry.index, entry.clone());
        Ok(())
    }

    async fn get_log(&self, index: u64) -> StoreResult<LogEntry> {
        let entries = self.entries.read().await;
        entries
            .get(&index)
            .cloned()
            .ok_or(StoreError::NotFound(index))
    }

    async fn delete_range(&self, min: u64, max: u64) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        let to_remove: Vec<u64> = entries.range(min..=max).map(|(&idx, _)| idx).collect();
        for idx in to_remove {
            entries.remove(&idx);
        }
        Ok(())
    }

    async fn bounds(&self) -> StoreResult<Option<(u64, u64)>> {
        let entries = self.entries.read().await;
        let first = entries.keys().next().copied();
        let last = entries.keys().next_back().copied();
        match (first, last) {
            (Some(f), Some(l)) => Ok(Some((f, l))),
            _ => Ok(None),
        }
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for MemoryLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLogStore")
            .field("entries", &"<locked>")
            .finish()
    }
}
