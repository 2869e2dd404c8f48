//! RocksDB log store implementation

pub mod config;

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options, WriteBatch};
use std::{path::Path, sync::Arc};
use tessera_storage::{LogEntry, LogStore, StoreError, StoreResult};

pub use config::RocksDbConfig;

type Db = DBWithThreadMode<MultiThreaded>;

/// Durable log store backed by RocksDB.
///
/// Indices are stored as big-endian `u64` keys so that RocksDB's byte order
/// matches index order, and entry values are the CBOR encoding produced by
/// [`LogEntry::encode`].
#[derive(Clone)]
pub struct RocksDbLogStore {
    db: Arc<Db>,
}

impl RocksDbLogStore {
    /// Open or create the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_config(&RocksDbConfig::new(path.as_ref()))
    }

    /// Open the store with explicit configuration.
    pub fn open_with_config(config: &RocksDbConfig) -> StoreResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(config.create_if_missing);

        let db = Db::open(&opts, &config.path)
            .map_err(|e| StoreError::Open(format!("failed to open RocksDB: {e}")))?;

        tracing::debug!(path = %config.path.display(), "opened rocksdb log store");

        Ok(Self { db: Arc::new(db) })
    }

    fn encode_key(index: u64) -> [u8; 8] {
        index.to_be_bytes()
    }

    fn decode_key(key: &[u8]) -> StoreResult<u64> {
        let bytes: [u8; 8] = key
            .try_into()
            .map_err(|_| StoreError::Read(format!("invalid key length {}", key.len())))?;
        Ok(u64::from_be_bytes(bytes))
    }
}

#[async_trait]
impl LogStore for RocksDbLogStore {
    async fn store_log(&self, entry: &LogEntry) -> StoreResult<()> {
        if entry.index == 0 {
            return Err(StoreError::Write(
                "index 0 is reserved for the empty log".to_string(),
            ));
        }

        let value = entry.encode()?;
        self.db
            .put(Self::encode_key(entry.index), value)
            .map_err(|e| StoreError::Write(format!("failed to store entry: {e}")))
    }

    async fn get_log(&self, index: u64) -> StoreResult<LogEntry> {
        match self.db.get_pinned(Self::encode_key(index)) {
            Ok(Some(value)) => LogEntry::decode(&value),
            Ok(None) => Err(StoreError::NotFound(index)),
            Err(e) => Err(StoreError::Read(format!("failed to read entry: {e}"))),
        }
    }

    async fn delete_range(&self, min: u64, max: u64) -> StoreResult<()> {
        let start_key = Self::encode_key(min);
        let end_key = Self::encode_key(max);
        let mut batch = WriteBatch::default();

        let iter = self
            .db
            .iterator(IteratorMode::From(&start_key, Direction::Forward));
        for result in iter {
            let (key, _) =
                result.map_err(|e| StoreError::Write(format!("iterator error: {e}")))?;
            if key.as_ref() > end_key.as_slice() {
                break;
            }
            batch.delete(key);
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Write(format!("failed to delete range: {e}")))
    }

    async fn bounds(&self) -> StoreResult<Option<(u64, u64)>> {
        // Both endpoints come from one snapshot so a concurrent delete_range
        // can never produce a pair with first > last.
        let snapshot = self.db.snapshot();

        let first = match snapshot.iterator(IteratorMode::Start).next() {
            Some(Ok((key, _))) => Some(Self::decode_key(&key)?),
            Some(Err(e)) => return Err(StoreError::Read(format!("iterator error: {e}"))),
            None => None,
        };

        let last = match snapshot.iterator(IteratorMode::End).next() {
            Some(Ok((key, _))) => Some(Self::decode_key(&key)?),
            Some(Err(e)) => return Err(StoreError::Read(format!("iterator error: {e}"))),
            None => None,
        };

        match (first, last) {
            (Some(f), Some(l)) => Ok(Some((f, l))),
            _ => Ok(None),
        }
    }

    async fn close(&self) -> StoreResult<()> {
        self.db
            .flush()
            .map_err(|e| StoreError::Close(format!("failed to flush database: {e}")))?;

        tracing::debug!("rocksdb log store flushed on close");
        Ok(())
    }
}

impl std::fmt::Debug for RocksDbLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RocksDbLogStore")
    }
}
