//! Replicated log entry model

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// What a log entry carries.
///
/// Only `Command` entries reach the replicated state machine; the other
/// kinds are protocol bookkeeping written by the consensus module itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A state-machine operation
    Command,
    /// Heartbeat / leadership assertion, carries no payload of interest
    Noop,
    /// Cluster membership change
    Configuration,
    /// Read-barrier marker
    Barrier,
}

/// A single record in the replicated log.
///
/// Indices are assigned by the consensus module: positive, unique while
/// present, and gapless except for a prefix removed by compaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the replicated log
    pub index: u64,
    /// Entry classification
    pub kind: EntryKind,
    /// Opaque command bytes, interpreted only by the state machine
    pub payload: Bytes,
}

impl LogEntry {
    /// Create an entry at the given index.
    pub fn new(index: u64, kind: EntryKind, payload: impl Into<Bytes>) -> Self {
        Self {
            index,
            kind,
            payload: payload.into(),
        }
    }

    /// Whether this entry carries a state-machine command.
    pub fn is_command(&self) -> bool {
        self.kind == EntryKind::Command
    }

    /// Serialize to the CBOR wire form stored by byte-valued backends.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| StoreError::Write(format!("failed to encode entry: {e}")))?;
        Ok(buf)
    }

    /// Deserialize from the CBOR wire form.
    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        ciborium::from_reader(bytes)
            .map_err(|e| StoreError::Read(format!("failed to decode entry: {e}")))
    }
}
