//! Log storage capability surface for the Tessera consensus layer
//!
//! This crate defines the contract the index-tracking layer requires from a
//! persistent log store: store an entry at its index, fetch by index, delete
//! an inclusive range, and report the current index bounds. Backends live in
//! their own crates (`tessera-storage-memory`, `tessera-storage-rocksdb`) so
//! the engine can be swapped without touching consumers.

pub mod entry;
pub mod error;
pub mod store;

pub use entry::{EntryKind, LogEntry};
pub use error::{StoreError, StoreResult};
pub use store::LogStore;
