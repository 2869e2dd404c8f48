//! RocksDB store configuration

use std::path::PathBuf;

/// Configuration for the RocksDB log store
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the RocksDB database directory
    pub path: PathBuf,
    /// Create the database if it does not exist yet
    pub create_if_missing: bool,
}

impl RocksDbConfig {
    /// Create a configuration with the given path and default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
        }
    }
}
