use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use shared_config::AppConfig;

use crate::{FileStore, MemoryStore};

/// A stored value together with the version it was written at.
///
/// Versions start at 1 for the first write of a key. A key that was never
/// written is reported as absent, and writers that expect it to be absent
/// pass version 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned {
    pub version: u64,
    pub value: String,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Version conflict on '{key}': expected {expected}, found {actual}")]
    VersionConflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String-keyed record store with compare-and-replace writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Versioned>, StoreError>;

    /// Replace the value under `key` if its current version equals
    /// `expected_version`, returning the new version.
    async fn put(&self, key: &str, value: String, expected_version: u64) -> Result<u64, StoreError>;
}

/// Build the store backend selected by configuration.
pub fn open_store(config: &AppConfig) -> Arc<dyn KeyValueStore> {
    match &config.store_path {
        Some(path) => {
            info!("Using file-backed record store at {}", path);
            Arc::new(FileStore::new(path))
        }
        None => {
            info!("Using in-memory record store");
            Arc::new(MemoryStore::new())
        }
    }
}

pub(crate) fn check_version(key: &str, current: u64, expected: u64) -> Result<(), StoreError> {
    if current != expected {
        return Err(StoreError::VersionConflict {
            key: key.to_string(),
            expected,
            actual: current,
        });
    }
    Ok(())
}
