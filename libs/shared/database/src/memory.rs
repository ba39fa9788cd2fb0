use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{check_version, KeyValueStore, StoreError, Versioned};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Versioned>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Versioned>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String, expected_version: u64) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let current = entries.get(key).map(|entry| entry.version).unwrap_or(0);
        check_version(key, current, expected_version)?;

        let version = current + 1;
        entries.insert(key.to_string(), Versioned { version, value });
        debug!("Stored '{}' at version {}", key, version);

        Ok(version)
    }
}
