use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::store::{check_version, KeyValueStore, StoreError, Versioned};

/// Record store persisted as a single JSON document mapping each key to its
/// versioned value.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, Versioned>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Store file {} does not exist yet", self.path.display());
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, Versioned>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp_path = PathBuf::from(format!("{}.tmp", self.path.display()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&tmp_path, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            warn!("Failed to move {} into place: {}", tmp_path.display(), e);
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Versioned>, StoreError> {
        let mut entries = self.read_all().await?;
        Ok(entries.remove(key))
    }

    async fn put(&self, key: &str, value: String, expected_version: u64) -> Result<u64, StoreError> {
        // Writers in this process are serialised so the read-check-write below
        // cannot interleave.
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_all().await?;
        let current = entries.get(key).map(|entry| entry.version).unwrap_or(0);
        check_version(key, current, expected_version)?;

        let version = current + 1;
        entries.insert(key.to_string(), Versioned { version, value });
        self.write_all(&entries).await?;
        debug!("Stored '{}' at version {} in {}", key, version, self.path.display());

        Ok(version)
    }
}
