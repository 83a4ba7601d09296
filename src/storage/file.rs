//! File-backed storage
//!
//! Keeps every key in one JSON object on disk, loaded once at startup and
//! rewritten after each change.

use super::StorageProvider;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage persisted as a JSON map file
#[derive(Debug)]
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`, loading any existing data
    ///
    /// An unreadable or malformed file is logged and treated as empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<BTreeMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse storage file: {}", e);
                        BTreeMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read storage file: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: RwLock::new(cache),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::error!("Failed to create storage directory: {}", e);
            return;
        }

        let data = match self.cache.read() {
            Ok(guard) => serde_json::to_string_pretty(&*guard),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                return;
            }
        };

        match data {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize storage data: {}", e),
        }
    }
}

impl StorageProvider for FileStorage {
    fn save(&self, key: &str, value: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                let existed = guard.remove(key).is_some();
                drop(guard);
                if existed {
                    self.persist();
                }
            }
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }
}
