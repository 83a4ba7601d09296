//! In-memory storage, for tests and throwaway sessions

use super::StorageProvider;
use rustc_hash::FxHashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().map_or(0, |guard| guard.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageProvider for MemoryStorage {
    fn save(&self, key: &str, value: &str) {
        match self.values.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
            }
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.values.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        match self.values.write() {
            Ok(mut guard) => {
                guard.remove(key);
            }
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }
}
