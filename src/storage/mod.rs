//! Key-value persistence for puzzle progress
//!
//! Mirrors browser local storage: string values under string keys, with
//! failures logged rather than surfaced. Losing a save never ends a game.

mod file;
mod memory;
pub mod records;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A string key-value store
pub trait StorageProvider {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str);
}

impl<T: StorageProvider + ?Sized> StorageProvider for &T {
    fn save(&self, key: &str, value: &str) {
        (**self).save(key, value);
    }

    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}
