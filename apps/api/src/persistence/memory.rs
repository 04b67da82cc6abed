//! In-process storage, used by tests and the `memory` backend.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{StateStorage, StorageError};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the storage with an existing record.
    #[cfg(test)]
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.lock().insert(key.to_string(), value.to_string());
        storage
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
