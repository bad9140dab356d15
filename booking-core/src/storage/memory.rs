use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::factory::{StorageConfig, StorageFactory};
use super::repository::{DraftStorage, StorageError};

/// Process-local storage. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a single slot.
    pub fn with_value(
        key: &str,
        value: &str,
    ) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|e| StorageError::Database(format!("storage lock poisoned: {e}")))
    }
}

#[async_trait]
impl DraftStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots()?.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots()?.remove(key);
        Ok(())
    }
}

/// [`StorageFactory`] for the `"memory"` backend. The connection string is
/// ignored.
pub struct MemoryStorageFactory;

#[async_trait]
impl StorageFactory for MemoryStorageFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &StorageConfig,
    ) -> Result<Box<dyn DraftStorage>, StorageError> {
        Ok(Box::new(MemoryStorage::new()))
    }
}
