use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{DraftStorage, StorageError};

/// Where the draft slot lives.
///
/// Either field may be left out of a config file; the missing one takes
/// its value from [`StorageConfig::default`].
///
/// | backend  | connection_string |
/// |----------|-------------------|
/// | `memory` | unused; the draft lasts as long as the process |
/// | `sqlite` | sqlx URL such as `sqlite:booking.db?mode=rwc` or `sqlite::memory:` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Name a factory was registered under.
    pub backend: String,
    pub connection_string: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        }
    }
}

/// Opens draft slot storage for one backend.
#[async_trait]
pub trait StorageFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Open the store named by `config`, creating its schema if needed.
    async fn create(&self, config: &StorageConfig)
    -> Result<Box<dyn DraftStorage>, StorageError>;
}

/// Looks up the factory for [`StorageConfig::backend`].
pub struct StorageRegistry {
    factories: HashMap<&'static str, Box<dyn StorageFactory>>,
}

impl StorageRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Later registrations under the same name win.
    pub fn register(
        &mut self,
        factory: Box<dyn StorageFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Sorted backend names, for error messages and `--help`.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Open the draft store `config` describes. An unregistered backend is a
    /// [`StorageError::Configuration`] listing the ones that exist.
    pub async fn create(
        &self,
        config: &StorageConfig,
    ) -> Result<Box<dyn DraftStorage>, StorageError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StorageError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for StorageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
