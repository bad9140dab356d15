use async_trait::async_trait;
use booking_core::storage::{DraftStorage, StorageConfig, StorageError, StorageFactory};

use crate::storage::SqliteDraftStorage;

/// [`StorageFactory`] for SQLite.
///
/// Register this with a [`booking_core::storage::StorageRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use booking_core::storage::StorageRegistry;
/// use booking_db_sqlite::SqliteStorageFactory;
///
/// let mut registry = StorageRegistry::new();
/// registry.register(Box::new(SqliteStorageFactory));
/// ```
pub struct SqliteStorageFactory;

#[async_trait]
impl StorageFactory for SqliteStorageFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database at `config.connection_string`, a sqlx-style URL such
    /// as `sqlite:booking.db?mode=rwc` or `sqlite::memory:`, and migrate it.
    async fn create(
        &self,
        config: &StorageConfig,
    ) -> Result<Box<dyn DraftStorage>, StorageError> {
        let storage = SqliteDraftStorage::new(&config.connection_string)
            .await
            .map_err(|e| StorageError::Connection(format!("{e:#}")))?;
        storage
            .run_migrations()
            .await
            .map_err(|e| StorageError::Database(format!("{e:#}")))?;
        Ok(Box::new(storage))
    }
}
