use anyhow::{Context, Result};
use async_trait::async_trait;
use booking_core::storage::{DraftStorage, StorageError};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

/// Draft slots kept in a single SQLite table.
pub struct SqliteDraftStorage {
    pool: SqlitePool,
}

impl SqliteDraftStorage {
    /// Connect to `database_url`, e.g. `sqlite:booking.db?mode=rwc`.
    ///
    /// In-memory databases are pinned to one connection so every query sees
    /// the same data.
    pub async fn new(database_url: &str) -> Result<Self> {
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// When the slot under `key` was last written.
    pub async fn last_saved(
        &self,
        key: &str,
    ) -> Result<Option<DateTime<Utc>>, StorageError> {
        let row = sqlx::query("SELECT updated_at FROM draft_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| StorageError::Database(format!("Failed to get updated_at: {}", e)))
        })
        .transpose()
    }
}

#[async_trait]
impl DraftStorage for SqliteDraftStorage {
    async fn load(
        &self,
        key: &str,
    ) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM draft_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Database(e.to_string()))
        })
        .transpose()
    }

    async fn save(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO draft_storage (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!(key, "wrote draft slot");
        Ok(())
    }

    async fn remove(
        &self,
        key: &str,
    ) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM draft_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        debug!(key, removed = result.rows_affected(), "removed draft slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use booking_core::models::{BudgetRange, DraftPatch, EventType};
    use booking_core::store::DraftStore;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn setup_test_db() -> SqliteDraftStorage {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let storage = SqliteDraftStorage::new_with_pool(pool).await;
        storage
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        storage
    }

    #[tokio::test]
    async fn test_load_missing_key() {
        let storage = setup_test_db().await;

        assert_eq!(storage.load("eventBookingFormData").await, Ok(None));
        assert_eq!(storage.last_saved("eventBookingFormData").await, Ok(None));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = setup_test_db().await;

        storage.save("k", r#"{"guestCount":10}"#).await.unwrap();

        assert_eq!(
            storage.load("k").await,
            Ok(Some(r#"{"guestCount":10}"#.to_string()))
        );
        assert!(storage.last_saved("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_value() {
        let storage = setup_test_db().await;

        storage.save("k", "first").await.unwrap();
        storage.save("k", "second").await.unwrap();

        assert_eq!(storage.load("k").await, Ok(Some("second".to_string())));
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM draft_storage")
            .fetch_one(storage.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let storage = setup_test_db().await;
        storage.save("k", "value").await.unwrap();

        storage.remove("k").await.unwrap();

        assert_eq!(storage.load("k").await, Ok(None));
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let storage = setup_test_db().await;

        assert_eq!(storage.remove("nothing-here").await, Ok(()));
    }

    #[tokio::test]
    async fn test_draft_store_round_trip() {
        let storage = setup_test_db().await;
        let mut store = DraftStore::load(Box::new(storage)).await;
        store
            .update(DraftPatch {
                event_type: Some(EventType::Engagement),
                budget_range: Some(BudgetRange::new(25000, 75000)),
                ..Default::default()
            })
            .await
            .unwrap();

        let reopened = DraftStore::load(store.into_storage()).await;

        assert_eq!(reopened.draft().event_type, Some(EventType::Engagement));
        assert_eq!(reopened.draft().budget_range, Some(BudgetRange::new(25000, 75000)));
    }
}
