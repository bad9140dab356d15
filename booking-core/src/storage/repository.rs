use async_trait::async_trait;
use thiserror::Error;

/// Fixed key of the durable slot that holds the serialized draft.
pub const DRAFT_STORAGE_KEY: &str = "eventBookingFormData";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A durable string key-value store.
///
/// Each call completes its write before returning, so a value saved by one
/// call is visible to the next `load`.
#[async_trait]
pub trait DraftStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if the slot is empty.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Empty the slot. Removing an empty slot is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
