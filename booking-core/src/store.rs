//! The live booking draft and its durable copy.
//!
//! [`DraftStore`] keeps the in-memory draft and the durable snapshot in step:
//! an update is committed in memory only after the snapshot write succeeds.

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{BookingDraft, DraftPatch};
use crate::storage::{DRAFT_STORAGE_KEY, DraftStorage, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Holds the in-progress draft for the lifetime of a booking flow.
pub struct DraftStore {
    storage: Box<dyn DraftStorage>,
    key: String,
    draft: BookingDraft,
}

impl DraftStore {
    /// Open the store under the standard draft key.
    pub async fn load(storage: Box<dyn DraftStorage>) -> Self {
        Self::load_with_key(storage, DRAFT_STORAGE_KEY).await
    }

    /// Open the store, rehydrating any snapshot saved under `key`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty draft.
    pub async fn load_with_key(
        storage: Box<dyn DraftStorage>,
        key: &str,
    ) -> Self {
        let draft = match storage.load(key).await {
            Ok(Some(json)) => match serde_json::from_str::<BookingDraft>(&json) {
                Ok(draft) => {
                    debug!(key, "restored saved booking draft");
                    draft
                }
                Err(error) => {
                    warn!(key, %error, "discarding malformed saved draft");
                    BookingDraft::default()
                }
            },
            Ok(None) => BookingDraft::default(),
            Err(error) => {
                warn!(key, %error, "could not read saved draft; starting empty");
                BookingDraft::default()
            }
        };

        Self {
            storage,
            key: key.to_string(),
            draft,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Merge `patch` into the draft and persist the whole result.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be written; the
    /// in-memory draft is then left as it was.
    pub async fn update(
        &mut self,
        patch: DraftPatch,
    ) -> Result<&BookingDraft, StoreError> {
        let next = self.draft.merged(patch);
        let json = serde_json::to_string(&next)?;

        self.storage.save(&self.key, &json).await?;
        debug!(key = %self.key, bytes = json.len(), "persisted booking draft");

        self.draft = next;
        Ok(&self.draft)
    }

    /// Reset the in-memory draft and remove the durable snapshot.
    ///
    /// The in-memory draft is reset even when the removal fails.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.draft = BookingDraft::default();
        self.storage.remove(&self.key).await?;
        debug!(key = %self.key, "cleared saved booking draft");
        Ok(())
    }

    /// Hand the storage back, e.g. to reopen it as a fresh session.
    pub fn into_storage(self) -> Box<dyn DraftStorage> {
        self.storage
    }
}
