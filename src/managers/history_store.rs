//! History store for modelstudio.
//!
//! Implements `HistoryStoreTrait` — listing, creating, updating, and
//! deleting search-history entries, backed by a single serialized blob
//! behind the [`BlobStore`] interface.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::storage::BlobStore;
use crate::types::errors::HistoryError;
use crate::types::history::{DeleteAck, HistoryEntry, HistoryPatch, NewHistoryEntry};

/// Maximum number of entries kept; oldest beyond the cap are dropped.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Trait defining history store operations.
pub trait HistoryStoreTrait {
    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn create(&mut self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError>;
    fn update(&mut self, patch: HistoryPatch) -> Result<HistoryEntry, HistoryError>;
    fn delete(&mut self, id: &str) -> Result<DeleteAck, HistoryError>;
}

/// History store over a pluggable blob backend.
///
/// Every operation is a full read-modify-write of the blob. State lives
/// entirely in the backend, so two overlapping requests from the same
/// client can lose a write; acceptable for a single-user history panel.
pub struct HistoryStore<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> HistoryStore<S> {
    /// Creates a new `HistoryStore` over the provided backend.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the store, returning the backend (handlers use this to
    /// recover the cookie jar for the response).
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Returns the current time as an RFC 3339 string.
    fn now_timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }

    /// Deserializes the stored blob, most-recent-first.
    ///
    /// A present-but-unparseable blob is treated as empty history rather
    /// than failing the request. Recoverable corruption only: storage and
    /// serialization failures on the write path still surface as errors.
    fn load(&self) -> Vec<HistoryEntry> {
        match self.store.read() {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("corrupt history blob, starting over empty: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;
        self.store
            .write(&raw)
            .map_err(|e| HistoryError::Storage(e.to_string()))
    }
}

impl<S: BlobStore> HistoryStoreTrait for HistoryStore<S> {
    /// Returns the full list, most-recent-first. Absent state is an
    /// empty list, never an error.
    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.load())
    }

    /// Assigns a fresh id, stamps the entry, prepends it, and truncates
    /// the list to [`MAX_HISTORY_ENTRIES`]. Returns the entry as stored.
    fn create(&mut self, entry: NewHistoryEntry) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.load();

        let stored = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            model_type: entry.model_type,
            keywords: entry.keywords,
            prompt: entry.prompt,
            model_url: entry.model_url,
            download_url: entry.download_url,
            timestamp: entry.timestamp.unwrap_or_else(Self::now_timestamp),
        };

        entries.insert(0, stored.clone());
        entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist(&entries)?;
        Ok(stored)
    }

    /// Shallow-merges the patch onto the entry with the matching id.
    /// Fields not present in the patch are preserved; the creation
    /// timestamp is never replaced. Unknown id fails with `NotFound`.
    fn update(&mut self, patch: HistoryPatch) -> Result<HistoryEntry, HistoryError> {
        let mut entries = self.load();

        let slot = entries
            .iter_mut()
            .find(|e| e.id == patch.id)
            .ok_or_else(|| HistoryError::NotFound(patch.id.clone()))?;

        if let Some(model_type) = patch.model_type {
            slot.model_type = model_type;
        }
        if let Some(keywords) = patch.keywords {
            slot.keywords = keywords;
        }
        if let Some(prompt) = patch.prompt {
            slot.prompt = prompt;
        }
        if let Some(model_url) = patch.model_url {
            slot.model_url = Some(model_url);
        }
        if let Some(download_url) = patch.download_url {
            slot.download_url = Some(download_url);
        }
        let merged = slot.clone();

        self.persist(&entries)?;
        Ok(merged)
    }

    /// Removes the entry with the matching id. Deleting an absent id —
    /// or deleting from an absent list — is a successful no-op. The
    /// resulting list is persisted even when unchanged, refreshing the
    /// blob's expiry.
    fn delete(&mut self, id: &str) -> Result<DeleteAck, HistoryError> {
        let mut entries = self.load();
        entries.retain(|e| e.id != id);
        self.persist(&entries)?;
        Ok(DeleteAck { success: true })
    }
}
