//! File-backed blob store.
//!
//! Stores the blob in a single JSON file alongside its expiry time,
//! mirroring the cookie backend's TTL-from-last-write semantics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::errors::StorageError;

use super::blob::BlobStore;

#[derive(Serialize, Deserialize)]
struct StoredBlob {
    expires_at: u64,
    payload: String,
}

/// Blob store over a single file with TTL enforcement.
pub struct FileBlobStore {
    path: PathBuf,
    ttl: Duration,
}

impl FileBlobStore {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredBlob = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("blob file {} is unreadable: {}", self.path.display(), e);
                return None;
            }
        };
        if Self::now() >= stored.expires_at {
            return None;
        }
        Some(stored.payload)
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        let stored = StoredBlob {
            expires_at: Self::now() + self.ttl.as_secs(),
            payload: value.to_string(),
        };
        let raw = serde_json::to_string(&stored)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}
