//! History client for modelstudio.
//!
//! Consumer-side orchestration of the history endpoints, mirroring what
//! the studio front-end does: fetch the list on open or explicit
//! refresh, register finished generations, commit edits, delete, and
//! hand out download targets. The underlying reqwest client keeps a
//! cookie store so the history cookie round-trips like a browser's.

use async_trait::async_trait;
use tracing::warn;

use crate::types::errors::ClientError;
use crate::types::history::{DeleteRequest, HistoryEntry, HistoryPatch, NewHistoryEntry};

/// Trait defining consumer-facing history operations.
#[async_trait]
pub trait HistoryClientTrait {
    /// Fetches the full list, most-recent-first.
    async fn fetch(&self) -> Result<Vec<HistoryEntry>, ClientError>;
    /// Registers a finished generation. Fire-and-forget: failures are
    /// logged and swallowed so they never block the generation flow.
    async fn record(&self, entry: NewHistoryEntry);
    /// Commits an edit, then re-fetches the list to refresh the view.
    async fn commit_edit(&self, patch: HistoryPatch) -> Result<Vec<HistoryEntry>, ClientError>;
    /// Deletes an entry, then re-fetches the list.
    async fn remove(&self, id: &str) -> Result<Vec<HistoryEntry>, ClientError>;
    /// Returns the entry's download URL, if it has one. Opening it in a
    /// new browsing context is the UI's job; no store state changes.
    fn download_target<'a>(&self, entry: &'a HistoryEntry) -> Option<&'a str>;
}

/// History client backed by reqwest with an in-memory cookie store.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    /// Creates a client for the history service at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn history_url(&self) -> String {
        format!("{}/api/history", self.base_url)
    }

    async fn try_record(&self, entry: &NewHistoryEntry) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.history_url())
            .json(entry)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryClientTrait for HistoryClient {
    async fn fetch(&self) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .http
            .get(self.history_url())
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn record(&self, entry: NewHistoryEntry) {
        if let Err(e) = self.try_record(&entry).await {
            warn!("failed to save search history: {}", e);
        }
    }

    async fn commit_edit(&self, patch: HistoryPatch) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .http
            .put(self.history_url())
            .json(&patch)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        // No patch reconciliation: last writer wins, then refetch.
        self.fetch().await
    }

    async fn remove(&self, id: &str) -> Result<Vec<HistoryEntry>, ClientError> {
        let response = self
            .http
            .delete(self.history_url())
            .json(&DeleteRequest { id: id.to_string() })
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        self.fetch().await
    }

    fn download_target<'a>(&self, entry: &'a HistoryEntry) -> Option<&'a str> {
        entry.download_url.as_deref()
    }
}
