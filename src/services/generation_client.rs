//! Generation API client for modelstudio.
//!
//! Thin reqwest client for the external model-generation service: job
//! submission, status polling, and download-URL resolution. The history
//! subsystem never calls this directly — it only stores the resolved
//! URLs as opaque strings.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::json;
use tracing::debug;

use crate::types::errors::GenerationError;
use crate::types::generation::{DownloadResolution, JobStatus, JobSubmission};

/// Trait defining generation API operations.
#[async_trait]
pub trait GenerationClientTrait {
    async fn submit_job(&self, form: Form) -> Result<JobSubmission, GenerationError>;
    async fn check_status(&self, subscription_key: &str) -> Result<JobStatus, GenerationError>;
    async fn resolve_download(&self, task_uuid: &str)
        -> Result<DownloadResolution, GenerationError>;
}

/// Generation client backed by reqwest.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GenerationClient {
    /// Creates a new client for the API at `base_url`. The key, when
    /// present, is sent as a bearer token.
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Polls the job status until every job is done, one attempt per
    /// `interval`, giving up after `max_attempts`. Belongs to the
    /// generation flow; history itself never polls.
    pub async fn poll_until_complete(
        &self,
        subscription_key: &str,
        max_attempts: u32,
        interval: Duration,
    ) -> Result<JobStatus, GenerationError> {
        for attempt in 0..max_attempts {
            let status = self.check_status(subscription_key).await?;
            if status.has_failed() {
                return Err(GenerationError::JobFailed(subscription_key.to_string()));
            }
            if status.is_complete() {
                return Ok(status);
            }
            debug!(
                "generation not ready (attempt {}/{})",
                attempt + 1,
                max_attempts
            );
            tokio::time::sleep(interval).await;
        }
        Err(GenerationError::Timeout(subscription_key.to_string()))
    }
}

#[async_trait]
impl GenerationClientTrait for GenerationClient {
    /// Submits a generation job as a multipart form. Returns the
    /// subscription key and task uuid issued by the API.
    async fn submit_job(&self, form: Form) -> Result<JobSubmission, GenerationError> {
        let response = self
            .authorize(self.http.post(self.endpoint("/rodin")).multipart(form))
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::ApiError(format!(
                "job submission failed with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))
    }

    /// Checks the state of the jobs behind a subscription key.
    async fn check_status(&self, subscription_key: &str) -> Result<JobStatus, GenerationError> {
        let response = self
            .authorize(self.http.post(self.endpoint("/status")))
            .json(&json!({ "subscription_key": subscription_key }))
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::ApiError(format!(
                "status check failed with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))
    }

    /// Resolves the download URL for a finished task.
    async fn resolve_download(
        &self,
        task_uuid: &str,
    ) -> Result<DownloadResolution, GenerationError> {
        let response = self
            .authorize(self.http.post(self.endpoint("/download")))
            .json(&json!({ "task_uuid": task_uuid }))
            .send()
            .await
            .map_err(|e| GenerationError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::ApiError(format!(
                "download resolution failed with status {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| GenerationError::ApiError(e.to_string()))
    }
}
