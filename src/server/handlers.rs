//! Request handlers for the history CRUD and generation proxy routes.
//!
//! Every history handler runs a full read-modify-write cycle against
//! the request's cookie: build a [`CookieBlobStore`] from the jar, run
//! the store operation, and return the jar so the refreshed cookie
//! rides out on the response. GET leaves the cookie untouched.

use axum::extract::{Multipart, State};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use reqwest::multipart::{Form, Part};
use tracing::{error, warn};

use crate::managers::history_store::{HistoryStore, HistoryStoreTrait};
use crate::storage::CookieBlobStore;
use crate::types::errors::HistoryError;
use crate::types::generation::{
    DownloadRequest, DownloadResolution, JobStatus, JobSubmission, StatusRequest,
};
use crate::types::history::{
    DeleteAck, DeleteRequest, HistoryEntry, HistoryPatch, NewHistoryEntry,
};

use super::error::ApiError;
use super::AppState;

use crate::services::generation_client::GenerationClientTrait;

fn cookie_store(state: &AppState, jar: CookieJar) -> HistoryStore<CookieBlobStore> {
    HistoryStore::new(CookieBlobStore::new(jar, state.config.cookie_settings()))
}

// ─── History ───

/// GET /api/history — full list, most-recent-first. An absent or
/// corrupt cookie yields an empty list, never an error.
pub async fn list_history(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let store = cookie_store(&state, jar);
    match store.list() {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => {
            error!("failed to fetch history: {}", e);
            Err(ApiError::Internal("Failed to fetch history"))
        }
    }
}

/// POST /api/history — register an entry; responds with the stored
/// entry including its assigned id.
pub async fn create_history(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<NewHistoryEntry>,
) -> Result<(CookieJar, Json<HistoryEntry>), ApiError> {
    let mut store = cookie_store(&state, jar);
    match store.create(payload) {
        Ok(stored) => Ok((store.into_inner().into_jar(), Json(stored))),
        Err(e) => {
            error!("failed to save history: {}", e);
            Err(ApiError::Internal("Failed to save history"))
        }
    }
}

/// PUT /api/history — shallow-merge the payload onto the entry with
/// the matching id. Unknown ids are a 404.
pub async fn update_history(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<HistoryPatch>,
) -> Result<(CookieJar, Json<HistoryEntry>), ApiError> {
    let mut store = cookie_store(&state, jar);
    match store.update(payload) {
        Ok(merged) => Ok((store.into_inner().into_jar(), Json(merged))),
        Err(HistoryError::NotFound(id)) => {
            warn!("update for unknown history entry {}", id);
            Err(ApiError::NotFound("History entry not found"))
        }
        Err(e) => {
            error!("failed to update history: {}", e);
            Err(ApiError::Internal("Failed to update history"))
        }
    }
}

/// DELETE /api/history — remove the entry with the matching id.
/// Deleting an unknown id (or with no history at all) still succeeds.
pub async fn delete_history(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<DeleteRequest>,
) -> Result<(CookieJar, Json<DeleteAck>), ApiError> {
    let mut store = cookie_store(&state, jar);
    match store.delete(&payload.id) {
        Ok(ack) => Ok((store.into_inner().into_jar(), Json(ack))),
        Err(e) => {
            error!("failed to delete history item: {}", e);
            Err(ApiError::Internal("Failed to delete history item"))
        }
    }
}

// ─── Generation proxy ───

/// POST /api/generate — forward a multipart submission to the
/// generation API and relay its response.
pub async fn submit_generation(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<JobSubmission>, ApiError> {
    let mut form = Form::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("unreadable generation form: {}", e);
        ApiError::BadRequest("Malformed form data")
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let data = field.bytes().await.map_err(|e| {
                    warn!("unreadable generation form field {}: {}", name, e);
                    ApiError::BadRequest("Malformed form data")
                })?;
                form = form.part(name, Part::bytes(data.to_vec()).file_name(file_name));
            }
            None => {
                let text = field.text().await.map_err(|e| {
                    warn!("unreadable generation form field {}: {}", name, e);
                    ApiError::BadRequest("Malformed form data")
                })?;
                form = form.text(name, text);
            }
        }
    }

    match state.generation.submit_job(form).await {
        Ok(submission) => Ok(Json(submission)),
        Err(e) => {
            error!("generation submission failed: {}", e);
            Err(ApiError::Upstream("Generation request failed"))
        }
    }
}

/// POST /api/status — relay a job status check.
pub async fn check_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<JobStatus>, ApiError> {
    match state.generation.check_status(&payload.subscription_key).await {
        Ok(status) => Ok(Json(status)),
        Err(e) => {
            error!("status check failed: {}", e);
            Err(ApiError::Upstream("Status check failed"))
        }
    }
}

/// POST /api/download — resolve the download URL for a finished task.
pub async fn resolve_download(
    State(state): State<AppState>,
    Json(payload): Json<DownloadRequest>,
) -> Result<Json<DownloadResolution>, ApiError> {
    match state.generation.resolve_download(&payload.task_uuid).await {
        Ok(resolution) => Ok(Json(resolution)),
        Err(e) => {
            error!("download resolution failed: {}", e);
            Err(ApiError::Upstream("Download resolution failed"))
        }
    }
}
