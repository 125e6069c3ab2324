//! HTTP error mapping.
//!
//! Handlers log the diagnostic and return one of these with a generic
//! message; the message is all the caller sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error surfaced by an API handler.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be used.
    BadRequest(&'static str),
    /// The referenced entry does not exist.
    NotFound(&'static str),
    /// A store operation failed.
    Internal(&'static str),
    /// The upstream generation API failed.
    Upstream(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
