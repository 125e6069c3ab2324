use serde::{Deserialize, Serialize};

/// A single recorded prompt/result pair.
///
/// Field names serialize in camelCase to match the JSON the studio
/// front-end exchanges with the history endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Store-assigned UUID, immutable after creation.
    pub id: String,
    pub model_type: String,
    pub keywords: Vec<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// RFC 3339 creation time. Never touched by updates.
    pub timestamp: String,
}

/// Creation payload: a `HistoryEntry` minus the store-assigned id.
///
/// The timestamp may be supplied by the caller (the front-end stamps it
/// when registering a finished generation); when absent the store fills
/// in the current time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryEntry {
    pub model_type: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Update payload addressed by id.
///
/// Fields left `None` keep their stored value (shallow merge). The
/// creation timestamp is not part of the payload and cannot be edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPatch {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Body of a delete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

/// Acknowledgement returned by delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}
