use std::fmt;

// === HistoryError ===

/// Errors related to history store operations.
#[derive(Debug)]
pub enum HistoryError {
    /// History entry with the given ID was not found.
    NotFound(String),
    /// The persistence backend failed to write the blob.
    Storage(String),
    /// Failed to serialize the history list.
    Serialization(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NotFound(id) => write!(f, "History entry not found: {}", id),
            HistoryError::Storage(msg) => write!(f, "History storage error: {}", msg),
            HistoryError::Serialization(msg) => {
                write!(f, "History serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// === StorageError ===

/// Errors raised by blob storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Writing the blob to the backend failed.
    WriteFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::WriteFailed(msg) => write!(f, "Blob write failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === GenerationError ===

/// Errors related to the external model-generation API.
#[derive(Debug)]
pub enum GenerationError {
    /// A network error occurred while reaching the generation API.
    NetworkError(String),
    /// The generation API returned an error.
    ApiError(String),
    /// A submitted job reported failure.
    JobFailed(String),
    /// The job did not complete within the polling budget.
    Timeout(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::NetworkError(msg) => {
                write!(f, "Generation network error: {}", msg)
            }
            GenerationError::ApiError(msg) => write!(f, "Generation API error: {}", msg),
            GenerationError::JobFailed(msg) => write!(f, "Generation job failed: {}", msg),
            GenerationError::Timeout(msg) => write!(f, "Generation timed out: {}", msg),
        }
    }
}

impl std::error::Error for GenerationError {}

// === ClientError ===

/// Errors related to the history HTTP client.
#[derive(Debug)]
pub enum ClientError {
    /// A network error occurred while reaching the history service.
    NetworkError(String),
    /// The history service answered with a non-success status.
    Status(u16),
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::NetworkError(msg) => write!(f, "History client network error: {}", msg),
            ClientError::Status(code) => write!(f, "History service returned status {}", code),
            ClientError::Decode(msg) => write!(f, "History response decode error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}
