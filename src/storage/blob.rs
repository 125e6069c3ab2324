//! Narrow persistence interface for the serialized history blob.

use crate::types::errors::StorageError;

/// Single-value blob persistence.
///
/// `read` returns the current blob or `None` when nothing has been
/// written (or a previous write has expired). `write` overwrites the
/// blob and refreshes its expiry.
pub trait BlobStore {
    fn read(&self) -> Option<String>;
    fn write(&mut self, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    value: Option<String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Creates a store pre-seeded with a blob, e.g. a corrupt one.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self) -> Option<String> {
        self.value.clone()
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        self.value = Some(value.to_string());
        Ok(())
    }
}
