//! modelstudio blob storage layer.
//!
//! The entire history list persists as one serialized blob behind the
//! narrow [`BlobStore`] interface, so the backend (cookie, memory, file)
//! is swappable without touching the CRUD logic.
//!
//! # Usage
//!
//! ```no_run
//! use modelstudio::storage::{BlobStore, MemoryBlobStore};
//!
//! let mut store = MemoryBlobStore::new();
//! store.write("[]").expect("memory writes cannot fail");
//! assert_eq!(store.read().as_deref(), Some("[]"));
//! ```

pub mod blob;
pub mod cookie;
pub mod file;

pub use blob::{BlobStore, MemoryBlobStore};
pub use cookie::{CookieBlobStore, CookieSettings};
pub use file::FileBlobStore;
