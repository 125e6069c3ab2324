//! Unit tests for the file blob backend.
//!
//! The file backend mirrors the cookie's TTL-from-last-write semantics;
//! these tests cover round-trips, expiry, and unreadable files.

use std::time::Duration;

use modelstudio::storage::{BlobStore, FileBlobStore};
use tempfile::tempdir;

#[test]
fn test_missing_file_reads_none() {
    let dir = tempdir().unwrap();
    let store = FileBlobStore::new(dir.path().join("history.json"), Duration::from_secs(60));
    assert_eq!(store.read(), None);
}

#[test]
fn test_write_then_read_round_trips() {
    let dir = tempdir().unwrap();
    let mut store = FileBlobStore::new(dir.path().join("history.json"), Duration::from_secs(60));

    store.write(r#"[{"id":"abc"}]"#).unwrap();
    assert_eq!(store.read().as_deref(), Some(r#"[{"id":"abc"}]"#));
}

#[test]
fn test_expired_blob_reads_none() {
    let dir = tempdir().unwrap();
    // Zero TTL: the blob expires the moment it is written.
    let mut store = FileBlobStore::new(dir.path().join("history.json"), Duration::ZERO);

    store.write("[]").unwrap();
    assert_eq!(store.read(), None);
}

#[test]
fn test_corrupt_file_reads_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not a stored blob").unwrap();

    let store = FileBlobStore::new(path, Duration::from_secs(60));
    assert_eq!(store.read(), None);
}

#[test]
fn test_rewrite_replaces_payload() {
    let dir = tempdir().unwrap();
    let mut store = FileBlobStore::new(dir.path().join("history.json"), Duration::from_secs(60));

    store.write("[]").unwrap();
    store.write(r#"[{"id":"xyz"}]"#).unwrap();
    assert_eq!(store.read().as_deref(), Some(r#"[{"id":"xyz"}]"#));
}
