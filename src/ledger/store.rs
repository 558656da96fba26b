//! Ledger storage backends
//!
//! The ledger persists as one serialized blob under one fixed location, so
//! the backend interface is a single read/write pair. [`FileStore`] keeps the
//! blob in a JSON file; [`MemoryStore`] keeps it in memory for tests and
//! ephemeral sessions. There is no versioning or migration scheme: a format
//! change means a manual reset.

use crate::ledger::error::LedgerResult;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Backend holding the ledger's one serialized blob
pub trait LedgerStore: Send + Sync {
    /// Read the blob. `None` if nothing has been written or it is unreadable.
    fn read(&self) -> Option<String>;

    /// Replace the blob
    fn write(&self, payload: &str) -> LedgerResult<()>;
}

/// In-memory store for tests and guest sessions without persistence
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a blob
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(payload.into())),
        }
    }
}

impl LedgerStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.blob.lock().ok()?.clone()
    }

    fn write(&self, payload: &str) -> LedgerResult<()> {
        if let Ok(mut blob) = self.blob.lock() {
            *blob = Some(payload.to_string());
        }
        Ok(())
    }
}

/// File-backed store: the whole ledger as one JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for FileStore {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&self, payload: &str) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.read(), None);

        store.write("[]").unwrap();
        assert_eq!(store.read().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("ledger.json"));

        assert_eq!(store.read(), None);
        store.write(r#"[{"id": 1}]"#).unwrap();
        assert_eq!(store.read().as_deref(), Some(r#"[{"id": 1}]"#));
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never_written.json"));
        assert_eq!(store.read(), None);
    }
}
