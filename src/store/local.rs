//! Durable local store: one JSON blob per key.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::core::{RawSnapshot, Snapshot};
use crate::migrate::{MigrationReport, migrate_with_report};

use super::error::StoreError;

/// Raw blob access. A missing blob is `Ok(None)`.
pub trait BlobStore: Send + Sync {
    fn read_blob(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write_blob(&self, key: &str, raw: &str) -> Result<(), StoreError>;
    fn remove_blob(&self, key: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "must not be empty",
        });
    }
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if !valid || key.starts_with('.') {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: "use ascii letters, digits, '-', '_' or '.'",
        });
    }
    Ok(())
}

/// Blobs as `<dir>/<key>.json`, written atomically.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn write_blob(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        atomic_write(&path, raw.as_bytes()).map_err(|source| StoreError::Write { path, source })
    }

    fn remove_blob(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }
}

/// Write through a temp file in the same directory, then rename over `path`.
/// Shared by the blob store, the directory remote, and config persistence.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::other("path has no parent directory"))?;
    fs::create_dir_all(dir)?;
    let temp = tempfile::NamedTempFile::new_in(dir)?;
    fs::write(temp.path(), data)?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// In-process blobs, for tests and ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.blobs().get(key).cloned())
    }

    fn write_blob(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.blobs().insert(key.to_string(), raw.to_string());
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.blobs().remove(key);
        Ok(())
    }
}

/// How the local snapshot was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No blob yet; started from the canonical empty snapshot.
    Missing,
    /// Blob could not be read or parsed; started empty.
    Recovered { reason: String },
    /// Blob parsed and migrated to the current layout.
    Loaded { report: MigrationReport },
}

/// The user's snapshot blob in a [`BlobStore`].
#[derive(Clone)]
pub struct LocalSnapshots {
    store: Arc<dyn BlobStore>,
    key: String,
}

impl LocalSnapshots {
    pub fn new(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and migrate; never fails. Unreadable data starts empty.
    pub fn load(&self) -> (Snapshot, LoadOutcome) {
        let raw = match self.store.read_blob(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Snapshot::canonical(), LoadOutcome::Missing),
            Err(err) => {
                tracing::warn!(key = %self.key, "local snapshot unreadable, starting empty: {err}");
                return (
                    Snapshot::canonical(),
                    LoadOutcome::Recovered {
                        reason: err.to_string(),
                    },
                );
            }
        };
        match RawSnapshot::from_json_str(&raw) {
            Ok(raw) => {
                let (snapshot, report) = migrate_with_report(&raw);
                (snapshot, LoadOutcome::Loaded { report })
            }
            Err(err) => {
                tracing::warn!(key = %self.key, "local snapshot is not valid JSON, starting empty: {err}");
                (
                    Snapshot::canonical(),
                    LoadOutcome::Recovered {
                        reason: err.to_string(),
                    },
                )
            }
        }
    }

    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        self.store.write_blob(&self.key, &raw)?;
        tracing::debug!(key = %self.key, records = snapshot.record_count(), "saved local snapshot");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove_blob(&self.key)
    }
}
