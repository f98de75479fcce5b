//! Remote store: one snapshot document per user.
//!
//! Remote documents may have been written by an older client, so reads
//! return the untyped [`RawSnapshot`] and callers migrate before merging.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::core::{CoreError, InvalidId, RawSnapshot, Snapshot};

use super::error::RemoteError;
use super::local::atomic_write;

/// Owner of a remote snapshot.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidId {
                raw,
                reason: "user id must not be empty",
            }
            .into());
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));
        if !valid || trimmed.starts_with('.') {
            return Err(InvalidId {
                raw,
                reason: "user id may contain ascii letters, digits, '-', '_', '.', '@'",
            }
            .into());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::parse(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Per-user snapshot storage. A missing document is `Ok(None)`.
pub trait RemoteStore: Send + Sync {
    fn fetch_snapshot(&self, user: &UserId) -> Result<Option<RawSnapshot>, RemoteError>;
    fn upsert_snapshot(&self, user: &UserId, snapshot: &Snapshot) -> Result<(), RemoteError>;
    fn delete_snapshot(&self, user: &UserId) -> Result<(), RemoteError>;
}

/// Remote documents as `<dir>/<user>.json`. Useful with a synced folder.
#[derive(Clone, Debug)]
pub struct DirRemoteStore {
    dir: PathBuf,
}

impl DirRemoteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, user: &UserId) -> PathBuf {
        self.dir.join(format!("{user}.json"))
    }
}

impl RemoteStore for DirRemoteStore {
    fn fetch_snapshot(&self, user: &UserId) -> Result<Option<RawSnapshot>, RemoteError> {
        let path = self.path_for(user);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RemoteError::Io(e)),
        };
        RawSnapshot::from_json_str(&raw)
            .map(Some)
            .map_err(|e| RemoteError::Corrupt(format!("{}: {e}", path.display())))
    }

    fn upsert_snapshot(&self, user: &UserId, snapshot: &Snapshot) -> Result<(), RemoteError> {
        let raw = serde_json::to_vec(snapshot).map_err(|e| RemoteError::Rejected(e.to_string()))?;
        atomic_write(&self.path_for(user), &raw).map_err(RemoteError::Io)
    }

    fn delete_snapshot(&self, user: &UserId) -> Result<(), RemoteError> {
        match fs::remove_file(self.path_for(user)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RemoteError::Io(e)),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryRemoteState {
    docs: BTreeMap<UserId, RawSnapshot>,
    offline: bool,
    fail_next: Option<RemoteError>,
    fetches: usize,
    upserts: usize,
}

/// In-process remote with failure injection.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemoteStore {
    state: Arc<Mutex<MemoryRemoteState>>,
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryRemoteState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a raw document, bypassing typed encoding.
    pub fn put_raw(&self, user: &UserId, raw: RawSnapshot) {
        self.state().docs.insert(user.clone(), raw);
    }

    pub fn raw(&self, user: &UserId) -> Option<RawSnapshot> {
        self.state().docs.get(user).cloned()
    }

    /// While offline every call fails with [`RemoteError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Fail the next call with `err`.
    pub fn fail_next(&self, err: RemoteError) {
        self.state().fail_next = Some(err);
    }

    pub fn fetch_count(&self) -> usize {
        self.state().fetches
    }

    pub fn upsert_count(&self) -> usize {
        self.state().upserts
    }

    fn check(state: &mut MemoryRemoteState) -> Result<(), RemoteError> {
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        if state.offline {
            return Err(RemoteError::Unavailable("offline".into()));
        }
        Ok(())
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn fetch_snapshot(&self, user: &UserId) -> Result<Option<RawSnapshot>, RemoteError> {
        let mut state = self.state();
        Self::check(&mut state)?;
        state.fetches += 1;
        Ok(state.docs.get(user).cloned())
    }

    fn upsert_snapshot(&self, user: &UserId, snapshot: &Snapshot) -> Result<(), RemoteError> {
        let mut state = self.state();
        Self::check(&mut state)?;
        state.upserts += 1;
        state
            .docs
            .insert(user.clone(), RawSnapshot::from_snapshot(snapshot));
        Ok(())
    }

    fn delete_snapshot(&self, user: &UserId) -> Result<(), RemoteError> {
        let mut state = self.state();
        Self::check(&mut state)?;
        state.docs.remove(user);
        Ok(())
    }
}
