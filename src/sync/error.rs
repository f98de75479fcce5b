//! Sync error types.

use thiserror::Error;

use crate::core::{CoreError, Effect, Transience};
use crate::store::{RemoteError, StoreError};

/// Errors from a session or a sync cycle.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SyncError {
    #[error("failed to fetch remote snapshot: {0}")]
    Fetch(#[source] RemoteError),

    #[error("failed to push merged snapshot: {0}")]
    Push(#[source] RemoteError),

    #[error("failed to delete remote snapshot: {0}")]
    Delete(#[source] RemoteError),

    #[error("failed to persist local snapshot: {0}")]
    Persist(#[source] StoreError),

    #[error(transparent)]
    Input(#[from] CoreError),
}

impl SyncError {
    /// Whether retrying this operation may succeed.
    pub fn transience(&self) -> Transience {
        match self {
            SyncError::Fetch(e) | SyncError::Push(e) | SyncError::Delete(e) => e.transience(),
            SyncError::Persist(e) => e.transience(),
            SyncError::Input(e) => e.transience(),
        }
    }

    /// What we know about side effects when this error is returned.
    pub fn effect(&self) -> Effect {
        match self {
            SyncError::Fetch(_) | SyncError::Input(_) => Effect::None,
            // Push failed after nothing local was written.
            SyncError::Push(e) => e.effect(),
            SyncError::Delete(_) => Effect::Unknown,
            SyncError::Persist(e) => e.effect(),
        }
    }
}
