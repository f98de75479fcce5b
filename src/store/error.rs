//! Store error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Effect, Transience};

/// Errors from the durable local store.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("blob key `{key}` is invalid: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn transience(&self) -> Transience {
        match self {
            StoreError::InvalidKey { .. } | StoreError::Encode(_) => Transience::Permanent,
            StoreError::Read { .. } | StoreError::Write { .. } | StoreError::Remove { .. } => {
                Transience::Unknown
            }
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            // Writes go through a temp file and rename; a failure leaves the old blob.
            StoreError::Write { .. } => Effect::None,
            StoreError::Remove { .. } => Effect::Unknown,
            _ => Effect::None,
        }
    }
}

/// Errors from the remote store. "Not found" is not an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),

    #[error("remote store rejected credentials")]
    Unauthorized,

    #[error("remote store rejected request: {0}")]
    Rejected(String),

    #[error("remote snapshot is unreadable: {0}")]
    Corrupt(String),

    #[error("remote store I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl RemoteError {
    pub fn transience(&self) -> Transience {
        match self {
            RemoteError::Unavailable(_) | RemoteError::Io(_) => Transience::Retryable,
            RemoteError::Unauthorized | RemoteError::Corrupt(_) => Transience::Permanent,
            RemoteError::Rejected(_) => Transience::Unknown,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            RemoteError::Io(_) | RemoteError::Unavailable(_) => Effect::Unknown,
            _ => Effect::None,
        }
    }
}
