use thiserror::Error;

pub use crate::core::{Effect, Transience};

use crate::config::ConfigError;
use crate::core::CoreError;
use crate::store::{RemoteError, StoreError};
use crate::sync::SyncError;

/// Crate-level convenience error.
///
/// Not a "god error": it is a thin wrapper over canonical capability errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Usage(String),
}

impl Error {
    pub fn transience(&self) -> Transience {
        match self {
            Error::Core(e) => e.transience(),
            Error::Store(e) => e.transience(),
            Error::Remote(e) => e.transience(),
            Error::Sync(e) => e.transience(),
            Error::Config(e) => e.transience(),
            Error::Io { .. } => Transience::Unknown,
            Error::Json { .. } | Error::Usage(_) => Transience::Permanent,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Error::Core(e) => e.effect(),
            Error::Store(e) => e.effect(),
            Error::Remote(e) => e.effect(),
            Error::Sync(e) => e.effect(),
            Error::Config(e) => e.effect(),
            Error::Io { .. } | Error::Json { .. } | Error::Usage(_) => Effect::None,
        }
    }
}
