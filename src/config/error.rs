use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Effect, Transience};

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    pub fn transience(&self) -> Transience {
        match self {
            ConfigError::Parse { .. } | ConfigError::Render(_) => Transience::Permanent,
            ConfigError::Read { .. } | ConfigError::Write { .. } => Transience::Unknown,
        }
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}
