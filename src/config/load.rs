use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::store::local::atomic_write;

use super::error::ConfigError;
use super::merge::{apply_env_overrides, merge_layers};
use super::{Config, ConfigLayer};

pub fn config_path() -> PathBuf {
    crate::paths::config_dir().join("config.toml")
}

/// Read one layer; a missing file is `Ok(None)`.
pub fn load_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_user_config() -> Result<Option<ConfigLayer>, ConfigError> {
    load_layer(&config_path())
}

/// Config in effect plus problems found while loading it.
///
/// Logging is configured from this config, so the warnings cannot go
/// through `tracing`; the binary prints them to stderr.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

/// Defaults, then the user file, then `explicit`, then the environment.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = load_layers(explicit)?;
    for ignored in apply_env_overrides(&mut config) {
        tracing::warn!("{ignored}");
    }
    Ok(config)
}

fn load_layers(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let mut layers = Vec::new();
    layers.extend(load_user_config()?);
    if let Some(path) = explicit {
        layers.extend(load_layer(path)?);
    }
    Ok(merge_layers(layers))
}

/// Like [`load`], but never fails; writes a default user file on first run.
pub fn load_or_init(explicit: Option<&Path>) -> LoadedConfig {
    let path = config_path();
    let had_user_config = path.exists();
    let mut warnings = Vec::new();

    let mut config = load_layers(explicit).unwrap_or_else(|e| {
        warnings.push(format!("config load failed, using defaults: {e}"));
        Config::default()
    });
    warnings.extend(
        apply_env_overrides(&mut config)
            .iter()
            .map(ToString::to_string),
    );

    if !had_user_config && let Err(e) = write_config(&path, &Config::default()) {
        warnings.push(format!("failed to write default config: {e}"));
    }

    LoadedConfig { config, warnings }
}

pub fn write_config(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(cfg)?;
    atomic_write(path, contents.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
