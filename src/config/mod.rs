//! Config loading and persistence.

mod error;
mod load;
mod merge;
mod schema;

pub use error::ConfigError;
pub use load::{
    LoadedConfig, config_path, load, load_layer, load_or_init, load_user_config, write_config,
};
pub use merge::{IgnoredOverride, apply_env_overrides, merge_layers};
pub use schema::{
    Config, ConfigLayer, DEFAULT_BLOB_KEY, FileLoggingConfig, FileLoggingConfigOverride,
    LocalConfig, LocalConfigOverride, LogFormat, LogRotation, LoggingConfig,
    LoggingConfigOverride, RemoteConfig, RemoteConfigOverride,
};
