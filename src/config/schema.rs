use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_TOMBSTONE_RETENTION_DAYS, Retention};
use crate::paths;
use crate::store::UserId;

pub const DEFAULT_BLOB_KEY: &str = "selections";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Days a tombstone is kept before the collector drops it.
    pub retention_days: u64,
    pub user_id: Option<UserId>,
    pub local: LocalConfig,
    pub remote: RemoteConfig,
    /// JSON reference data with city parents and per-category totals.
    pub reference_data: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_TOMBSTONE_RETENTION_DAYS,
            user_id: None,
            local: LocalConfig::default(),
            remote: RemoteConfig::default(),
            reference_data: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn retention(&self) -> Retention {
        Retention::days(self.retention_days)
    }

    pub fn local_dir(&self) -> PathBuf {
        self.local.dir.clone().unwrap_or_else(paths::local_dir)
    }

    pub fn remote_dir(&self) -> PathBuf {
        self.remote.dir.clone().unwrap_or_else(paths::remote_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub dir: Option<PathBuf>,
    pub blob_key: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            dir: None,
            blob_key: DEFAULT_BLOB_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Tree,
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogRotation {
    Daily,
    Hourly,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub stdout: bool,
    pub stdout_format: LogFormat,
    pub filter: Option<String>,
    pub file: FileLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stdout: true,
            stdout_format: LogFormat::Compact,
            filter: None,
            file: FileLoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub rotation: LogRotation,
    pub max_files: Option<usize>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: None,
            format: LogFormat::Json,
            rotation: LogRotation::Daily,
            max_files: Some(10),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfigOverride {
    pub stdout: Option<bool>,
    pub stdout_format: Option<LogFormat>,
    pub filter: Option<String>,
    pub file: Option<FileLoggingConfigOverride>,
}

impl LoggingConfigOverride {
    pub fn apply_to(&self, target: &mut LoggingConfig) {
        if let Some(stdout) = self.stdout {
            target.stdout = stdout;
        }
        if let Some(format) = self.stdout_format {
            target.stdout_format = format;
        }
        if let Some(filter) = self.filter.as_ref() {
            target.filter = Some(filter.clone());
        }
        if let Some(file) = self.file.as_ref() {
            file.apply_to(&mut target.file);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileLoggingConfigOverride {
    pub enabled: Option<bool>,
    pub dir: Option<PathBuf>,
    pub format: Option<LogFormat>,
    pub rotation: Option<LogRotation>,
    pub max_files: Option<usize>,
}

impl FileLoggingConfigOverride {
    pub fn apply_to(&self, target: &mut FileLoggingConfig) {
        if let Some(enabled) = self.enabled {
            target.enabled = enabled;
        }
        if let Some(dir) = self.dir.as_ref() {
            target.dir = Some(dir.clone());
        }
        if let Some(format) = self.format {
            target.format = format;
        }
        if let Some(rotation) = self.rotation {
            target.rotation = rotation;
        }
        if let Some(files) = self.max_files {
            target.max_files = Some(files);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocalConfigOverride {
    pub dir: Option<PathBuf>,
    pub blob_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RemoteConfigOverride {
    pub dir: Option<PathBuf>,
}

/// One config file. Unset fields leave the layer below untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConfigLayer {
    pub retention_days: Option<u64>,
    pub user_id: Option<UserId>,
    pub local: LocalConfigOverride,
    pub remote: RemoteConfigOverride,
    pub reference_data: Option<PathBuf>,
    pub logging: LoggingConfigOverride,
}

impl ConfigLayer {
    pub fn apply_to(&self, base: &mut Config) {
        if let Some(days) = self.retention_days {
            base.retention_days = days;
        }
        if self.user_id.is_some() {
            base.user_id = self.user_id.clone();
        }
        if let Some(dir) = self.local.dir.as_ref() {
            base.local.dir = Some(dir.clone());
        }
        if let Some(key) = self.local.blob_key.as_ref() {
            base.local.blob_key = key.clone();
        }
        if let Some(dir) = self.remote.dir.as_ref() {
            base.remote.dir = Some(dir.clone());
        }
        if let Some(path) = self.reference_data.as_ref() {
            base.reference_data = Some(path.clone());
        }
        self.logging.apply_to(&mut base.logging);
    }
}
