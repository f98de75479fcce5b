//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub const DAY_MS: u64 = 86_400_000;
pub const NOW: u64 = 1_800_000_000_000;

/// An isolated device: its own data and config dirs, optionally sharing a
/// remote directory with other devices.
pub struct Device {
    root: TempDir,
    remote: PathBuf,
}

impl Device {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        let remote = root.path().join("data").join("remote");
        Self { root, remote }
    }

    /// A second device pointed at `other`'s remote directory.
    pub fn sharing_remote_with(other: &Device) -> Self {
        let root = TempDir::new().expect("create temp dir");
        Self {
            root,
            remote: other.remote.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("config")
    }

    pub fn remote_dir(&self) -> &Path {
        &self.remote
    }

    /// `cks` with env pinned to this device and user `alice`.
    pub fn cks(&self) -> Command {
        let config = self.root.path().join("device.toml");
        let body = format!(
            "[remote]\ndir = {}\n",
            toml_string(&self.remote.display().to_string())
        );
        fs::write(&config, body).expect("write device config");

        let mut cmd = Command::cargo_bin("cks").expect("cks binary");
        cmd.current_dir(self.root.path())
            .env("CKS_DATA_DIR", self.data_dir())
            .env("CKS_CONFIG_DIR", self.config_dir())
            .env("CKS_USER", "alice")
            .env_remove("CKS_LOG")
            .env_remove("CKS_RETENTION_DAYS")
            .env_remove("CKS_REFERENCE_DATA")
            .arg("--config")
            .arg(config);
        cmd
    }

    pub fn write(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, serde_json::to_vec_pretty(value).expect("encode json"))
            .expect("write json fixture");
        path
    }

    pub fn write_str(&self, name: &str, body: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, body).expect("write fixture");
        path
    }

    /// The raw remote document for `alice`, if any.
    pub fn remote_doc(&self) -> Option<Value> {
        let path = self.remote.join("alice.json");
        let raw = fs::read_to_string(path).ok()?;
        Some(serde_json::from_str(&raw).expect("remote doc is json"))
    }
}

fn toml_string(raw: &str) -> String {
    format!("'{raw}'")
}

pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

/// Ids in one category of a snapshot JSON value, in order.
pub fn ids(snapshot: &Value, category: &str) -> Vec<String> {
    snapshot
        .get(category)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// The record for `id` in `category`.
pub fn record<'a>(snapshot: &'a Value, category: &str, id: &str) -> Option<&'a Value> {
    snapshot
        .get(category)?
        .as_array()?
        .iter()
        .find(|item| item.get("id").and_then(Value::as_str) == Some(id))
}
