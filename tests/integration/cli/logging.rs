//! Diagnostics on stderr: config problems and log levels.

use std::fs;

use predicates::prelude::*;

use crate::fixtures::Device;

#[test]
fn bad_config_and_env_are_reported() {
    let device = Device::new();
    fs::create_dir_all(device.config_dir()).expect("config dir");
    fs::write(
        device.config_dir().join("config.toml"),
        "retention_days = \"soon\"\n",
    )
    .expect("write config");

    device
        .cks()
        .env("CKS_RETENTION_DAYS", "forever")
        .arg("stats")
        .assert()
        .success()
        .stderr(predicate::str::contains("config load failed"))
        .stderr(predicate::str::contains("config.toml"))
        .stderr(predicate::str::contains("invalid CKS_RETENTION_DAYS"));

    // A broken user file is reported, never replaced.
    let kept = fs::read_to_string(device.config_dir().join("config.toml")).expect("read config");
    assert!(kept.contains("soon"));
}

#[test]
fn invalid_user_override_is_reported() {
    let device = Device::new();
    device
        .cks()
        .env("CKS_USER", "not/a/user")
        .args(["toggle", "zoos", "bronx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid CKS_USER"));
}

#[test]
fn default_verbosity_hides_debug_events() {
    let device = Device::new();
    device
        .cks()
        .args(["toggle", "zoos", "bronx"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("INFO").not());
}

#[test]
fn transitions_are_logged_once() {
    let device = Device::new();
    let output = device
        .cks()
        .args(["-vv", "toggle", "zoos", "bronx"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("applied status transition").count(), 1);
    assert!(!stderr.contains("applied transition"));
}
