//! Sync and reset across devices sharing a remote directory.

use predicates::prelude::*;

use crate::fixtures::{Device, ids, stdout_json};

#[test]
fn devices_converge_through_shared_remote() {
    let laptop = Device::new();
    let phone = Device::sharing_remote_with(&laptop);

    laptop
        .cks()
        .args(["set", "countries", "CA", "visited"])
        .assert()
        .success();
    phone
        .cks()
        .args(["set", "countries", "MX", "bucketList"])
        .assert()
        .success();

    laptop
        .cks()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("pushed"));
    phone.cks().arg("sync").assert().success();
    laptop.cks().arg("sync").assert().success();

    let doc = laptop.remote_doc().expect("remote written");
    let mut remote_ids = ids(&doc, "countries");
    remote_ids.sort();
    assert_eq!(remote_ids, vec!["CA", "MX"]);

    let output = laptop
        .cks()
        .args(["--json", "show", "countries"])
        .assert()
        .success()
        .get_output()
        .clone();
    let mut local_ids = ids(&stdout_json(&output), "countries");
    local_ids.sort();
    assert_eq!(local_ids, vec!["CA", "MX"]);
}

#[test]
fn sync_reports_json_status() {
    let device = Device::new();
    device
        .cks()
        .args(["toggle", "zoos", "bronx"])
        .assert()
        .success();
    let output = device
        .cks()
        .args(["--json", "sync"])
        .assert()
        .success()
        .get_output()
        .clone();
    let body = stdout_json(&output);
    assert_eq!(body["status"], "idle");
    assert_eq!(body["pushed"], true);
}

#[test]
fn reset_requires_confirmation() {
    let device = Device::new();
    device
        .cks()
        .arg("reset")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn reset_removes_local_and_remote() {
    let device = Device::new();
    device
        .cks()
        .args(["toggle", "zoos", "bronx"])
        .assert()
        .success();
    device.cks().arg("sync").assert().success();
    assert!(device.remote_doc().is_some());

    device
        .cks()
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset selections for alice"));
    assert!(device.remote_doc().is_none());

    let output = device
        .cks()
        .args(["--json", "show", "zoos"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(ids(&stdout_json(&output), "zoos").is_empty());
}
