//! File commands: migrate, merge, gc.

use predicates::prelude::*;
use serde_json::json;

use crate::fixtures::{DAY_MS, Device, NOW, ids, record, stdout_json};

#[test]
fn migrate_splits_legacy_stadiums() {
    let device = Device::new();
    let input = device.write(
        "legacy.json",
        &json!({
            "stadiums": [{"id": "fenway", "sport": "Baseball", "status": "visited", "updatedAt": 10}]
        }),
    );

    let output = device
        .cks()
        .arg("migrate")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("migrated"))
        .get_output()
        .clone();
    let snapshot = stdout_json(&output);
    assert!(snapshot.get("stadiums").is_none());
    assert_eq!(
        snapshot["mlbStadiums"],
        json!([{"id": "fenway", "status": "visited", "updatedAt": 10}])
    );
}

#[test]
fn migrate_reads_stdin_and_reports_as_json() {
    let device = Device::new();
    let output = device
        .cks()
        .args(["--json", "migrate"])
        .write_stdin(json!({"countries": [{"id": "PE", "status": "visited"}]}).to_string())
        .assert()
        .success()
        .get_output()
        .clone();
    let body = stdout_json(&output);
    assert_eq!(ids(&body["snapshot"], "countries"), vec!["PE"]);
    assert!(body.get("report").is_some());
}

#[test]
fn migrate_rejects_malformed_json() {
    let device = Device::new();
    let input = device.write_str("broken.json", "[1, 2");
    device
        .cks()
        .arg("migrate")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn merge_prefers_newer_and_unions_disjoint() {
    let device = Device::new();
    let local = device.write(
        "local.json",
        &json!({"countries": [
            {"id": "US", "status": "visited", "updatedAt": 1000},
            {"id": "CA", "status": "bucketList", "updatedAt": 2000}
        ]}),
    );
    let remote = device.write(
        "remote.json",
        &json!({"countries": [
            {"id": "US", "status": "bucketList", "updatedAt": 500},
            {"id": "MX", "status": "visited", "updatedAt": 3000}
        ]}),
    );

    let output = device
        .cks()
        .arg("merge")
        .arg(&local)
        .arg(&remote)
        .arg("--now")
        .arg(NOW.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("1 added from remote"))
        .get_output()
        .clone();
    let merged = stdout_json(&output);
    assert_eq!(record(&merged, "countries", "US").unwrap()["status"], "visited");
    assert_eq!(record(&merged, "countries", "CA").unwrap()["status"], "bucketList");
    assert_eq!(record(&merged, "countries", "MX").unwrap()["status"], "visited");
}

#[test]
fn gc_drops_only_expired_tombstones() {
    let device = Device::new();
    let input = device.write(
        "tombs.json",
        &json!({"zoos": [
            {"id": "old", "status": "visited", "updatedAt": NOW - 400 * DAY_MS, "deleted": true},
            {"id": "recent", "status": "visited", "updatedAt": NOW - 10 * DAY_MS, "deleted": true}
        ]}),
    );

    let output = device
        .cks()
        .arg("gc")
        .arg(&input)
        .arg("--now")
        .arg(NOW.to_string())
        .assert()
        .success()
        .stderr(predicate::str::contains("collected 1 expired tombstones"))
        .get_output()
        .clone();
    assert_eq!(ids(&stdout_json(&output), "zoos"), vec!["recent"]);
}

#[test]
fn gc_honors_retention_override() {
    let device = Device::new();
    let input = device.write(
        "tombs.json",
        &json!({"zoos": [
            {"id": "recent", "status": "visited", "updatedAt": NOW - 10 * DAY_MS, "deleted": true}
        ]}),
    );

    let output = device
        .cks()
        .arg("gc")
        .arg(&input)
        .arg("--now")
        .arg(NOW.to_string())
        .args(["--retention_days", "7"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(ids(&stdout_json(&output), "zoos").is_empty());
}
