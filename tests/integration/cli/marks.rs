//! Session commands on a single device.

use predicates::prelude::*;
use serde_json::json;

use crate::fixtures::{Device, ids, record, stdout_json};

#[test]
fn toggle_cycles_through_statuses() {
    let device = Device::new();
    for expected in ["visited", "bucketList", "unvisited"] {
        device
            .cks()
            .args(["toggle", "nationalParks", "yellowstone"])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "nationalParks/yellowstone: {expected}"
            )));
    }

    let output = device
        .cks()
        .args(["--json", "show", "nationalParks"])
        .assert()
        .success()
        .get_output()
        .clone();
    let shown = stdout_json(&output);
    assert_eq!(
        record(&shown, "nationalParks", "yellowstone").unwrap()["deleted"],
        json!(true)
    );
}

#[test]
fn set_accepts_aliases_and_clears() {
    let device = Device::new();
    device
        .cks()
        .args(["set", "parks", "zion", "bucket-list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nationalParks/zion: bucketList"));
    device
        .cks()
        .args(["set", "nationalParks", "zion", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nationalParks/zion: unvisited"));
}

#[test]
fn unknown_category_is_a_usage_error() {
    let device = Device::new();
    device
        .cks()
        .args(["toggle", "stadiums", "fenway"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("stadiums"));
}

#[test]
fn visiting_a_city_marks_parents_from_reference_data() {
    let device = Device::new();
    let reference = device.write(
        "reference.json",
        &json!({
            "worldCities": [{"id": "paris-fr", "country": "FR"}],
            "usCities": [{"id": "denver-co", "state": "CO"}]
        }),
    );

    device
        .cks()
        .env("CKS_REFERENCE_DATA", &reference)
        .args(["set", "worldCities", "paris-fr", "visited"])
        .assert()
        .success();

    let output = device
        .cks()
        .args(["--json", "show"])
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(ids(&stdout_json(&output), "countries"), vec!["FR"]);
}

#[test]
fn missing_user_is_reported() {
    let device = Device::new();
    device
        .cks()
        .env_remove("CKS_USER")
        .args(["toggle", "zoos", "bronx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no user configured"));
}

#[test]
fn stats_counts_marks() {
    let device = Device::new();
    device
        .cks()
        .args(["set", "museums", "moma", "visited"])
        .assert()
        .success();
    device
        .cks()
        .args(["set", "museums", "met", "bucketList"])
        .assert()
        .success();
    let output = device
        .cks()
        .args(["--json", "stats"])
        .assert()
        .success()
        .get_output()
        .clone();
    let rows = stdout_json(&output);
    let museums = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["category"] == "museums")
        .unwrap();
    assert_eq!(museums["visited"], 1);
    assert_eq!(museums["bucketList"], 1);
}
