//! End-to-end behavior of the pure pipeline through the public API.

use checklist_sync::core::{DAY_MS, merge_with_summary};
use checklist_sync::{
    Action, Category, ItemRecord, ParentTable, RawSnapshot, Retention, Snapshot, Status,
    WallClock, apply_transition, collect_tombstones, merge_at, migrate,
};
use serde_json::json;

const NOW: WallClock = WallClock(1_800_000_000_000);

fn raw(value: serde_json::Value) -> RawSnapshot {
    serde_json::from_value(value).expect("raw snapshot")
}

#[test]
fn newer_local_record_wins() {
    let local = migrate(&raw(json!({
        "countries": [{"id": "US", "status": "visited", "updatedAt": 1000}]
    })));
    let remote = migrate(&raw(json!({
        "countries": [{"id": "US", "status": "bucketList", "updatedAt": 500}]
    })));
    let merged = merge_at(&local, &remote, NOW);
    let us = merged.get(Category::Countries, "US").expect("US");
    assert_eq!(us.status, Status::Visited);
    assert_eq!(us.updated_at, Some(WallClock(1000)));
}

#[test]
fn disjoint_records_are_unioned() {
    let local = migrate(&raw(json!({
        "countries": [{"id": "CA", "status": "bucketList", "updatedAt": 2000}]
    })));
    let remote = migrate(&raw(json!({
        "countries": [{"id": "MX", "status": "visited", "updatedAt": 3000}]
    })));
    let merged = merge_at(&local, &remote, NOW);
    assert_eq!(
        merged.get(Category::Countries, "CA").map(|r| r.status),
        Some(Status::BucketList)
    );
    assert_eq!(
        merged.get(Category::Countries, "MX").map(|r| r.status),
        Some(Status::Visited)
    );
    assert_eq!(merged.items(Category::Countries).len(), 2);
}

#[test]
fn equal_stamps_keep_the_local_record() {
    // Pinned: ties favor this device.
    let local = Snapshot::canonical().with_record(
        Category::Museums,
        ItemRecord::new("moma", Status::Visited, WallClock(42)),
    );
    let remote = Snapshot::canonical().with_record(
        Category::Museums,
        ItemRecord::new("moma", Status::BucketList, WallClock(42)),
    );
    let merged = merge_at(&local, &remote, NOW);
    assert_eq!(
        merged.get(Category::Museums, "moma").map(|r| r.status),
        Some(Status::Visited)
    );
}

#[test]
fn legacy_stadiums_are_split_by_sport() {
    let snapshot = migrate(&raw(json!({
        "stadiums": [
            {"id": "fenway", "sport": "Baseball", "status": "visited", "updatedAt": 10}
        ]
    })));
    assert_eq!(
        snapshot.get(Category::MlbStadiums, "fenway"),
        Some(&ItemRecord::new("fenway", Status::Visited, WallClock(10)))
    );

    let encoded = serde_json::to_value(&snapshot).expect("encode");
    assert!(encoded.get("stadiums").is_none());
    assert_eq!(
        encoded["mlbStadiums"],
        json!([{"id": "fenway", "status": "visited", "updatedAt": 10}])
    );
}

#[test]
fn toggling_a_park_cycles_to_a_tombstone() {
    let parents = ParentTable::default();
    let park = Category::NationalParks;
    let once = apply_transition(
        &Snapshot::canonical(),
        &parents,
        park,
        "yellowstone",
        Action::Toggle,
        WallClock(1),
    );
    assert_eq!(
        once.get(park, "yellowstone").map(|r| r.status),
        Some(Status::Visited)
    );

    let twice = apply_transition(&once, &parents, park, "yellowstone", Action::Toggle, WallClock(2));
    assert_eq!(
        twice.get(park, "yellowstone").map(|r| r.status),
        Some(Status::BucketList)
    );

    let thrice = apply_transition(&twice, &parents, park, "yellowstone", Action::Toggle, WallClock(3));
    let record = thrice.get(park, "yellowstone").expect("tombstone kept");
    assert!(record.deleted);
    assert_eq!(record.updated_at, Some(WallClock(3)));
    assert_eq!(record.effective_status(), Status::Unvisited);
}

#[test]
fn visiting_a_world_city_marks_its_country() {
    let parents = ParentTable::builder()
        .world_city("paris-fr", "FR", None)
        .build();
    let next = apply_transition(
        &Snapshot::canonical(),
        &parents,
        Category::WorldCities,
        "paris-fr",
        Action::Set(Some(Status::Visited)),
        NOW,
    );
    assert_eq!(
        next.get(Category::Countries, "FR"),
        Some(&ItemRecord::new("FR", Status::Visited, NOW))
    );
}

#[test]
fn bucket_listing_a_city_leaves_parents_alone() {
    let parents = ParentTable::builder().us_city("denver-co", "CO").build();
    let next = apply_transition(
        &Snapshot::canonical(),
        &parents,
        Category::UsCities,
        "denver-co",
        Action::Set(Some(Status::BucketList)),
        NOW,
    );
    assert!(next.get(Category::States, "CO").is_none());
}

#[test]
fn stale_tombstones_are_collected() {
    let old_at = WallClock(NOW.0 - 400 * DAY_MS);
    let recent_at = WallClock(NOW.0 - 10 * DAY_MS);
    let snapshot = Snapshot::canonical()
        .with_record(
            Category::Zoos,
            ItemRecord::new("old", Status::Visited, old_at).into_tombstone(old_at),
        )
        .with_record(
            Category::Zoos,
            ItemRecord::new("recent", Status::Visited, recent_at).into_tombstone(recent_at),
        );
    let collected = collect_tombstones(&snapshot, NOW);
    assert!(collected.get(Category::Zoos, "old").is_none());
    assert!(collected.get(Category::Zoos, "recent").is_some());
}

#[test]
fn merge_collects_expired_tombstones_from_either_side() {
    let old_at = WallClock(NOW.0 - 400 * DAY_MS);
    let local = Snapshot::canonical().with_record(
        Category::ThemeParks,
        ItemRecord::new("epcot", Status::Visited, old_at).into_tombstone(old_at),
    );
    let (merged, summary) =
        merge_with_summary(&local, &Snapshot::canonical(), Retention::default(), NOW);
    assert!(merged.get(Category::ThemeParks, "epcot").is_none());
    assert_eq!(summary.tombstones_collected, 1);
}

#[test]
fn migrating_twice_changes_nothing() {
    let legacy = raw(json!({
        "stadiums": [
            {"id": "fenway", "sport": "Baseball", "status": "visited", "updatedAt": 10},
            {"id": "msg", "sport": "Basketball", "status": "bucketList", "updatedAt": 11}
        ],
        "parks": [{"id": "zion", "status": "visited", "updatedAt": 12}]
    }));
    let once = migrate(&legacy);
    let twice = migrate(&once.to_raw());
    assert_eq!(once, twice);
    assert!(once.get(Category::NationalParks, "zion").is_some());
}
