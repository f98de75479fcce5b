//! Sessions over the directory-backed stores, as two devices would use them.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use checklist_sync::store::{
    DirRemoteStore, FileBlobStore, LoadOutcome, LocalSnapshots, MemoryRemoteStore, RemoteError,
};
use checklist_sync::sync::SyncError;
use checklist_sync::{
    Category, ParentTable, RemoteStore, Session, Snapshot, Status, SyncStatus, UserId, WallClock,
};
use serde_json::json;
use tempfile::TempDir;

fn user() -> UserId {
    UserId::parse("alice").expect("user id")
}

fn open(device: &Path, remote: Arc<dyn RemoteStore>, clock: Arc<AtomicU64>) -> Session {
    let parents = ParentTable::builder()
        .world_city("paris-fr", "FR", None)
        .us_city("denver-co", "CO")
        .build();
    Session::open(
        user(),
        LocalSnapshots::new(Arc::new(FileBlobStore::new(device)), "selections"),
        remote,
        Arc::new(parents),
    )
    .with_clock(Arc::new(move || WallClock(clock.fetch_add(1, Ordering::SeqCst))))
}

#[test]
fn two_devices_converge_through_a_directory_remote() {
    let tmp = TempDir::new().expect("tempdir");
    let remote: Arc<dyn RemoteStore> = Arc::new(DirRemoteStore::new(tmp.path().join("remote")));
    let clock = Arc::new(AtomicU64::new(1_000));

    let mut laptop = open(&tmp.path().join("laptop"), remote.clone(), clock.clone());
    let mut phone = open(&tmp.path().join("phone"), remote.clone(), clock.clone());

    laptop
        .set_status(Category::WorldCities, "paris-fr", Some(Status::Visited))
        .expect("mark paris");
    phone
        .toggle(Category::NationalParks, "zion")
        .expect("toggle zion");

    assert!(laptop.sync().expect("laptop sync").pushed);
    phone.sync().expect("phone sync");
    laptop.sync().expect("laptop catches up");

    assert_eq!(laptop.snapshot(), phone.snapshot());
    assert_eq!(phone.status_of(Category::Countries, "FR"), Status::Visited);
    assert_eq!(laptop.status_of(Category::NationalParks, "zion"), Status::Visited);
}

#[test]
fn later_removal_beats_earlier_mark_across_devices() {
    let tmp = TempDir::new().expect("tempdir");
    let remote: Arc<dyn RemoteStore> = Arc::new(DirRemoteStore::new(tmp.path().join("remote")));
    let clock = Arc::new(AtomicU64::new(1_000));

    let mut laptop = open(&tmp.path().join("laptop"), remote.clone(), clock.clone());
    laptop.toggle(Category::Museums, "louvre").expect("visit");
    laptop.sync().expect("sync");

    let mut phone = open(&tmp.path().join("phone"), remote.clone(), clock.clone());
    phone.sync().expect("pull");
    phone
        .set_status(Category::Museums, "louvre", None)
        .expect("clear");
    phone.sync().expect("push removal");

    laptop.sync().expect("pull removal");
    let record = laptop
        .snapshot()
        .get(Category::Museums, "louvre")
        .expect("tombstone travels");
    assert!(record.deleted);
    assert_eq!(laptop.status_of(Category::Museums, "louvre"), Status::Unvisited);
}

#[test]
fn legacy_local_blob_is_upgraded_on_open() {
    let tmp = TempDir::new().expect("tempdir");
    let device = tmp.path().join("device");
    fs::create_dir_all(&device).expect("mkdir");
    fs::write(
        device.join("selections.json"),
        json!({
            "stadiums": [{"id": "fenway", "sport": "Baseball", "status": "visited", "updatedAt": 10}]
        })
        .to_string(),
    )
    .expect("seed legacy blob");

    let remote = Arc::new(MemoryRemoteStore::new());
    let session = open(&device, remote, Arc::new(AtomicU64::new(1_000)));
    assert!(matches!(session.load_outcome(), LoadOutcome::Loaded { report } if !report.is_clean()));
    assert_eq!(session.status_of(Category::MlbStadiums, "fenway"), Status::Visited);

    let stored: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(device.join("selections.json")).expect("read blob"),
    )
    .expect("blob json");
    assert!(stored.get("stadiums").is_none());
    assert!(stored.get("mlbStadiums").is_some());
}

#[test]
fn corrupt_local_blob_starts_empty() {
    let tmp = TempDir::new().expect("tempdir");
    let device = tmp.path().join("device");
    fs::create_dir_all(&device).expect("mkdir");
    fs::write(device.join("selections.json"), "{not json").expect("seed");

    let session = open(
        &device,
        Arc::new(MemoryRemoteStore::new()),
        Arc::new(AtomicU64::new(1_000)),
    );
    assert!(matches!(session.load_outcome(), LoadOutcome::Recovered { .. }));
    assert_eq!(session.snapshot(), &Snapshot::canonical());
}

#[test]
fn offline_sync_reports_error_and_recovers() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = Arc::new(MemoryRemoteStore::new());
    let mut session = open(
        &tmp.path().join("device"),
        remote.clone(),
        Arc::new(AtomicU64::new(1_000)),
    );
    session.toggle(Category::Zoos, "bronx").expect("toggle");

    remote.set_offline(true);
    let err = session.sync().expect_err("offline");
    assert!(matches!(err, SyncError::Fetch(RemoteError::Unavailable(_))));
    assert!(err.transience().is_retryable());
    assert_eq!(session.status(), SyncStatus::Error);
    assert_eq!(session.status_of(Category::Zoos, "bronx"), Status::Visited);

    remote.set_offline(false);
    session.sync().expect("back online");
    assert_eq!(session.status(), SyncStatus::Idle);
    assert!(session.last_error().is_none());
    assert!(remote.raw(&user()).is_some());
}

#[test]
fn second_sync_without_changes_skips_the_push() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = Arc::new(MemoryRemoteStore::new());
    let mut session = open(
        &tmp.path().join("device"),
        remote.clone(),
        Arc::new(AtomicU64::new(1_000)),
    );
    session.toggle(Category::SkiResorts, "vail").expect("toggle");
    assert!(session.sync().expect("first").pushed);
    assert!(!session.sync().expect("second").pushed);
    assert_eq!(remote.upsert_count(), 1);
}
