//! Layer 4: Tombstone collector
//!
//! Pure filter that erases tombstones older than the retention window.

use super::item::ItemRecord;
use super::snapshot::Snapshot;
use super::time::{Retention, WallClock};

/// Whether the collector keeps this record.
///
/// Undated tombstones are never collected: their age is unknown.
pub fn retains(item: &ItemRecord, retention: Retention, now: WallClock) -> bool {
    if !item.deleted {
        return true;
    }
    match item.updated_at {
        None => true,
        Some(updated_at) => now.since(updated_at) <= retention.window_ms(),
    }
}

/// Drop expired tombstones using the default one-year window.
pub fn collect_tombstones(snapshot: &Snapshot, now: WallClock) -> Snapshot {
    collect_tombstones_with(snapshot, Retention::default(), now)
}

pub fn collect_tombstones_with(
    snapshot: &Snapshot,
    retention: Retention,
    now: WallClock,
) -> Snapshot {
    let mut collected = Snapshot::new();
    for category in snapshot.categories() {
        let kept = snapshot
            .items(category)
            .iter()
            .filter(|item| retains(item, retention, now))
            .cloned()
            .collect();
        collected.set_items(category, kept);
    }
    let removed = snapshot.record_count() - collected.record_count();
    if removed > 0 {
        tracing::debug!(removed, "collected expired tombstones");
    }
    collected
}
