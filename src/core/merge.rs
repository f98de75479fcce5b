//! Layer 5: Merge engine
//!
//! Per-category last-writer-wins over item ids. A remote record replaces the
//! local one only when its `updatedAt` is strictly greater; equal stamps keep
//! local. Missing stamps count as 0. Expired tombstones are collected last.
//!
//! Ordering between devices comes from wall clocks only, so a device with a
//! fast clock wins conflicts it should lose. There is no causal tracking.

use std::collections::BTreeMap;

use serde::Serialize;

use super::category::Category;
use super::item::ItemRecord;
use super::snapshot::Snapshot;
use super::time::{Retention, WallClock};
use super::tombstone::collect_tombstones_with;

/// Which side a merged record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Only local had the id.
    LocalOnly,
    /// Only remote had the id (a peer device added it).
    RemoteOnly,
    /// Both had it; local is as new or newer.
    KeptLocal,
    /// Both had it; remote is strictly newer.
    TookRemote,
}

/// Pick the winner for one id present on both sides.
pub fn resolve<'a>(local: &'a ItemRecord, remote: &'a ItemRecord) -> (&'a ItemRecord, Resolution) {
    if remote.lww_stamp() > local.lww_stamp() {
        (remote, Resolution::TookRemote)
    } else {
        (local, Resolution::KeptLocal)
    }
}

/// Counts for one merge, used for logging and sync reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub local_only: usize,
    pub added_from_remote: usize,
    pub kept_local: usize,
    pub replaced_by_remote: usize,
    pub tombstones_collected: usize,
}

impl MergeSummary {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::LocalOnly => self.local_only += 1,
            Resolution::RemoteOnly => self.added_from_remote += 1,
            Resolution::KeptLocal => self.kept_local += 1,
            Resolution::TookRemote => self.replaced_by_remote += 1,
        }
    }
}

/// Merge using the wall clock for tombstone expiry.
pub fn merge(local: &Snapshot, remote: &Snapshot) -> Snapshot {
    merge_at(local, remote, WallClock::now())
}

/// Merge with an explicit reference time. Inputs are never modified.
pub fn merge_at(local: &Snapshot, remote: &Snapshot, now: WallClock) -> Snapshot {
    merge_with_summary(local, remote, Retention::default(), now).0
}

pub fn merge_with_summary(
    local: &Snapshot,
    remote: &Snapshot,
    retention: Retention,
    now: WallClock,
) -> (Snapshot, MergeSummary) {
    let mut summary = MergeSummary::default();
    let mut merged = Snapshot::canonical();

    for category in Category::all() {
        let items = merge_category(local.items(*category), remote.items(*category), &mut summary);
        merged.set_items(*category, items);
    }

    let collected = collect_tombstones_with(&merged, retention, now);
    summary.tombstones_collected = merged.record_count() - collected.record_count();

    tracing::debug!(
        local_only = summary.local_only,
        added_from_remote = summary.added_from_remote,
        kept_local = summary.kept_local,
        replaced_by_remote = summary.replaced_by_remote,
        tombstones_collected = summary.tombstones_collected,
        "merged snapshots"
    );
    (collected, summary)
}

fn merge_category(
    local: &[ItemRecord],
    remote: &[ItemRecord],
    summary: &mut MergeSummary,
) -> Vec<ItemRecord> {
    // Working list keeps local order; remote-only ids append in remote order.
    let mut working: Vec<(ItemRecord, Resolution)> = Vec::with_capacity(local.len());
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();

    for item in local {
        match index.get(item.id.as_str()) {
            Some(&slot) => working[slot] = (item.clone(), Resolution::LocalOnly),
            None => {
                index.insert(item.id.as_str(), working.len());
                working.push((item.clone(), Resolution::LocalOnly));
            }
        }
    }

    for item in remote {
        match index.get(item.id.as_str()) {
            Some(&slot) => {
                let (current, _) = &working[slot];
                let (winner, resolution) = resolve(current, item);
                working[slot] = (winner.clone(), resolution);
            }
            None => {
                index.insert(item.id.as_str(), working.len());
                working.push((item.clone(), Resolution::RemoteOnly));
            }
        }
    }

    working
        .into_iter()
        .map(|(item, resolution)| {
            summary.record(resolution);
            item
        })
        .collect()
}
