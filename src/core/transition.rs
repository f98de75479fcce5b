//! Layer 6: Status transitions
//!
//! Cyclic toggle: unvisited -> visited -> bucketList -> unvisited (tombstone).
//! Explicit set jumps to any state; clearing produces the same tombstone
//! shape as the cyclic removal. Every change stamps `now`.

use super::category::{Category, Status};
use super::item::ItemRecord;
use super::propagate::{ParentTable, propagate};
use super::snapshot::Snapshot;
use super::time::WallClock;

/// A user action on one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Advance one step around the cycle.
    Toggle,
    /// Jump straight to a status; `None` clears the mark.
    Set(Option<Status>),
}

/// The status after one toggle, starting from what the user currently sees.
pub fn next_status(current: Status) -> Status {
    match current {
        Status::Unvisited => Status::Visited,
        Status::Visited => Status::BucketList,
        Status::BucketList => Status::Unvisited,
    }
}

/// Apply an action to one record. `None` means nothing changes.
pub fn transition_record(
    existing: Option<&ItemRecord>,
    id: &str,
    action: Action,
    now: WallClock,
) -> Option<ItemRecord> {
    let current = existing
        .map(ItemRecord::effective_status)
        .unwrap_or(Status::Unvisited);
    let target = match action {
        Action::Toggle => next_status(current),
        Action::Set(status) => status.unwrap_or(Status::Unvisited),
    };

    match (target, existing) {
        // Nothing stored, nothing to clear.
        (Status::Unvisited, None) => None,
        (Status::Unvisited, Some(record)) => Some(record.clone().into_tombstone(now)),
        (status, _) => Some(ItemRecord::new(id, status, now)),
    }
}

/// Apply a user action, then propagate to parents when the result is visited.
pub fn apply_transition(
    snapshot: &Snapshot,
    parents: &ParentTable,
    category: Category,
    id: &str,
    action: Action,
    now: WallClock,
) -> Snapshot {
    let Some(record) = transition_record(snapshot.get(category, id), id, action, now) else {
        return snapshot.clone();
    };
    let became_visited = record.effective_status() == Status::Visited;
    tracing::debug!(
        category = %category,
        id,
        status = %record.effective_status(),
        "applied status transition"
    );

    let next = snapshot.with_record(category, record);
    if became_visited {
        propagate(&next, parents, category, id, now)
    } else {
        next
    }
}
