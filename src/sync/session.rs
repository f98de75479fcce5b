//! Session: the one mutator for a user's snapshot on this device.
//!
//! Owns the current snapshot and threads the parent table, stores, and
//! clock through every operation. Each operation computes the next snapshot
//! with a pure function, persists it, and only then swaps it in.

use std::fmt;
use std::sync::Arc;

use crate::core::{
    Action, Category, CategoryStats, ParentTable, Retention, Snapshot, Status, WallClock,
    apply_transition, parse_place_id, stats,
};
use crate::store::{LoadOutcome, LocalSnapshots, RemoteStore, UserId};

use super::error::SyncError;
use super::process::{SyncOutcome, sync_once};

/// Pollable sync state for a UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    Error,
}

crate::enum_str! {
    impl SyncStatus {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Idle => ["idle"],
            Syncing => ["syncing"],
            Error => ["error"],
        }
    }
}

pub type Clock = Arc<dyn Fn() -> WallClock + Send + Sync>;

pub struct Session {
    user: UserId,
    local: LocalSnapshots,
    remote: Arc<dyn RemoteStore>,
    parents: Arc<ParentTable>,
    retention: Retention,
    clock: Clock,
    snapshot: Snapshot,
    status: SyncStatus,
    last_error: Option<String>,
    load_outcome: LoadOutcome,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("local", &self.local.key())
            .field("retention", &self.retention)
            .field("status", &self.status)
            .field("records", &self.snapshot.record_count())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Load and migrate the local snapshot.
    ///
    /// A snapshot found in an older layout is written back in the current
    /// one; failure to do so is logged and the session still opens.
    pub fn open(
        user: UserId,
        local: LocalSnapshots,
        remote: Arc<dyn RemoteStore>,
        parents: Arc<ParentTable>,
    ) -> Self {
        let (snapshot, load_outcome) = local.load();
        if let LoadOutcome::Loaded { report } = &load_outcome
            && !report.is_clean()
        {
            if let Err(err) = local.save(&snapshot) {
                tracing::warn!(user = %user, "failed to write back migrated snapshot: {err}");
            }
        }
        tracing::debug!(user = %user, records = snapshot.record_count(), "session opened");
        Self {
            user,
            local,
            remote,
            parents,
            retention: Retention::default(),
            clock: Arc::new(WallClock::now),
            snapshot,
            status: SyncStatus::Idle,
            last_error: None,
            load_outcome,
        }
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    /// Effective status of one place; tombstones and absence read unvisited.
    pub fn status_of(&self, category: Category, id: &str) -> Status {
        self.snapshot
            .get(category, id)
            .map(|item| item.effective_status())
            .unwrap_or(Status::Unvisited)
    }

    /// Cycle unvisited -> visited -> bucket list -> unvisited.
    pub fn toggle(&mut self, category: Category, id: &str) -> Result<Status, SyncError> {
        self.act(category, id, Action::Toggle)
    }

    /// Jump straight to `status`; `None` clears the mark.
    pub fn set_status(
        &mut self,
        category: Category,
        id: &str,
        status: Option<Status>,
    ) -> Result<Status, SyncError> {
        self.act(category, id, Action::Set(status))
    }

    fn act(&mut self, category: Category, raw_id: &str, action: Action) -> Result<Status, SyncError> {
        let id = parse_place_id(raw_id)?;
        let now = (self.clock)();
        let next = apply_transition(&self.snapshot, &self.parents, category, &id, action, now);
        if next != self.snapshot {
            self.local.save(&next).map_err(SyncError::Persist)?;
            self.snapshot = next;
        }
        Ok(self.status_of(category, &id))
    }

    /// Fetch, merge, collect, push, then persist locally.
    ///
    /// On any remote failure the in-memory and stored snapshots stay as they
    /// were and the status becomes [`SyncStatus::Error`].
    pub fn sync(&mut self) -> Result<SyncOutcome, SyncError> {
        self.status = SyncStatus::Syncing;
        let now = (self.clock)();
        let result = sync_once(
            &self.user,
            &self.snapshot,
            self.remote.as_ref(),
            self.retention,
            now,
        )
        .and_then(|outcome| {
            self.local
                .save(&outcome.snapshot)
                .map_err(SyncError::Persist)?;
            Ok(outcome)
        });

        match result {
            Ok(outcome) => {
                self.snapshot = outcome.snapshot.clone();
                self.status = SyncStatus::Idle;
                self.last_error = None;
                tracing::info!(
                    user = %self.user,
                    pushed = outcome.pushed,
                    added_from_remote = outcome.summary.added_from_remote,
                    replaced_by_remote = outcome.summary.replaced_by_remote,
                    tombstones_collected = outcome.summary.tombstones_collected,
                    "sync complete"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(user = %self.user, effect = %err.effect(), "sync failed: {err}");
                self.status = SyncStatus::Error;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Forget everything: remote snapshot first, then the local blob.
    ///
    /// On failure nothing in memory changes and the status becomes
    /// [`SyncStatus::Error`]. A failed remote delete leaves the local blob
    /// in place.
    pub fn reset(&mut self) -> Result<(), SyncError> {
        let result = self
            .remote
            .delete_snapshot(&self.user)
            .map_err(SyncError::Delete)
            .and_then(|()| self.local.clear().map_err(SyncError::Persist));
        if let Err(err) = result {
            tracing::warn!(user = %self.user, effect = %err.effect(), "reset failed: {err}");
            self.status = SyncStatus::Error;
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        self.snapshot = Snapshot::canonical();
        self.status = SyncStatus::Idle;
        self.last_error = None;
        tracing::info!(user = %self.user, "session reset");
        Ok(())
    }

    pub fn stats(&self, totals: &std::collections::BTreeMap<Category, usize>) -> Vec<CategoryStats> {
        stats(&self.snapshot, totals)
    }
}
