//! Sync typestate machine.
//!
//! Idle -> Fetched -> Merged -> pushed. Each transition consumes `self`, so
//! a merged snapshot cannot be pushed before it has been fetched and merged.
//!
//! The process never touches the local store. Callers commit the returned
//! snapshot locally only after `push` succeeds, which keeps local state
//! untouched on any remote failure.

use crate::core::{MergeSummary, Retention, Snapshot, WallClock, merge_with_summary};
use crate::migrate::migrate_with_report;
use crate::store::{RemoteStore, UserId};

use super::error::SyncError;

/// Initial phase.
pub struct Idle;

/// Remote snapshot fetched and migrated to the current layout.
pub struct Fetched {
    pub remote: Snapshot,
    /// False on first sync for this user.
    pub remote_found: bool,
    /// The remote document already used the current layout.
    pub layout_current: bool,
}

/// Merged snapshot ready to push.
pub struct Merged {
    pub snapshot: Snapshot,
    pub summary: MergeSummary,
    /// Push is skipped when the remote already holds exactly this snapshot.
    pub remote_current: bool,
}

/// Result of a completed cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncOutcome {
    pub snapshot: Snapshot,
    pub summary: MergeSummary,
    pub pushed: bool,
}

/// Sync process in a given phase.
///
/// ```ignore
/// let outcome = SyncProcess::new(user)
///     .fetch(&remote)?
///     .merge(&local, retention, now)
///     .push(&remote)?;
/// ```
pub struct SyncProcess<Phase> {
    pub user: UserId,
    pub phase: Phase,
}

impl SyncProcess<Idle> {
    pub fn new(user: UserId) -> Self {
        SyncProcess { user, phase: Idle }
    }

    /// Fetch the remote snapshot. A missing document is an empty snapshot.
    pub fn fetch(self, remote: &dyn RemoteStore) -> Result<SyncProcess<Fetched>, SyncError> {
        let fetched = remote.fetch_snapshot(&self.user).map_err(SyncError::Fetch)?;
        let phase = match fetched {
            Some(raw) => {
                let (snapshot, report) = migrate_with_report(&raw);
                if !report.is_clean() {
                    tracing::info!(user = %self.user, "remote snapshot used an older layout");
                }
                Fetched {
                    remote: snapshot,
                    remote_found: true,
                    layout_current: report.is_clean(),
                }
            }
            None => {
                tracing::debug!(user = %self.user, "no remote snapshot yet");
                Fetched {
                    remote: Snapshot::canonical(),
                    remote_found: false,
                    layout_current: false,
                }
            }
        };
        Ok(SyncProcess {
            user: self.user,
            phase,
        })
    }
}

impl SyncProcess<Fetched> {
    /// Merge with the local snapshot and collect expired tombstones.
    pub fn merge(
        self,
        local: &Snapshot,
        retention: Retention,
        now: WallClock,
    ) -> SyncProcess<Merged> {
        let Fetched {
            remote,
            remote_found,
            layout_current,
        } = self.phase;
        let (snapshot, summary) = merge_with_summary(local, &remote, retention, now);
        let remote_current = remote_found && layout_current && snapshot == remote;
        SyncProcess {
            user: self.user,
            phase: Merged {
                snapshot,
                summary,
                remote_current,
            },
        }
    }
}

impl SyncProcess<Merged> {
    pub fn summary(&self) -> &MergeSummary {
        &self.phase.summary
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.phase.snapshot
    }

    /// Upsert the merged snapshot unless the remote already matches.
    pub fn push(self, remote: &dyn RemoteStore) -> Result<SyncOutcome, SyncError> {
        let Merged {
            snapshot,
            summary,
            remote_current,
        } = self.phase;
        if !remote_current {
            remote
                .upsert_snapshot(&self.user, &snapshot)
                .map_err(SyncError::Push)?;
        }
        Ok(SyncOutcome {
            snapshot,
            summary,
            pushed: !remote_current,
        })
    }
}

/// Run a full cycle against `remote`.
pub fn sync_once(
    user: &UserId,
    local: &Snapshot,
    remote: &dyn RemoteStore,
    retention: Retention,
    now: WallClock,
) -> Result<SyncOutcome, SyncError> {
    SyncProcess::new(user.clone())
        .fetch(remote)?
        .merge(local, retention, now)
        .push(remote)
}
