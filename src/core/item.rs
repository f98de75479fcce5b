//! Layer 2: Item record
//!
//! One tracked place within one category list.

use serde::{Deserialize, Serialize};

use super::category::Status;
use super::error::{CoreError, InvalidId};
use super::time::WallClock;

/// A place mark. `deleted = true` makes it a tombstone: its status is
/// ignored for display, but `id` and `updated_at` still drive merging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<WallClock>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deleted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ItemRecord {
    pub fn new(id: impl Into<String>, status: Status, updated_at: WallClock) -> Self {
        Self {
            id: id.into(),
            status,
            updated_at: Some(updated_at),
            deleted: false,
        }
    }

    /// A record as written by builds that did not stamp changes.
    pub fn unstamped(id: impl Into<String>, status: Status) -> Self {
        Self {
            id: id.into(),
            status,
            updated_at: None,
            deleted: false,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        self.deleted
    }

    /// Status as the user sees it.
    pub fn effective_status(&self) -> Status {
        if self.deleted {
            Status::Unvisited
        } else {
            self.status
        }
    }

    /// Timestamp used for last-writer-wins; a missing stamp sorts as 0.
    pub fn lww_stamp(&self) -> u64 {
        self.updated_at.map(WallClock::as_millis).unwrap_or(0)
    }

    /// Soft-delete, keeping the last status for schema uniformity.
    pub fn into_tombstone(self, now: WallClock) -> Self {
        Self {
            updated_at: Some(now),
            deleted: true,
            ..self
        }
    }
}

/// Validate a place id coming from outside the pure core.
pub fn parse_place_id(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidId {
            raw: raw.to_string(),
            reason: "must not be empty",
        }
        .into());
    }
    if trimmed.chars().any(char::is_control) {
        return Err(InvalidId {
            raw: raw.to_string(),
            reason: "must not contain control characters",
        }
        .into());
    }
    Ok(trimmed.to_string())
}
