//! Layer 0: Time primitives
//!
//! WallClock is epoch milliseconds. It is the only ordering signal between
//! devices, so merges inherit whatever skew the device clocks have.

use serde::{Deserialize, Serialize};

pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// How long a tombstone is kept before the collector may erase it.
pub const DEFAULT_TOMBSTONE_RETENTION_DAYS: u64 = 365;

/// Wall clock in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallClock(pub u64);

impl WallClock {
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(ms)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, zero if `earlier` is in the future.
    pub fn since(self, earlier: WallClock) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn minus_days(self, days: u64) -> Self {
        Self(self.0.saturating_sub(days.saturating_mul(DAY_MS)))
    }
}

/// Retention window for tombstones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retention {
    window_ms: u64,
}

impl Retention {
    pub fn days(days: u64) -> Self {
        Self {
            window_ms: days.saturating_mul(DAY_MS),
        }
    }

    pub fn window_ms(self) -> u64 {
        self.window_ms
    }
}

impl Default for Retention {
    fn default() -> Self {
        Self::days(DEFAULT_TOMBSTONE_RETENTION_DAYS)
    }
}
