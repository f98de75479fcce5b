//! Sync orchestration.
//!
//! Provides:
//! - `SyncProcess`: typestate fetch -> merge -> push cycle
//! - `Session`: owns the device's snapshot and routes user actions
//! - `SyncStatus`: pollable idle/syncing/error state

pub mod error;
pub mod process;
pub mod session;

pub use error::SyncError;
pub use process::{Fetched, Idle, Merged, SyncOutcome, SyncProcess, sync_once};
pub use session::{Clock, Session, SyncStatus};
