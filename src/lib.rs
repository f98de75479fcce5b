#![forbid(unsafe_code)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
mod enum_str;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod store;
pub mod sync;
pub mod telemetry;

pub use error::{Effect, Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Action, Category, CategoryStats, ItemRecord, MergeSummary, ParentTable, RawSnapshot,
    ReferenceData, Retention, Snapshot, Status, WallClock, apply_transition, collect_tombstones,
    merge, merge_at, propagate,
};
pub use crate::migrate::{MigrationReport, migrate};
pub use crate::store::{BlobStore, RemoteStore, UserId};
pub use crate::sync::{Session, SyncStatus};
