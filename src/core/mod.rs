//! Core selection types and pure operations (Layers 0-6)
//!
//! Module hierarchy follows type dependency order:
//! - time: WallClock, Retention (Layer 0)
//! - category: Category, Status (Layer 1)
//! - item: ItemRecord (Layer 2)
//! - snapshot: Snapshot, RawSnapshot (Layer 3)
//! - legacy: LegacyCategory classification (Layer 3)
//! - tombstone: tombstone collector (Layer 4)
//! - merge: last-writer-wins merge (Layer 5)
//! - propagate: ParentTable, parent propagation (Layer 5)
//! - transition: status transition machine (Layer 6)
//!
//! Every operation takes a snapshot by reference and returns a new one.

pub mod category;
pub mod effect;
pub mod error;
pub mod item;
pub mod legacy;
pub mod merge;
pub mod propagate;
pub mod reference;
pub mod snapshot;
pub mod stats;
pub mod time;
pub mod tombstone;
pub mod transition;

pub use category::{Category, Status};
pub use effect::{Effect, Transience};
pub use error::{CoreError, InvalidCategory, InvalidId, InvalidReference, InvalidStatus};
pub use item::{ItemRecord, parse_place_id};
pub use legacy::{ClassifyError, LegacyCategory, Targets};
pub use merge::{MergeSummary, Resolution, merge, merge_at, merge_with_summary, resolve};
pub use propagate::{ParentLink, ParentTable, ParentTableBuilder, propagate};
pub use reference::{ReferenceData, UsCityRef, WorldCityRef};
pub use snapshot::{RawSnapshot, Snapshot};
pub use stats::{CategoryStats, stats};
pub use time::{DAY_MS, DEFAULT_TOMBSTONE_RETENTION_DAYS, Retention, WallClock};
pub use tombstone::{collect_tombstones, collect_tombstones_with, retains};
pub use transition::{Action, apply_transition, next_status, transition_record};
