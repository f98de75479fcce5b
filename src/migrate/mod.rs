//! Migration utilities.
//!
//! Upgrades snapshots written by older app versions to the current
//! category layout.

pub mod layout;

pub use layout::{MigrationReport, migrate, migrate_with_report};
