//! Upgrade a persisted snapshot from any earlier category layout.
//!
//! Current keys (and their old aliases) are carried over; legacy aggregate
//! buckets are fanned out into every category their items classify into and
//! then removed; anything else is dropped. A single unreadable item is
//! skipped, never fatal.
//!
//! The output contains only current keys, so migrating it again is a no-op.

use serde::Serialize;
use serde_json::Value;

use crate::core::{Category, ItemRecord, LegacyCategory, RawSnapshot, Snapshot};

/// Summary of one migration run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Records carried over from current or aliased keys.
    pub carried: usize,
    /// Aliased keys folded into their current category.
    pub folded_aliases: Vec<String>,
    /// Legacy items read from aggregate buckets.
    pub legacy_items: usize,
    /// Target placements made from legacy items (fan-out counts each).
    pub placements: usize,
    /// Legacy items that classify into no current category.
    pub unmapped: usize,
    /// Records dropped because their id was already present.
    pub duplicates: usize,
    /// Unreadable records skipped.
    pub skipped: usize,
    /// Keys that are neither current, aliased, nor legacy.
    pub dropped_keys: Vec<String>,
    pub warnings: Vec<String>,
}

impl MigrationReport {
    /// True when the input already used the current layout verbatim.
    pub fn is_clean(&self) -> bool {
        self.folded_aliases.is_empty()
            && self.legacy_items == 0
            && self.duplicates == 0
            && self.skipped == 0
            && self.dropped_keys.is_empty()
    }

    fn skip(&mut self, warning: String) {
        self.skipped += 1;
        self.warnings.push(warning);
    }
}

/// Migrate a raw snapshot into the current schema.
pub fn migrate(raw: &RawSnapshot) -> Snapshot {
    migrate_with_report(raw).0
}

pub fn migrate_with_report(raw: &RawSnapshot) -> (Snapshot, MigrationReport) {
    let mut report = MigrationReport::default();
    let mut snapshot = Snapshot::canonical();

    // Canonical keys first so their records keep precedence over aliases.
    let mut aliased = Vec::new();
    for (key, value) in raw.iter() {
        match Category::parse_str(key) {
            Some(category) if Category::is_canonical(key) => {
                carry_list(&mut snapshot, category, key, value, &mut report);
            }
            Some(category) => aliased.push((key, category, value)),
            None => {
                if LegacyCategory::parse_str(key).is_none() {
                    report.dropped_keys.push(key.to_string());
                    report
                        .warnings
                        .push(format!("dropped unknown category `{key}`"));
                }
            }
        }
    }
    for (key, category, value) in aliased {
        report.folded_aliases.push(key.to_string());
        fold_alias(&mut snapshot, category, key, value, &mut report);
    }

    for legacy in LegacyCategory::ALL {
        if let Some(value) = raw.get(legacy.as_str()) {
            fan_out(&mut snapshot, *legacy, value, &mut report);
        }
    }

    if !report.is_clean() {
        tracing::info!(
            carried = report.carried,
            legacy_items = report.legacy_items,
            placements = report.placements,
            unmapped = report.unmapped,
            duplicates = report.duplicates,
            skipped = report.skipped,
            dropped_keys = report.dropped_keys.len(),
            "migrated snapshot layout"
        );
    }
    for warning in &report.warnings {
        tracing::warn!("{warning}");
    }
    (snapshot, report)
}

fn list_items<'a>(key: &str, value: &'a Value, report: &mut MigrationReport) -> &'a [Value] {
    match value.as_array() {
        Some(items) => items,
        None => {
            report.skip(format!("category `{key}` is not a list"));
            &[]
        }
    }
}

fn parse_record(key: &str, index: usize, value: &Value, report: &mut MigrationReport) -> Option<ItemRecord> {
    match serde_json::from_value::<ItemRecord>(value.clone()) {
        Ok(record) => Some(record),
        Err(err) => {
            report.skip(format!("skipped `{key}` item {index}: {err}"));
            None
        }
    }
}

/// Carry a current list, collapsing duplicate ids to the newest record.
fn carry_list(
    snapshot: &mut Snapshot,
    category: Category,
    key: &str,
    value: &Value,
    report: &mut MigrationReport,
) {
    let mut kept: Vec<ItemRecord> = Vec::new();
    for (index, item) in list_items(key, value, report).iter().enumerate() {
        let Some(record) = parse_record(key, index, item, report) else {
            continue;
        };
        match kept.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => {
                report.duplicates += 1;
                if record.lww_stamp() > existing.lww_stamp() {
                    *existing = record;
                }
            }
            None => {
                report.carried += 1;
                kept.push(record);
            }
        }
    }
    snapshot.set_items(category, kept);
}

/// Append records from an old key unless the id is already present.
fn fold_alias(
    snapshot: &mut Snapshot,
    category: Category,
    key: &str,
    value: &Value,
    report: &mut MigrationReport,
) {
    for (index, item) in list_items(key, value, report).iter().enumerate() {
        let Some(record) = parse_record(key, index, item, report) else {
            continue;
        };
        if append_unique(snapshot, category, record) {
            report.carried += 1;
        } else {
            report.duplicates += 1;
        }
    }
}

fn fan_out(snapshot: &mut Snapshot, legacy: LegacyCategory, value: &Value, report: &mut MigrationReport) {
    let key = legacy.as_str();
    for (index, item) in list_items(key, value, report).iter().enumerate() {
        let Some(record) = parse_record(key, index, item, report) else {
            continue;
        };
        report.legacy_items += 1;
        let targets = match legacy.classify(item) {
            Ok(targets) => targets,
            Err(err) => {
                report.skip(format!("skipped `{key}` item `{}`: {err}", record.id));
                continue;
            }
        };
        if targets.is_empty() {
            report.unmapped += 1;
            continue;
        }
        for category in targets {
            if append_unique(snapshot, category, record.clone()) {
                report.placements += 1;
            } else {
                report.duplicates += 1;
            }
        }
    }
}

fn append_unique(snapshot: &mut Snapshot, category: Category, record: ItemRecord) -> bool {
    if snapshot.get(category, &record.id).is_some() {
        return false;
    }
    snapshot.upsert(category, record);
    true
}
