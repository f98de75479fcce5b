//! Layer 3: Snapshot
//!
//! Full mapping of category -> item records. A category that is absent reads
//! as an empty list, so equality ignores the difference.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::Category;
use super::item::ItemRecord;

/// The unit of merge, migration, and collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    lists: BTreeMap<Category, Vec<ItemRecord>>,
}

impl Snapshot {
    /// Snapshot with no categories at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical empty snapshot: every category present, all lists empty.
    pub fn canonical() -> Self {
        let lists = Category::all()
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();
        Self { lists }
    }

    pub fn items(&self, category: Category) -> &[ItemRecord] {
        self.lists
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get(&self, category: Category, id: &str) -> Option<&ItemRecord> {
        self.items(category).iter().find(|item| item.id == id)
    }

    /// Categories physically present (possibly with empty lists).
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.lists.keys().copied()
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.lists.contains_key(&category)
    }

    /// Replace a whole list.
    pub fn set_items(&mut self, category: Category, items: Vec<ItemRecord>) {
        self.lists.insert(category, items);
    }

    /// Insert or replace the record with the same id, keeping list position.
    pub fn upsert(&mut self, category: Category, record: ItemRecord) {
        let list = self.lists.entry(category).or_default();
        match list.iter_mut().find(|item| item.id == record.id) {
            Some(existing) => *existing = record,
            None => list.push(record),
        }
    }

    /// Copy with one record inserted or replaced.
    pub fn with_record(&self, category: Category, record: ItemRecord) -> Self {
        let mut next = self.clone();
        next.upsert(category, record);
        next
    }

    /// Total records including tombstones.
    pub fn record_count(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn tombstone_count(&self) -> usize {
        self.lists
            .values()
            .flat_map(|items| items.iter())
            .filter(|item| item.is_tombstone())
            .count()
    }

    /// Fill in missing categories with empty lists.
    pub fn into_canonical(mut self) -> Self {
        for category in Category::all() {
            self.lists.entry(*category).or_default();
        }
        self
    }

    pub fn to_raw(&self) -> RawSnapshot {
        RawSnapshot::from_snapshot(self)
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.lists
            .keys()
            .chain(other.lists.keys())
            .all(|category| self.items(*category) == other.items(*category))
    }
}

impl Eq for Snapshot {}

/// Untyped snapshot as persisted by any app version.
///
/// Keys may be current categories, aliases, legacy aggregates, or garbage;
/// only the migration pipeline turns this into a [`Snapshot`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSnapshot {
    entries: Map<String, Value>,
}

impl RawSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let entries = snapshot
            .lists
            .iter()
            .map(|(category, items)| {
                let values = items
                    .iter()
                    .filter_map(|item| serde_json::to_value(item).ok())
                    .collect();
                (category.as_str().to_string(), Value::Array(values))
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl From<Map<String, Value>> for RawSnapshot {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}
