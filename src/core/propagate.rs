//! Layer 5: Relationship propagation
//!
//! A city marked visited implies its containing state and/or country were
//! visited. Parents are looked up in a [`ParentTable`] built once from
//! reference data and passed in explicitly.

use std::collections::BTreeMap;

use super::category::{Category, Status};
use super::item::ItemRecord;
use super::snapshot::Snapshot;
use super::time::WallClock;

/// One parent entity implied by a child.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub category: Category,
    pub id: String,
}

impl ParentLink {
    pub fn new(category: Category, id: impl Into<String>) -> Self {
        Self {
            category,
            id: id.into(),
        }
    }
}

/// Immutable child id -> parent ids lookup, per child category.
#[derive(Clone, Debug, Default)]
pub struct ParentTable {
    links: BTreeMap<Category, BTreeMap<String, Vec<ParentLink>>>,
}

impl ParentTable {
    pub fn builder() -> ParentTableBuilder {
        ParentTableBuilder::default()
    }

    pub fn parents_of(&self, category: Category, id: &str) -> &[ParentLink] {
        self.links
            .get(&category)
            .and_then(|children| children.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.links.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct ParentTableBuilder {
    links: BTreeMap<Category, BTreeMap<String, Vec<ParentLink>>>,
}

impl ParentTableBuilder {
    /// Domestic city inside a state.
    pub fn us_city(mut self, city_id: impl Into<String>, state_id: impl Into<String>) -> Self {
        self.push(Category::UsCities, city_id.into(), ParentLink::new(Category::States, state_id));
        self
    }

    /// International city inside a country, and optionally a US state.
    pub fn world_city(
        mut self,
        city_id: impl Into<String>,
        country_id: impl Into<String>,
        state_id: Option<String>,
    ) -> Self {
        let city_id = city_id.into();
        self.push(
            Category::WorldCities,
            city_id.clone(),
            ParentLink::new(Category::Countries, country_id),
        );
        if let Some(state_id) = state_id {
            self.push(
                Category::WorldCities,
                city_id,
                ParentLink::new(Category::States, state_id),
            );
        }
        self
    }

    fn push(&mut self, category: Category, child: String, parent: ParentLink) {
        let parents = self
            .links
            .entry(category)
            .or_default()
            .entry(child)
            .or_default();
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    pub fn build(self) -> ParentTable {
        ParentTable { links: self.links }
    }
}

/// Derive visits on the parents of a city that is now visited.
///
/// Only creates parent records or revives tombstoned ones; a live
/// `visited`/`bucketList` parent is left exactly as it was. Does nothing
/// unless the child record is live and visited.
pub fn propagate(
    snapshot: &Snapshot,
    parents: &ParentTable,
    category: Category,
    id: &str,
    now: WallClock,
) -> Snapshot {
    let child_visited = snapshot
        .get(category, id)
        .is_some_and(|record| record.effective_status() == Status::Visited);
    if !category.is_city() || !child_visited {
        return snapshot.clone();
    }

    let mut next = snapshot.clone();
    for link in parents.parents_of(category, id) {
        let stronger_mark_exists = next
            .get(link.category, &link.id)
            .is_some_and(|record| record.effective_status().is_marked());
        if stronger_mark_exists {
            continue;
        }
        tracing::debug!(
            child_category = %category,
            child = id,
            parent_category = %link.category,
            parent = %link.id,
            "propagating visit to parent"
        );
        next.upsert(
            link.category,
            ItemRecord::new(link.id.clone(), Status::Visited, now),
        );
    }
    next
}
