//! Per-category progress counts. Display only; tombstones are ignored.

use std::collections::BTreeMap;

use serde::Serialize;

use super::category::{Category, Status};
use super::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub visited: usize,
    pub bucket_list: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_visited: Option<f64>,
}

pub fn stats(snapshot: &Snapshot, totals: &BTreeMap<Category, usize>) -> Vec<CategoryStats> {
    Category::all()
        .iter()
        .map(|category| {
            let mut visited = 0;
            let mut bucket_list = 0;
            for item in snapshot.items(*category) {
                match item.effective_status() {
                    Status::Visited => visited += 1,
                    Status::BucketList => bucket_list += 1,
                    Status::Unvisited => {}
                }
            }
            let total = totals.get(category).copied();
            let percent_visited = total
                .filter(|total| *total > 0)
                .map(|total| (visited as f64 / total as f64 * 100.0).min(100.0));
            CategoryStats {
                category: *category,
                visited,
                bucket_list,
                total,
                percent_visited,
            }
        })
        .collect()
}
