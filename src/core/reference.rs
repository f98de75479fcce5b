//! Reference data feed: static place facts, read once per session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::error::{CoreError, InvalidReference};
use super::propagate::ParentTable;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsCityRef {
    pub id: String,
    pub state: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldCityRef {
    pub id: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferenceData {
    pub us_cities: Vec<UsCityRef>,
    pub world_cities: Vec<WorldCityRef>,
    /// Number of places per category; statistics only.
    pub totals: BTreeMap<Category, usize>,
}

impl ReferenceData {
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| {
            InvalidReference {
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn parent_table(&self) -> ParentTable {
        let mut builder = ParentTable::builder();
        for city in &self.us_cities {
            builder = builder.us_city(city.id.clone(), city.state.clone());
        }
        for city in &self.world_cities {
            builder = builder.world_city(city.id.clone(), city.country.clone(), city.state.clone());
        }
        builder.build()
    }
}
