//! Layer 3: Legacy aggregate categories
//!
//! Older builds kept a single bucket for several of today's lists. Each
//! legacy item is reclassified into a *set* of current categories: empty
//! means the item has no home anymore, more than one means fan-out.

use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;

use super::category::Category;

/// Peaks at or above this height in the US belong to the fourteeners list.
pub const FOURTEENER_MIN_FT: f64 = 14_000.0;
/// 8,000 m expressed in feet, the unit legacy data used.
pub const EIGHT_THOUSANDER_MIN_FT: f64 = 26_247.0;

const DOMESTIC_COUNTRY_CODES: &[&str] = &["US", "USA"];

/// Continental high points, keyed by legacy mountain id.
const SEVEN_SUMMIT_IDS: &[&str] = &[
    "everest",
    "aconcagua",
    "denali",
    "kilimanjaro",
    "elbrus",
    "vinson",
    "puncak-jaya",
    "kosciuszko",
];

/// Sport tag -> league list.
const SPORT_TARGETS: &[(&str, Category)] = &[
    ("baseball", Category::MlbStadiums),
    ("football", Category::NflStadiums),
    ("basketball", Category::NbaArenas),
    ("hockey", Category::NhlArenas),
    ("soccer", Category::MlsStadiums),
];

/// Obsolete aggregate buckets that must be fanned out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LegacyCategory {
    Stadiums,
    Mountains,
}

crate::enum_str! {
    impl LegacyCategory {
        pub fn as_str(&self) -> &'static str;
        pub fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Stadiums => ["stadiums"],
            Mountains => ["mountains"],
        }
    }
}

/// Target set for one legacy item.
pub type Targets = BTreeSet<Category>;

/// A legacy item whose classification key cannot be read.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClassifyError {
    #[error("legacy item is not an object")]
    NotAnObject,
    #[error("legacy item is missing `{0}`")]
    MissingField(&'static str),
    #[error("legacy item field `{field}` has unusable value {raw}")]
    InvalidField { field: &'static str, raw: String },
}

impl LegacyCategory {
    /// Every current category the legacy item belongs to.
    pub fn classify(self, item: &Value) -> Result<Targets, ClassifyError> {
        match self {
            LegacyCategory::Stadiums => classify_stadium(item),
            LegacyCategory::Mountains => classify_mountain(item),
        }
    }
}

fn classify_stadium(item: &Value) -> Result<Targets, ClassifyError> {
    let object = item.as_object().ok_or(ClassifyError::NotAnObject)?;
    let raw = object
        .get("sport")
        .ok_or(ClassifyError::MissingField("sport"))?;
    let sports = raw.as_str().ok_or_else(|| ClassifyError::InvalidField {
        field: "sport",
        raw: raw.to_string(),
    })?;

    // Shared venues were tagged like "Basketball/Hockey".
    let targets = sports
        .split(['/', ',', '&'])
        .map(|tag| tag.trim().to_ascii_lowercase())
        .filter_map(|tag| {
            SPORT_TARGETS
                .iter()
                .find(|(sport, _)| *sport == tag)
                .map(|(_, category)| *category)
        })
        .collect();
    Ok(targets)
}

fn classify_mountain(item: &Value) -> Result<Targets, ClassifyError> {
    let object = item.as_object().ok_or(ClassifyError::NotAnObject)?;
    let raw_elevation = object
        .get("elevation")
        .or_else(|| object.get("elevationFt"))
        .ok_or(ClassifyError::MissingField("elevation"))?;
    let elevation = parse_elevation(raw_elevation).ok_or_else(|| ClassifyError::InvalidField {
        field: "elevation",
        raw: raw_elevation.to_string(),
    })?;
    let country = object
        .get("country")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    let id = object.get("id").and_then(Value::as_str).unwrap_or_default();

    let mut targets = Targets::new();
    let domestic = DOMESTIC_COUNTRY_CODES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(country));
    if domestic && elevation >= FOURTEENER_MIN_FT {
        targets.insert(Category::Fourteeners);
    }
    if elevation >= EIGHT_THOUSANDER_MIN_FT {
        targets.insert(Category::EightThousanders);
    }
    if SEVEN_SUMMIT_IDS.contains(&id) {
        targets.insert(Category::SevenSummits);
    }
    Ok(targets)
}

/// Elevation in feet; old builds wrote numbers or strings like "14,505".
fn parse_elevation(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}
