//! Layer 1: Category schema
//!
//! Category: the closed set of tracked lists.
//! Status: unvisited, visited, bucketList.

use serde::{Deserialize, Serialize};

use super::error::{CoreError, InvalidCategory, InvalidStatus};

/// A tracked list. Wire names are camelCase and stable across releases;
/// older spellings are accepted as aliases when reading raw data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    #[serde(alias = "country")]
    Countries,
    #[serde(alias = "usStates")]
    States,
    #[serde(alias = "parks")]
    NationalParks,
    Museums,
    #[serde(alias = "skiAreas")]
    SkiResorts,
    #[serde(alias = "cities")]
    UsCities,
    #[serde(alias = "internationalCities")]
    WorldCities,
    MlbStadiums,
    NflStadiums,
    NbaArenas,
    NhlArenas,
    MlsStadiums,
    Fourteeners,
    SevenSummits,
    EightThousanders,
    ThemeParks,
    Zoos,
}

crate::enum_str! {
    impl Category {
        pub fn as_str(&self) -> &'static str;
        pub fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Countries => ["countries", "country"],
            States => ["states", "usStates"],
            NationalParks => ["nationalParks", "parks"],
            Museums => ["museums"],
            SkiResorts => ["skiResorts", "skiAreas"],
            UsCities => ["usCities", "cities"],
            WorldCities => ["worldCities", "internationalCities"],
            MlbStadiums => ["mlbStadiums"],
            NflStadiums => ["nflStadiums"],
            NbaArenas => ["nbaArenas"],
            NhlArenas => ["nhlArenas"],
            MlsStadiums => ["mlsStadiums"],
            Fourteeners => ["fourteeners"],
            SevenSummits => ["sevenSummits"],
            EightThousanders => ["eightThousanders"],
            ThemeParks => ["themeParks"],
            Zoos => ["zoos"],
        }
    }
}

impl Category {
    /// Resolve a raw key, accepting aliases. Legacy aggregate keys are not categories.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::parse_str(raw.trim()).ok_or_else(|| {
            InvalidCategory {
                raw: raw.to_string(),
            }
            .into()
        })
    }

    /// Canonical list of current categories, in display order.
    pub fn all() -> &'static [Category] {
        Self::ALL
    }

    /// City lists whose visits imply a visit to a containing state or country.
    pub fn is_city(self) -> bool {
        matches!(self, Category::UsCities | Category::WorldCities)
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::parse(s)
    }
}

/// Selection status of one place.
///
/// `Unvisited` is never stored as a live record: it is either absence or a
/// tombstone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Unvisited,
    Visited,
    BucketList,
}

crate::enum_str! {
    impl Status {
        pub fn as_str(&self) -> &'static str;
        fn parse_str(raw: &str) -> Option<Self>;
        variants {
            Unvisited => ["unvisited", "none"],
            Visited => ["visited"],
            BucketList => ["bucketList", "bucket_list", "bucket-list"],
        }
    }
}

impl Status {
    pub fn parse(raw: &str) -> Option<Self> {
        Self::parse_str(raw.trim())
    }

    /// A status that counts as a mark the user placed.
    pub fn is_marked(self) -> bool {
        !matches!(self, Status::Unvisited)
    }
}

impl std::str::FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s).ok_or_else(|| InvalidStatus { raw: s.to_string() }.into())
    }
}
