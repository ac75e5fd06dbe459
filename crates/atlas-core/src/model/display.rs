// ── Display records for the favourites view ──
//
// A favourite is shown either as the full cached country or as a
// placeholder built from the favourite's own stored fields. The two
// shapes are distinct variants so consumers match on the tag instead
// of probing for fields.

use std::collections::BTreeMap;

use serde::Serialize;

use super::country::{Country, CountryName, Currency, Flags};
use super::favourite::FavouriteRecord;

/// Region and subregion given to placeholder records.
pub const PLACEHOLDER_REGION: &str = "Favorite";

const PLACEHOLDER_CAPITAL: &str = "Favourite";
const PLACEHOLDER_CODE: &str = "FAV";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayCountry<'a> {
    /// The favourite matched a cached country.
    Full(&'a Country),
    /// No cached country matched; built from the favourite record alone.
    Placeholder(PlaceholderCountry),
}

/// Stand-in for a country the cache does not (yet) hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderCountry {
    pub name: CountryName,
    pub code: String,
    pub region: String,
    pub subregion: String,
    pub capitals: Vec<String>,
    pub population: u64,
    pub currencies: BTreeMap<String, Currency>,
    pub languages: BTreeMap<String, String>,
    pub flags: Flags,
}

impl From<&FavouriteRecord> for PlaceholderCountry {
    fn from(fav: &FavouriteRecord) -> Self {
        Self {
            name: CountryName {
                common: fav.country_name.clone(),
                official: fav.country_name.clone(),
            },
            code: fav.country_code.clone(),
            region: PLACEHOLDER_REGION.into(),
            subregion: PLACEHOLDER_REGION.into(),
            capitals: vec![PLACEHOLDER_CAPITAL.into()],
            population: 0,
            currencies: BTreeMap::from([(
                PLACEHOLDER_CODE.to_owned(),
                Currency {
                    name: "Favourite Currency".into(),
                    symbol: Some(PLACEHOLDER_CODE.into()),
                },
            )]),
            languages: BTreeMap::from([(
                PLACEHOLDER_CODE.to_owned(),
                "Favourite Language".to_owned(),
            )]),
            flags: Flags {
                png: fav.country_flag.clone(),
                svg: fav.country_flag.clone(),
                alt: None,
            },
        }
    }
}

impl DisplayCountry<'_> {
    pub fn common_name(&self) -> &str {
        match self {
            Self::Full(c) => &c.name.common,
            Self::Placeholder(p) => &p.name.common,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Full(c) => &c.code,
            Self::Placeholder(p) => &p.code,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            Self::Full(c) => &c.region,
            Self::Placeholder(p) => &p.region,
        }
    }

    pub fn population(&self) -> u64 {
        match self {
            Self::Full(c) => c.population,
            Self::Placeholder(p) => p.population,
        }
    }

    pub fn first_capital(&self) -> Option<&str> {
        match self {
            Self::Full(c) => c.first_capital(),
            Self::Placeholder(p) => p.capitals.first().map(String::as_str),
        }
    }

    pub fn flag_png(&self) -> &str {
        match self {
            Self::Full(c) => &c.flags.png,
            Self::Placeholder(p) => &p.flags.png,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}
