// Wire types for the country directory.
//
// Field names follow the upstream JSON. Everything except the name,
// code, region, population, and flags is optional upstream and defaults
// to empty here so a sparse record still decodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub name: CountryNameResponse,
    pub cca3: String,
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, CurrencyResponse>>,
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    pub flags: FlagsResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryNameResponse {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagsResponse {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: Option<String>,
}
