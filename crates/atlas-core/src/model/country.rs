// ── Country domain type ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry of the country directory. Immutable once fetched.
///
/// Identity is the common name plus the alpha-3 `code`; the cache
/// guarantees codes are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    /// ISO 3166-1 alpha-3 code (e.g. `"FRA"`).
    pub code: String,
    pub region: String,
    pub subregion: Option<String>,
    /// Capital cities in upstream order; the first one is "the" capital.
    pub capitals: Vec<String>,
    pub population: u64,
    /// Currency code -> currency.
    pub currencies: BTreeMap<String, Currency>,
    /// Language code -> language name.
    pub languages: BTreeMap<String, String>,
    pub flags: Flags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub png: String,
    pub svg: String,
    pub alt: Option<String>,
}

impl Country {
    pub fn first_capital(&self) -> Option<&str> {
        self.capitals.first().map(String::as_str)
    }

    /// Case-insensitive comparison against the common name.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.common.to_lowercase() == name.to_lowercase()
    }

    /// Alt text for the flag image, synthesized when upstream has none.
    pub fn flag_alt(&self) -> String {
        self.flags
            .alt
            .clone()
            .unwrap_or_else(|| format!("Flag of {}", self.name.common))
    }

    /// `"Euro (€) [EUR], ..."`, or `"None"` when the country has no currency.
    pub fn currency_summary(&self) -> String {
        if self.currencies.is_empty() {
            return "None".into();
        }
        self.currencies
            .iter()
            .map(|(code, c)| match &c.symbol {
                Some(symbol) => format!("{} ({symbol}) [{code}]", c.name),
                None => format!("{} [{code}]", c.name),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn language_summary(&self) -> String {
        if self.languages.is_empty() {
            return "None".into();
        }
        self.languages
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal country for tests; fields not given are plausible defaults.
    pub(crate) fn country(common: &str, code: &str, region: &str, capital: Option<&str>) -> Country {
        Country {
            name: CountryName {
                common: common.into(),
                official: format!("Official {common}"),
            },
            code: code.into(),
            region: region.into(),
            subregion: None,
            capitals: capital.map(|c| vec![c.to_owned()]).unwrap_or_default(),
            population: 1_000_000,
            currencies: BTreeMap::new(),
            languages: BTreeMap::new(),
            flags: Flags {
                png: format!("https://flagcdn.com/w320/{}.png", code.to_lowercase()),
                svg: format!("https://flagcdn.com/{}.svg", code.to_lowercase()),
                alt: None,
            },
        }
    }

    /// France, Germany, Japan in that order.
    pub(crate) fn sample() -> Vec<Country> {
        vec![
            country("France", "FRA", "Europe", Some("Paris")),
            country("Germany", "DEU", "Europe", Some("Berlin")),
            country("Japan", "JPN", "Asia", Some("Tokyo")),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::country;
    use super::*;

    #[test]
    fn currency_summary_formats_each_entry() {
        let mut c = country("Switzerland", "CHE", "Europe", Some("Bern"));
        assert_eq!(c.currency_summary(), "None");

        c.currencies.insert(
            "CHF".into(),
            Currency {
                name: "Swiss franc".into(),
                symbol: Some("Fr.".into()),
            },
        );
        c.currencies.insert(
            "XXX".into(),
            Currency {
                name: "No symbol".into(),
                symbol: None,
            },
        );
        assert_eq!(c.currency_summary(), "Swiss franc (Fr.) [CHF], No symbol [XXX]");
    }

    #[test]
    fn flag_alt_falls_back_to_name() {
        let mut c = country("Peru", "PER", "Americas", Some("Lima"));
        assert_eq!(c.flag_alt(), "Flag of Peru");
        c.flags.alt = Some("Red, white, red".into());
        assert_eq!(c.flag_alt(), "Red, white, red");
    }

    #[test]
    fn name_lookup_ignores_case() {
        let c = country("Côte d'Ivoire", "CIV", "Africa", None);
        assert!(c.has_name("côte d'ivoire"));
        assert!(!c.has_name("ivory coast"));
        assert_eq!(c.first_capital(), None);
    }
}
