// ── API-to-domain type conversions ──
//
// Bridges raw `atlas_api` wire types into canonical `atlas_core::model`
// types. Missing optional upstream data becomes empty collections so
// the rest of the crate never deals with `Option<Vec<_>>`.

use std::collections::HashSet;

use atlas_api::Session;
use atlas_api::backend_types::{FavouriteRow, NewFavouriteRow, NewProtectedRow, ProtectedRow, UserResponse};
use atlas_api::country_types::CountryResponse;
use atlas_api::weather_types::WeatherResponse;
use tracing::warn;

use crate::model::{
    Condition, Country, CountryName, Currency, FavouriteRecord, Flags, NewFavourite,
    NewProtectedRecord, ProtectedRecord, User, Weather,
};

// ── Countries ───────────────────────────────────────────────────────

impl From<CountryResponse> for Country {
    fn from(r: CountryResponse) -> Self {
        Self {
            name: CountryName {
                common: r.name.common,
                official: r.name.official,
            },
            code: r.cca3,
            region: r.region,
            subregion: r.subregion.filter(|s| !s.is_empty()),
            capitals: r.capital.unwrap_or_default(),
            population: r.population,
            currencies: r
                .currencies
                .unwrap_or_default()
                .into_iter()
                .map(|(code, c)| {
                    (
                        code,
                        Currency {
                            name: c.name,
                            symbol: c.symbol,
                        },
                    )
                })
                .collect(),
            languages: r.languages.unwrap_or_default(),
            flags: Flags {
                png: r.flags.png,
                svg: r.flags.svg,
                alt: r.flags.alt,
            },
        }
    }
}

/// Keep upstream order and drop any country whose alpha-3 code was
/// already seen.
pub fn dedupe_by_code(countries: Vec<Country>) -> Vec<Country> {
    let mut seen = HashSet::with_capacity(countries.len());
    countries
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.code.clone());
            if !fresh {
                warn!(code = %c.code, name = %c.name.common, "duplicate country code, keeping first");
            }
            fresh
        })
        .collect()
}

// ── Weather ─────────────────────────────────────────────────────────

/// Weather responses do not echo the query reliably, so the city
/// asked for is carried alongside.
pub fn weather_from_response(city: &str, r: WeatherResponse) -> Weather {
    Weather {
        city: city.to_owned(),
        condition: r.weather.into_iter().next().map(|c| Condition {
            main: c.main,
            description: c.description,
            icon: c.icon,
        }),
        temperature_c: r.main.temp,
        feels_like_c: r.main.feels_like,
        humidity_pct: r.main.humidity,
        pressure_hpa: r.main.pressure,
        wind_speed_ms: r.wind.speed,
    }
}

// ── Backend rows ────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(r: UserResponse) -> Self {
        Self {
            id: r.id,
            email: r.email,
        }
    }
}

impl From<&Session> for User {
    fn from(s: &Session) -> Self {
        s.user.clone().into()
    }
}

impl From<FavouriteRow> for FavouriteRecord {
    fn from(r: FavouriteRow) -> Self {
        Self {
            id: r.id,
            owner: r.user_id,
            country_name: r.country_name,
            country_code: r.country_code,
            country_flag: r.country_flag,
            created_at: r.created_at,
        }
    }
}

impl From<&NewFavourite> for NewFavouriteRow {
    fn from(f: &NewFavourite) -> Self {
        Self {
            country_name: f.country_name.clone(),
            country_code: f.country_code.clone(),
            country_flag: f.country_flag.clone(),
        }
    }
}

impl From<ProtectedRow> for ProtectedRecord {
    fn from(r: ProtectedRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            is_active: r.is_active,
            owner: r.user_id,
            created_at: r.created_at,
        }
    }
}

impl From<&NewProtectedRecord> for NewProtectedRow {
    fn from(r: &NewProtectedRecord) -> Self {
        Self {
            name: r.name().to_owned(),
            description: r.description().to_owned(),
            is_active: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw(common: &str, code: &str) -> CountryResponse {
        serde_json::from_value(json!({
            "name": { "common": common, "official": format!("Republic of {common}") },
            "cca3": code,
            "region": "Europe",
            "flags": { "png": "p.png", "svg": "s.svg" }
        }))
        .unwrap()
    }

    #[test]
    fn sparse_record_gets_empty_collections() {
        let c = Country::from(raw("Atlantis", "ATL"));
        assert!(c.capitals.is_empty());
        assert!(c.currencies.is_empty());
        assert!(c.languages.is_empty());
        assert_eq!(c.subregion, None);
        assert_eq!(c.population, 0);
    }

    #[test]
    fn duplicate_codes_keep_first() {
        let list = dedupe_by_code(
            vec![raw("France", "FRA"), raw("Germany", "DEU"), raw("France Again", "FRA")]
                .into_iter()
                .map(Country::from)
                .collect(),
        );
        let names: Vec<&str> = list.iter().map(|c| c.name.common.as_str()).collect();
        assert_eq!(names, vec!["France", "Germany"]);
    }

    #[test]
    fn weather_takes_first_condition() {
        let resp: WeatherResponse = serde_json::from_value(json!({
            "weather": [
                { "main": "Rain", "description": "light rain", "icon": "10d" },
                { "main": "Mist", "description": "mist", "icon": "50d" }
            ],
            "main": { "temp": 11.2, "feels_like": 10.1, "humidity": 90, "pressure": 1002 },
            "wind": { "speed": 5.0 }
        }))
        .unwrap();
        let w = weather_from_response("London", resp);
        assert_eq!(w.city, "London");
        assert_eq!(w.condition.unwrap().main, "Rain");
        assert_eq!(w.humidity_pct, 90);
    }

    #[test]
    fn new_protected_rows_are_active() {
        let rec = NewProtectedRecord::new("alpha", "first").unwrap();
        let row = NewProtectedRow::from(&rec);
        assert!(row.is_active);
        assert_eq!(row.name, "alpha");
    }
}
