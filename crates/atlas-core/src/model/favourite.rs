// ── Favourite domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::country::Country;

/// A user-scoped saved reference to a country. The backend is
/// authoritative for existence; records are never invented locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteRecord {
    /// Backend-assigned row id.
    pub id: i64,
    /// Owning user, when the backend exposes it.
    pub owner: Option<Uuid>,
    pub country_name: String,
    pub country_code: String,
    /// Flag image URL captured when the favourite was added.
    pub country_flag: String,
    pub created_at: DateTime<Utc>,
}

/// Fields sent when adding a favourite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFavourite {
    pub country_name: String,
    pub country_code: String,
    pub country_flag: String,
}

impl From<&Country> for NewFavourite {
    fn from(country: &Country) -> Self {
        Self {
            country_name: country.name.common.clone(),
            country_code: country.code.clone(),
            country_flag: country.flags.png.clone(),
        }
    }
}

impl From<&FavouriteRecord> for NewFavourite {
    fn from(record: &FavouriteRecord) -> Self {
        Self {
            country_name: record.country_name.clone(),
            country_code: record.country_code.clone(),
            country_flag: record.country_flag.clone(),
        }
    }
}
