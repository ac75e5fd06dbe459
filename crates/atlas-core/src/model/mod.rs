// ── Domain model ──
//
// Canonical types consumed by the cache, projector, reconciler, and
// the presentation layer. Wire types from `atlas-api` never leak past
// `convert`.

pub mod country;
pub mod display;
pub mod favourite;
pub mod protected;
pub mod user;
pub mod weather;

pub use country::{Country, CountryName, Currency, Flags};
pub use display::{DisplayCountry, PLACEHOLDER_REGION, PlaceholderCountry};
pub use favourite::{FavouriteRecord, NewFavourite};
pub use protected::{NewProtectedRecord, ProtectedRecord};
pub use user::User;
pub use weather::{Condition, Weather};
