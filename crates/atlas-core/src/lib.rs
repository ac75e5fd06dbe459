//! Domain and state layer between `atlas-api` and the CLI.
//!
//! - **[`CountryCache`]**: load-once store for the country directory.
//!   State is published on a `watch` channel; concurrent loads share a
//!   single in-flight fetch.
//!
//! - **[`view`]**: pure projection of the directory through a
//!   [`ViewFilter`] (search term and region) into the visible list and
//!   the region facet.
//!
//! - **[`favourites`]**: joins the user's stored favourites with the
//!   cache ([`reconcile`]) and sequences add/remove per country
//!   ([`FavouriteToggle`]).
//!
//! - **[`SessionHolder`]**: the signed-in session, gating favourites
//!   and protected data.
//!
//! - **[`Atlas`]**: facade owning all of the above, constructed once
//!   from an [`AtlasConfig`].
//!
//! Every component is generic over a [`gateway`] trait so tests can
//! substitute in-memory fakes for the network.

pub mod app;
pub mod cancel;
pub mod config;
pub mod convert;
pub mod error;
pub mod favourites;
pub mod gateway;
pub mod model;
pub mod protected;
pub mod session;
pub mod store;
pub mod view;
pub mod weather;

// ── Primary re-exports ──────────────────────────────────────────────
pub use app::Atlas;
pub use config::{AtlasConfig, BackendConfig, Credentials};
pub use error::{CoreError, PERMISSION_DENIED_MESSAGE};
pub use favourites::{FavouriteStatus, FavouriteToggle, FavouritesView, reconcile};
pub use gateway::{
    AuthGateway, AuthedBackend, CountryGateway, FavouritesGateway, ProtectedDataGateway,
    WeatherGateway,
};
pub use protected::ProtectedData;
pub use session::SessionHolder;
pub use store::{CacheState, CountryCache};
pub use view::{CountryView, ViewFilter, project};

pub use model::{
    Condition, Country, CountryName, Currency, DisplayCountry, FavouriteRecord, Flags,
    NewFavourite, NewProtectedRecord, PLACEHOLDER_REGION, PlaceholderCountry, ProtectedRecord,
    User, Weather,
};
