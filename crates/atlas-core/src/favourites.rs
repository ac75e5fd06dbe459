// ── Favourites reconciliation and toggling ──
//
// Favourites are stored by the backend with a handful of fields; the
// list view wants full countries. `reconcile` joins the two on the
// exact common name, falling back to a placeholder when the cache has
// no match.

use std::collections::HashMap;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cancel::run_cancellable;
use crate::error::CoreError;
use crate::gateway::FavouritesGateway;
use crate::model::{Country, DisplayCountry, FavouriteRecord, NewFavourite, PlaceholderCountry};

/// Pair each favourite with its cached country, in favourites order.
///
/// Matching is exact and case-sensitive on the common name. When the
/// directory holds two countries with the same name the first wins.
pub fn reconcile<'a>(favourites: &[FavouriteRecord], countries: &'a [Country]) -> Vec<DisplayCountry<'a>> {
    let mut by_name: HashMap<&str, &'a Country> = HashMap::with_capacity(countries.len());
    for country in countries {
        by_name.entry(country.name.common.as_str()).or_insert(country);
    }

    favourites
        .iter()
        .map(|fav| match by_name.get(fav.country_name.as_str()) {
            Some(&country) => DisplayCountry::Full(country),
            None => DisplayCountry::Placeholder(PlaceholderCountry::from(fav)),
        })
        .collect()
}

// ── Favourites list ─────────────────────────────────────────────────

/// The signed-in user's favourites as last fetched.
#[derive(Debug, Clone, Default)]
pub struct FavouritesView {
    records: Vec<FavouriteRecord>,
}

impl FavouritesView {
    pub async fn load<G: FavouritesGateway>(
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<Self, CoreError> {
        let records = run_cancellable(cancel, gateway.list())
            .await
            .inspect_err(|e| {
                if !e.is_cancelled() {
                    warn!(error = %e, "failed to load favourites");
                }
            })?;
        debug!(count = records.len(), "favourites loaded");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[FavouriteRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reconcile<'a>(&self, countries: &'a [Country]) -> Vec<DisplayCountry<'a>> {
        reconcile(&self.records, countries)
    }
}

// ── Per-country toggle ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FavouriteStatus {
    /// No existence check has completed yet.
    Unknown,
    Favourite,
    NotFavourite,
}

impl From<bool> for FavouriteStatus {
    fn from(is_favourite: bool) -> Self {
        if is_favourite {
            Self::Favourite
        } else {
            Self::NotFavourite
        }
    }
}

/// Favourite state for one country.
///
/// Every operation takes `&mut self`, so two operations on the same
/// country can never be in flight at once. The local status changes
/// only after the backend call succeeds; a failed or cancelled call
/// leaves it as it was.
#[derive(Debug, Clone)]
pub struct FavouriteToggle {
    country: NewFavourite,
    status: FavouriteStatus,
}

impl FavouriteToggle {
    /// Accepts a cached [`Country`] or a stored [`FavouriteRecord`].
    pub fn new(country: impl Into<NewFavourite>) -> Self {
        Self {
            country: country.into(),
            status: FavouriteStatus::Unknown,
        }
    }

    pub fn country_name(&self) -> &str {
        &self.country.country_name
    }

    pub fn status(&self) -> FavouriteStatus {
        self.status
    }

    /// Ask the backend whether the country is a favourite.
    pub async fn refresh<G: FavouritesGateway>(
        &mut self,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        let name = self.country.country_name.as_str();
        let exists = run_cancellable(cancel, gateway.exists(name))
            .await
            .inspect_err(|e| log_failure("check favourite", name, e))?;
        self.status = exists.into();
        Ok(exists)
    }

    /// Flip the favourite state. Returns the new state.
    pub async fn toggle<G: FavouritesGateway>(
        &mut self,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        let current = self.known(gateway, cancel).await?;
        self.apply(gateway, !current, cancel).await
    }

    /// Make the favourite state `desired`. No backend write is issued
    /// when it already is.
    pub async fn set<G: FavouritesGateway>(
        &mut self,
        gateway: &G,
        desired: bool,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        let current = self.known(gateway, cancel).await?;
        if current == desired {
            debug!(country = %self.country.country_name, desired, "favourite already in desired state");
            return Ok(current);
        }
        self.apply(gateway, desired, cancel).await
    }

    async fn known<G: FavouritesGateway>(
        &mut self,
        gateway: &G,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        match self.status {
            FavouriteStatus::Favourite => Ok(true),
            FavouriteStatus::NotFavourite => Ok(false),
            FavouriteStatus::Unknown => self.refresh(gateway, cancel).await,
        }
    }

    async fn apply<G: FavouritesGateway>(
        &mut self,
        gateway: &G,
        desired: bool,
        cancel: &CancellationToken,
    ) -> Result<bool, CoreError> {
        let name = self.country.country_name.as_str();
        if desired {
            run_cancellable(cancel, async { gateway.add(&self.country).await.map(|_| ()) })
                .await
                .inspect_err(|e| log_failure("add favourite", name, e))?;
        } else {
            run_cancellable(cancel, gateway.remove(name))
                .await
                .inspect_err(|e| log_failure("remove favourite", name, e))?;
        }
        debug!(country = %name, desired, "favourite updated");
        self.status = desired.into();
        Ok(desired)
    }
}

fn log_failure(action: &str, country: &str, err: &CoreError) {
    if err.is_cancelled() {
        debug!(country, "{action} cancelled");
    } else {
        warn!(country, error = %err, "failed to {action}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PLACEHOLDER_REGION;
    use crate::model::country::fixtures::{country, sample};

    fn record(id: i64, name: &str, code: &str) -> FavouriteRecord {
        FavouriteRecord {
            id,
            owner: None,
            country_name: name.into(),
            country_code: code.into(),
            country_flag: format!("https://flagcdn.com/w320/{}.png", code.to_lowercase()),
            created_at: Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
        }
    }

    #[derive(Default)]
    struct FakeFavourites {
        rows: Mutex<Vec<FavouriteRecord>>,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
        writes: AtomicUsize,
    }

    impl FakeFavourites {
        fn with(rows: Vec<FavouriteRecord>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Self::default()
            }
        }

        fn names(&self) -> Vec<String> {
            self.rows.lock().unwrap().iter().map(|r| r.country_name.clone()).collect()
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn down() -> CoreError {
            CoreError::NetworkFailure {
                message: "backend unreachable".into(),
            }
        }
    }

    impl FavouritesGateway for FakeFavourites {
        async fn list(&self) -> Result<Vec<FavouriteRecord>, CoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Self::down());
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn exists(&self, country_name: &str) -> Result<bool, CoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Self::down());
            }
            Ok(self.rows.lock().unwrap().iter().any(|r| r.country_name == country_name))
        }

        async fn add(&self, favourite: &NewFavourite) -> Result<FavouriteRecord, CoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::down());
            }
            let mut rows = self.rows.lock().unwrap();
            let id = i64::try_from(rows.len()).unwrap() + 1;
            let row = record(id, &favourite.country_name, &favourite.country_code);
            rows.push(row.clone());
            Ok(row)
        }

        async fn remove(&self, country_name: &str) -> Result<(), CoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::down());
            }
            self.rows.lock().unwrap().retain(|r| r.country_name != country_name);
            Ok(())
        }
    }

    // ── reconcile ──

    #[test]
    fn exact_match_uses_cached_country() {
        let countries = sample();
        let out = reconcile(&[record(1, "Japan", "JPN")], &countries);
        assert_eq!(out, vec![DisplayCountry::Full(&countries[2])]);
    }

    #[test]
    fn miss_becomes_placeholder() {
        let countries = sample();
        let out = reconcile(&[record(1, "Peru", "PER")], &countries);
        let DisplayCountry::Placeholder(p) = &out[0] else {
            panic!("expected placeholder, got {:?}", out[0]);
        };
        assert_eq!(p.population, 0);
        assert_eq!(p.region, PLACEHOLDER_REGION);
        assert_eq!(p.subregion, PLACEHOLDER_REGION);
        assert_eq!(p.code, "PER");
        assert_eq!(p.flags.png, "https://flagcdn.com/w320/per.png");
        assert_eq!(p.name.official, "Peru");
        assert!(p.currencies.contains_key("FAV"));
        assert!(out[0].is_placeholder());
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let countries = sample();
        let out = reconcile(&[record(1, "japan", "JPN")], &countries);
        assert!(out[0].is_placeholder());
    }

    #[test]
    fn favourites_order_wins_over_cache_order() {
        let countries = sample();
        let favs = [
            record(1, "Japan", "JPN"),
            record(2, "Peru", "PER"),
            record(3, "France", "FRA"),
        ];
        let out = reconcile(&favs, &countries);
        let names: Vec<&str> = out.iter().map(DisplayCountry::common_name).collect();
        assert_eq!(names, vec!["Japan", "Peru", "France"]);
    }

    #[test]
    fn empty_cache_gives_all_placeholders() {
        let out = reconcile(&[record(1, "France", "FRA")], &[]);
        assert!(out.iter().all(DisplayCountry::is_placeholder));
    }

    #[test]
    fn display_country_is_tagged() {
        let countries = sample();
        let out = reconcile(&[record(1, "France", "FRA"), record(2, "Peru", "PER")], &countries);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json[0]["kind"], "full");
        assert_eq!(json[0]["code"], "FRA");
        assert_eq!(json[1]["kind"], "placeholder");
        assert_eq!(json[1]["population"], 0);
    }

    // ── view ──

    #[tokio::test]
    async fn view_loads_and_reconciles() {
        let gw = FakeFavourites::with(vec![record(1, "Germany", "DEU")]);
        let countries = sample();
        let view = FavouritesView::load(&gw, &CancellationToken::new()).await.unwrap();
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.reconcile(&countries), vec![DisplayCountry::Full(&countries[1])]);
    }

    #[tokio::test]
    async fn view_load_failure_has_friendly_message() {
        let gw = FakeFavourites::default();
        gw.fail_reads.store(true, Ordering::SeqCst);
        let err = FavouritesView::load(&gw, &CancellationToken::new()).await.unwrap_err();
        assert_eq!(
            err.user_message("load favourites"),
            "Failed to load favourites. Please try again later."
        );
    }

    // ── toggle ──

    #[tokio::test]
    async fn toggle_adds_then_removes() {
        let gw = FakeFavourites::default();
        let token = CancellationToken::new();
        let mut toggle = FavouriteToggle::new(&country("Peru", "PER", "Americas", Some("Lima")));
        assert_eq!(toggle.status(), FavouriteStatus::Unknown);

        assert!(toggle.toggle(&gw, &token).await.unwrap());
        assert_eq!(toggle.status(), FavouriteStatus::Favourite);
        assert_eq!(gw.names(), vec!["Peru"]);

        assert!(!toggle.toggle(&gw, &token).await.unwrap());
        assert_eq!(toggle.status(), FavouriteStatus::NotFavourite);
        assert!(gw.names().is_empty());
    }

    #[tokio::test]
    async fn failed_toggle_keeps_prior_state() {
        let gw = FakeFavourites::with(vec![record(1, "France", "FRA")]);
        let token = CancellationToken::new();
        let mut toggle = FavouriteToggle::new(&sample()[0]);
        toggle.refresh(&gw, &token).await.unwrap();
        assert_eq!(toggle.status(), FavouriteStatus::Favourite);

        gw.fail_writes.store(true, Ordering::SeqCst);
        let err = toggle.toggle(&gw, &token).await.unwrap_err();

        assert!(matches!(err, CoreError::NetworkFailure { .. }));
        assert_eq!(toggle.status(), FavouriteStatus::Favourite);
        assert_eq!(gw.names(), vec!["France"]);
    }

    #[tokio::test]
    async fn failed_add_keeps_not_favourite() {
        let gw = FakeFavourites::default();
        let token = CancellationToken::new();
        let mut toggle = FavouriteToggle::new(&sample()[2]);
        toggle.refresh(&gw, &token).await.unwrap();
        assert_eq!(toggle.status(), FavouriteStatus::NotFavourite);

        gw.fail_writes.store(true, Ordering::SeqCst);
        let err = toggle.toggle(&gw, &token).await.unwrap_err();

        assert!(matches!(err, CoreError::NetworkFailure { .. }));
        assert_eq!(toggle.status(), FavouriteStatus::NotFavourite);
        assert_eq!(gw.writes(), 1);
        assert!(gw.names().is_empty());
    }

    #[tokio::test]
    async fn failed_existence_check_stays_unknown() {
        let gw = FakeFavourites::default();
        gw.fail_reads.store(true, Ordering::SeqCst);
        let mut toggle = FavouriteToggle::new(&sample()[0]);

        assert!(toggle.toggle(&gw, &CancellationToken::new()).await.is_err());
        assert_eq!(toggle.status(), FavouriteStatus::Unknown);
        assert_eq!(gw.writes(), 0);
    }

    #[tokio::test]
    async fn add_is_skipped_when_already_favourite() {
        let gw = FakeFavourites::with(vec![record(1, "France", "FRA")]);
        let mut toggle = FavouriteToggle::new(&sample()[0]);

        assert!(toggle.set(&gw, true, &CancellationToken::new()).await.unwrap());
        assert_eq!(gw.writes(), 0);
    }

    #[tokio::test]
    async fn remove_is_skipped_when_not_favourite() {
        let gw = FakeFavourites::default();
        let mut toggle = FavouriteToggle::new(&sample()[0]);

        assert!(!toggle.set(&gw, false, &CancellationToken::new()).await.unwrap());
        assert_eq!(gw.writes(), 0);
    }

    #[tokio::test]
    async fn cancelled_toggle_changes_nothing() {
        let gw = FakeFavourites::default();
        let token = CancellationToken::new();
        token.cancel();
        let mut toggle = FavouriteToggle::new(&sample()[0]);

        let err = toggle.toggle(&gw, &token).await.unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(toggle.status(), FavouriteStatus::Unknown);
        assert_eq!(gw.writes(), 0);
    }
}
