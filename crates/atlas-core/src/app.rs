// ── Atlas facade ──
//
// Owns the country cache, the weather client, and (when a backend is
// configured) the session holder. Built once from an `AtlasConfig` and
// passed to whoever needs it; cloning shares the same state.

use std::future::Future;
use std::sync::Arc;

use atlas_api::{BackendClient, CountriesClient, WeatherClient};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{AtlasConfig, Credentials};
use crate::error::CoreError;
use crate::favourites::FavouritesView;
use crate::gateway::AuthedBackend;
use crate::model::{Country, User, Weather};
use crate::protected::ProtectedData;
use crate::session::SessionHolder;
use crate::store::{CacheState, CountryCache};
use crate::weather;

#[derive(Clone)]
pub struct Atlas {
    inner: Arc<AtlasInner>,
}

struct AtlasInner {
    config: AtlasConfig,
    cache: CountryCache<CountriesClient>,
    weather: WeatherClient,
    session: Option<SessionHolder<BackendClient>>,
}

impl Atlas {
    pub fn new(config: AtlasConfig) -> Result<Self, CoreError> {
        let transport = config.transport();
        let countries = CountriesClient::new(config.countries_url.as_str(), &transport)?;
        let weather = WeatherClient::new(
            config.weather_url.as_str(),
            config.weather_api_key.clone(),
            &transport,
        )?;
        let session = config
            .backend
            .as_ref()
            .map(|b| BackendClient::new(b.url.as_str(), b.anon_key.clone(), &transport))
            .transpose()?
            .map(SessionHolder::new);

        debug!(
            countries = %config.countries_url,
            backend = session.is_some(),
            weather_key = weather.has_api_key(),
            "atlas initialised"
        );

        Ok(Self {
            inner: Arc::new(AtlasInner {
                config,
                cache: CountryCache::new(countries),
                weather,
                session,
            }),
        })
    }

    /// Build, optionally sign in, run `f`, then sign out.
    ///
    /// Meant for single CLI invocations. Sign-out runs even when `f`
    /// fails; its own failure is only logged.
    pub async fn oneshot<F, Fut, T, E>(
        config: AtlasConfig,
        credentials: Option<Credentials>,
        cancel: &CancellationToken,
        f: F,
    ) -> Result<T, E>
    where
        F: FnOnce(Atlas) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<CoreError>,
    {
        let atlas = Atlas::new(config)?;
        if let Some(creds) = credentials {
            atlas.sign_in(&creds, cancel).await?;
        }
        let result = f(atlas.clone()).await;
        atlas.sign_out().await;
        result
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.inner.config
    }

    // ── Countries ────────────────────────────────────────────────────

    pub fn cache(&self) -> &CountryCache<CountriesClient> {
        &self.inner.cache
    }

    pub fn cache_state(&self) -> CacheState {
        self.inner.cache.state()
    }

    /// Load the directory if needed and return it.
    pub async fn countries(&self, cancel: &CancellationToken) -> Result<Arc<[Country]>, CoreError> {
        match self.inner.cache.load(cancel).await {
            CacheState::Loaded(list) => Ok(list),
            CacheState::Failed(message) => Err(CoreError::NetworkFailure { message }),
            CacheState::Idle | CacheState::Loading => Err(CoreError::Cancelled),
        }
    }

    /// Case-insensitive lookup by common name.
    pub async fn country(&self, name: &str, cancel: &CancellationToken) -> Result<Country, CoreError> {
        self.countries(cancel).await?;
        self.inner
            .cache
            .find_by_name(name)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "Country".into(),
                identifier: name.to_owned(),
            })
    }

    // ── Weather ──────────────────────────────────────────────────────

    pub async fn weather_for(
        &self,
        country: &Country,
        cancel: &CancellationToken,
    ) -> Result<Option<Weather>, CoreError> {
        weather::weather_for_country(&self.inner.weather, country, cancel).await
    }

    pub async fn weather_for_city(
        &self,
        city: &str,
        cancel: &CancellationToken,
    ) -> Result<Weather, CoreError> {
        weather::weather_for_city(&self.inner.weather, city, cancel).await
    }

    // ── Session ──────────────────────────────────────────────────────

    /// The session holder, or a configuration error when no backend is set.
    pub fn session(&self) -> Result<&SessionHolder<BackendClient>, CoreError> {
        self.inner.session.as_ref().ok_or_else(|| CoreError::Config {
            message: "no backend configured (set backend_url and backend_anon_key)".into(),
        })
    }

    pub async fn sign_in(
        &self,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<User, CoreError> {
        self.session()?
            .sign_in(&credentials.email, &credentials.password, cancel)
            .await
    }

    pub async fn sign_out(&self) {
        if let Some(session) = &self.inner.session {
            session.sign_out().await;
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.session.as_ref().and_then(SessionHolder::current_user)
    }

    // ── Gated data ───────────────────────────────────────────────────

    /// Backend bound to the current session, for favourites and
    /// protected data. Fails with `NotSignedIn` naming `action`.
    pub fn backend(&self, action: &str) -> Result<AuthedBackend<'_>, CoreError> {
        let holder = self.session()?;
        let session = holder.require(action)?;
        Ok(AuthedBackend::new(holder.auth(), session))
    }

    pub async fn favourites(&self, cancel: &CancellationToken) -> Result<FavouritesView, CoreError> {
        let backend = self.backend("list favourites")?;
        FavouritesView::load(&backend, cancel).await
    }

    pub fn protected(&self) -> Result<ProtectedData<AuthedBackend<'_>>, CoreError> {
        Ok(ProtectedData::new(self.backend("access protected data")?))
    }
}
