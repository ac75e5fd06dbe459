// ── Gateway traits ──
//
// The seams between domain logic and the network. The cache, the
// favourites reconciler, and the session holder are generic over these
// so tests drive them with in-memory fakes; the `atlas-api` clients
// implement them for real use.

use std::future::Future;

use atlas_api::{BackendClient, CountriesClient, Session, WeatherClient};
use atlas_api::backend_types::{NewFavouriteRow, NewProtectedRow};
use secrecy::SecretString;

use crate::convert;
use crate::error::CoreError;
use crate::model::{
    Country, FavouriteRecord, NewFavourite, NewProtectedRecord, ProtectedRecord, User, Weather,
};

/// Source of the full country directory.
pub trait CountryGateway: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Country>, CoreError>> + Send;
}

/// Current-weather lookup by city name.
pub trait WeatherGateway: Send + Sync {
    fn current(&self, city: &str) -> impl Future<Output = Result<Weather, CoreError>> + Send;
}

/// The signed-in user's favourites. Implementations are already scoped
/// to one session.
pub trait FavouritesGateway: Send + Sync {
    /// Oldest first.
    fn list(&self) -> impl Future<Output = Result<Vec<FavouriteRecord>, CoreError>> + Send;

    fn exists(&self, country_name: &str) -> impl Future<Output = Result<bool, CoreError>> + Send;

    fn add(
        &self,
        favourite: &NewFavourite,
    ) -> impl Future<Output = Result<FavouriteRecord, CoreError>> + Send;

    fn remove(&self, country_name: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// The signed-in user's protected data rows.
pub trait ProtectedDataGateway: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<ProtectedRecord>, CoreError>> + Send;

    fn create(
        &self,
        record: &NewProtectedRecord,
    ) -> impl Future<Output = Result<Vec<ProtectedRecord>, CoreError>> + Send;
}

/// Password sign-in against the backend.
pub trait AuthGateway: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn sign_out(&self, session: &Session) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn current_user(&self, session: &Session)
    -> impl Future<Output = Result<User, CoreError>> + Send;
}

// ── atlas-api implementations ───────────────────────────────────────

impl CountryGateway for CountriesClient {
    async fn fetch_all(&self) -> Result<Vec<Country>, CoreError> {
        let raw = self.list_all().await?;
        Ok(raw.into_iter().map(Country::from).collect())
    }
}

impl WeatherGateway for WeatherClient {
    async fn current(&self, city: &str) -> Result<Weather, CoreError> {
        let raw = self.current_by_city(city).await?;
        Ok(convert::weather_from_response(city, raw))
    }
}

impl AuthGateway for BackendClient {
    async fn sign_in(&self, email: &str, password: &SecretString) -> Result<Session, CoreError> {
        Ok(self.sign_in_with_password(email, password).await?)
    }

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError> {
        Ok(BackendClient::sign_out(self, session).await?)
    }

    async fn current_user(&self, session: &Session) -> Result<User, CoreError> {
        Ok(BackendClient::current_user(self, session).await?.into())
    }
}

/// A backend client bound to one signed-in session.
pub struct AuthedBackend<'a> {
    client: &'a BackendClient,
    session: Session,
}

impl<'a> AuthedBackend<'a> {
    pub fn new(client: &'a BackendClient, session: Session) -> Self {
        Self { client, session }
    }
}

impl FavouritesGateway for AuthedBackend<'_> {
    async fn list(&self) -> Result<Vec<FavouriteRecord>, CoreError> {
        let rows = self.client.list_favourites(&self.session).await?;
        Ok(rows.into_iter().map(FavouriteRecord::from).collect())
    }

    async fn exists(&self, country_name: &str) -> Result<bool, CoreError> {
        Ok(self.client.favourite_exists(&self.session, country_name).await?)
    }

    async fn add(&self, favourite: &NewFavourite) -> Result<FavouriteRecord, CoreError> {
        let row = NewFavouriteRow::from(favourite);
        Ok(self.client.insert_favourite(&self.session, &row).await?.into())
    }

    async fn remove(&self, country_name: &str) -> Result<(), CoreError> {
        Ok(self.client.delete_favourite(&self.session, country_name).await?)
    }
}

impl ProtectedDataGateway for AuthedBackend<'_> {
    async fn list(&self) -> Result<Vec<ProtectedRecord>, CoreError> {
        let rows = self.client.list_protected(&self.session).await?;
        Ok(rows.into_iter().map(ProtectedRecord::from).collect())
    }

    async fn create(&self, record: &NewProtectedRecord) -> Result<Vec<ProtectedRecord>, CoreError> {
        let row = NewProtectedRow::from(record);
        let rows = self.client.insert_protected(&self.session, &row).await?;
        Ok(rows.into_iter().map(ProtectedRecord::from).collect())
    }
}
