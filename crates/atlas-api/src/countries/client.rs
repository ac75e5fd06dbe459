// Async HTTP client for the public country directory.
//
// Base path: /v3.1/
// Auth: none

use tracing::debug;
use url::Url;

use super::types::CountryResponse;
use crate::error::Error;
use crate::transport::{self, TransportConfig};

/// Public directory endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/";

/// The `all` endpoint refuses unfiltered requests, so the fields the
/// domain model needs are always listed explicitly.
const ALL_FIELDS: &str =
    "name,cca3,region,subregion,capital,population,currencies,languages,flags";

/// Async client for the country directory.
pub struct CountriesClient {
    http: reqwest::Client,
    base_url: Url,
    transport: TransportConfig,
}

impl CountriesClient {
    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: transport::normalize_base_url(base_url)?,
            transport: transport.clone(),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: transport::normalize_base_url(base_url)?,
            transport: TransportConfig::default(),
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the complete country directory in one request.
    pub async fn list_all(&self) -> Result<Vec<CountryResponse>, Error> {
        let url = self.base_url.join("all")?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .query(&[("fields", ALL_FIELDS)])
            .send()
            .await
            .map_err(|e| transport::classify_send_error(e, self.transport.timeout))?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            });
        }

        let countries: Vec<CountryResponse> = transport::decode_body(body)?;
        debug!(count = countries.len(), "decoded country directory");
        Ok(countries)
    }
}
