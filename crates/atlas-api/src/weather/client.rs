// Async HTTP client for the current-weather endpoint.
//
// Base path: /data/2.5/
// Auth: `appid` query parameter (never logged)

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use super::types::{WeatherErrorResponse, WeatherResponse};
use crate::error::Error;
use crate::transport::{self, TransportConfig};

/// Public weather endpoint used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Large (2x) icon URL for a condition icon code such as `"04d"`.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

/// Async client for the weather lookup.
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    transport: TransportConfig,
}

impl WeatherClient {
    /// Build a client from a base URL, optional API key, and transport config.
    ///
    /// A missing key is not an error here; lookups fail with
    /// [`Error::MissingApiKey`] so the rest of the app keeps working.
    pub fn new(
        base_url: &str,
        api_key: Option<SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: transport::normalize_base_url(base_url)?,
            api_key,
            transport: transport.clone(),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        api_key: Option<SecretString>,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: transport::normalize_base_url(base_url)?,
            api_key,
            transport: TransportConfig::default(),
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions for a city, metric units.
    pub async fn current_by_city(&self, city: &str) -> Result<WeatherResponse, Error> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(Error::MissingApiKey { service: "weather" })?;

        let url = self.base_url.join("weather")?;
        debug!(%city, "GET {url}");

        let resp = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| transport::classify_send_error(e, self.transport.timeout))?;

        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return transport::decode_body(body);
        }

        let message = serde_json::from_str::<WeatherErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.to_string());
        Err(Error::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_uses_large_variant() {
        assert_eq!(
            icon_url("04d"),
            "https://openweathermap.org/img/wn/04d@2x.png"
        );
    }
}
