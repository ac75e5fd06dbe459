// ── Runtime configuration ──
//
// Describes which upstream services to talk to and how. Carries
// credentials and connection tuning but never touches disk; the CLI
// builds an `AtlasConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// Connection settings for every upstream the facade talks to.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Country directory base URL.
    pub countries_url: Url,
    /// Weather service base URL.
    pub weather_url: Url,
    /// Weather API key. Lookups fail with a configuration error when unset.
    pub weather_api_key: Option<SecretString>,
    /// Backend connection. Favourites, protected data, and sign-in are
    /// unavailable without one.
    pub backend: Option<BackendConfig>,
    /// Extra CA certificate to trust (PEM).
    pub ca_cert: Option<PathBuf>,
    /// Per-request timeout.
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project root, e.g. `https://xyz.supabase.co`.
    pub url: Url,
    /// Public project key sent as `apikey`.
    pub anon_key: SecretString,
}

/// Email/password pair for backend sign-in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl AtlasConfig {
    /// Config pointing at the public country and weather services, with
    /// no backend and no weather key.
    pub fn with_defaults() -> Result<Self, CoreError> {
        Ok(Self {
            countries_url: parse_url(atlas_api::countries::DEFAULT_BASE_URL)?,
            weather_url: parse_url(atlas_api::weather::DEFAULT_BASE_URL)?,
            weather_api_key: None,
            backend: None,
            ca_cert: None,
            timeout: Duration::from_secs(30),
        })
    }

    pub(crate) fn transport(&self) -> atlas_api::TransportConfig {
        let tls = self
            .ca_cert
            .clone()
            .map_or(atlas_api::TlsMode::System, atlas_api::TlsMode::CustomCa);
        atlas_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

/// Parse a configured URL, reporting failures as configuration errors.
pub fn parse_url(raw: &str) -> Result<Url, CoreError> {
    Url::parse(raw).map_err(|e| CoreError::Config {
        message: format!("invalid URL '{raw}': {e}"),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_services() {
        let cfg = AtlasConfig::with_defaults().unwrap();
        assert_eq!(cfg.countries_url.host_str(), Some("restcountries.com"));
        assert_eq!(cfg.weather_url.host_str(), Some("api.openweathermap.org"));
        assert!(cfg.backend.is_none());
        assert!(cfg.weather_api_key.is_none());
    }

    #[test]
    fn bad_url_is_config_error() {
        assert!(matches!(parse_url("not a url"), Err(CoreError::Config { .. })));
    }
}
