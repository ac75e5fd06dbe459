//! Configuration for the atlas CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `atlas_core::AtlasConfig`. The CLI layers its
//! `GlobalOpts` overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use atlas_core::{AtlasConfig, BackendConfig, Credentials};

/// Keyring service name for stored secrets.
pub const KEYRING_SERVICE: &str = "atlas";

/// Conventional variable for the weather key, checked after the
/// profile's own `weather_api_key_env`.
pub const WEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "ATLAS_CONFIG";

const EMAIL_ENV: &str = "ATLAS_EMAIL";
const PASSWORD_ENV: &str = "ATLAS_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} configured for profile '{profile}'")]
    NoCredentials { profile: String, what: &'static str },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named profile. Every field is optional; a blank profile talks to
/// the public country and weather services with no backend.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Country directory base URL override.
    pub countries_url: Option<String>,

    /// Weather service base URL override.
    pub weather_url: Option<String>,

    /// Weather API key (plaintext; prefer keyring or env var).
    pub weather_api_key: Option<String>,

    /// Environment variable name holding the weather API key.
    pub weather_api_key_env: Option<String>,

    /// Backend project URL.
    pub backend_url: Option<String>,

    /// Backend public (anon) key.
    pub backend_anon_key: Option<String>,

    /// Sign-in email for the backend.
    pub email: Option<String>,

    /// Sign-in password (plaintext; prefer keyring).
    pub password: Option<String>,

    /// Path to an extra CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `ATLAS_CONFIG` if set, otherwise the
/// platform config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "atlas", "atlas").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("atlas");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from a specific file, merged over defaults and under
/// `ATLAS_`-prefixed environment variables (`__` separates nesting,
/// e.g. `ATLAS_DEFAULTS__OUTPUT=json`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ATLAS_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Secrets that may live in the system keyring.
#[derive(Debug, Clone, Copy)]
pub enum SecretKind {
    Password,
    WeatherApiKey,
}

impl SecretKind {
    fn entry_name(self, profile_name: &str) -> String {
        match self {
            Self::Password => format!("{profile_name}/password"),
            Self::WeatherApiKey => format!("{profile_name}/weather-api-key"),
        }
    }
}

fn keyring_get(kind: SecretKind, profile_name: &str) -> Option<SecretString> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.entry_name(profile_name)).ok()?;
    entry.get_password().ok().map(SecretString::from)
}

/// Store a secret in the system keyring for `profile_name`.
pub fn store_secret(kind: SecretKind, profile_name: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.entry_name(profile_name))?;
    entry.set_password(secret)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve the weather API key. `None` is not an error: the rest of the
/// app works without weather.
///
/// Order: profile's `weather_api_key_env` → `OPENWEATHER_API_KEY` →
/// keyring → plaintext in config.
pub fn resolve_weather_key(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile-named env var
    if let Some(ref env_name) = profile.weather_api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Conventional env var
    if let Ok(val) = std::env::var(WEATHER_KEY_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(secret) = keyring_get(SecretKind::WeatherApiKey, profile_name) {
        return Some(secret);
    }

    // 4. Plaintext in config
    profile.weather_api_key.clone().map(SecretString::from)
}

/// Resolve backend sign-in credentials.
///
/// Email: profile → `ATLAS_EMAIL`. Password: `ATLAS_PASSWORD` → keyring
/// → plaintext in config.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var(EMAIL_ENV).ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
            what: "email",
        })?;

    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(Credentials {
            email,
            password: SecretString::from(pw),
        });
    }

    // 2. Keyring
    if let Some(password) = keyring_get(SecretKind::Password, profile_name) {
        return Ok(Credentials { email, password });
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok(Credentials {
            email,
            password: SecretString::from(pw.clone()),
        });
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        what: "password",
    })
}

// ── Translation to the core config ──────────────────────────────────

fn parse_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build an `AtlasConfig` from a profile, without CLI flag overrides.
///
/// A backend is configured only when both `backend_url` and
/// `backend_anon_key` are present; giving just one is an error.
pub fn profile_to_atlas_config(profile: &Profile, profile_name: &str) -> Result<AtlasConfig, ConfigError> {
    let mut cfg = AtlasConfig::with_defaults().map_err(|e| ConfigError::Validation {
        field: "defaults".into(),
        reason: e.to_string(),
    })?;

    if let Some(ref raw) = profile.countries_url {
        cfg.countries_url = parse_url("countries_url", raw)?;
    }
    if let Some(ref raw) = profile.weather_url {
        cfg.weather_url = parse_url("weather_url", raw)?;
    }

    cfg.backend = match (&profile.backend_url, &profile.backend_anon_key) {
        (Some(url), Some(key)) => Some(BackendConfig {
            url: parse_url("backend_url", url)?,
            anon_key: SecretString::from(key.clone()),
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(ConfigError::Validation {
                field: "backend_anon_key".into(),
                reason: "required when backend_url is set".into(),
            });
        }
        (None, Some(_)) => {
            return Err(ConfigError::Validation {
                field: "backend_url".into(),
                reason: "required when backend_anon_key is set".into(),
            });
        }
    };

    cfg.weather_api_key = resolve_weather_key(profile, profile_name);
    cfg.ca_cert.clone_from(&profile.ca_cert);
    cfg.timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));
    Ok(cfg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
default_profile = "home"

[defaults]
output = "json"

[profiles.home]
backend_url = "https://project.example.com"
backend_anon_key = "anon"
email = "ada@example.com"
password = "plain"
weather_api_key = "wkey"
timeout = 5
"#;

    #[test]
    fn loads_profiles_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("home"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");
        let home = &cfg.profiles["home"];
        assert_eq!(home.email.as_deref(), Some("ada@example.com"));
        assert_eq!(home.timeout, Some(5));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                backend_url: Some("https://project.example.com".into()),
                ..Profile::default()
            },
        );

        save_config_to(&cfg, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(
            loaded.profiles["default"].backend_url.as_deref(),
            Some("https://project.example.com")
        );
    }

    #[test]
    fn profile_translates_to_core_config() {
        let profile = Profile {
            backend_url: Some("https://project.example.com".into()),
            backend_anon_key: Some("anon".into()),
            timeout: Some(5),
            ..Profile::default()
        };
        let cfg = profile_to_atlas_config(&profile, "test").unwrap();

        let backend = cfg.backend.unwrap();
        assert_eq!(backend.url.host_str(), Some("project.example.com"));
        assert_eq!(backend.anon_key.expose_secret(), "anon");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.countries_url.host_str(), Some("restcountries.com"));
    }

    #[test]
    fn half_configured_backend_is_rejected() {
        let profile = Profile {
            backend_url: Some("https://project.example.com".into()),
            ..Profile::default()
        };
        let err = profile_to_atlas_config(&profile, "test").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "backend_anon_key"));
    }

    #[test]
    fn bad_url_is_rejected() {
        let profile = Profile {
            countries_url: Some("not a url".into()),
            ..Profile::default()
        };
        assert!(matches!(
            profile_to_atlas_config(&profile, "test"),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn plaintext_password_is_last_resort() {
        let profile = Profile {
            email: Some("ada@example.com".into()),
            password: Some("plain".into()),
            ..Profile::default()
        };
        // Uses a profile name no keyring will hold.
        let creds = resolve_credentials(&profile, "atlas-test-no-such-profile").unwrap();
        assert_eq!(creds.email, "ada@example.com");
    }

    #[test]
    fn missing_email_is_reported() {
        let profile = Profile::default();
        if std::env::var(EMAIL_ENV).is_ok() {
            return;
        }
        let err = resolve_credentials(&profile, "test").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { what: "email", .. }));
    }
}
