//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use atlas_config::ConfigError;
use atlas_core::{CoreError, PERMISSION_DENIED_MESSAGE};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const CANCELLED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    /// Already phrased for the user (e.g. "Failed to load countries. ...").
    #[error("{message}")]
    #[diagnostic(
        code(atlas::network),
        help("Check your network connection, or raise --timeout, and try again.")
    )]
    Network { message: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Sign-in failed: {message}")]
    #[diagnostic(
        code(atlas::auth_failed),
        help("Check the email and password for profile '{profile}'.\nRun: atlas config set-password --profile {profile}")
    )]
    AuthFailed { message: String, profile: String },

    #[error("No {what} configured for profile '{profile}'")]
    #[diagnostic(
        code(atlas::no_credentials),
        help("Configure credentials with: atlas config init\nOr set ATLAS_EMAIL and ATLAS_PASSWORD.")
    )]
    NoCredentials { profile: String, what: String },

    #[error("Sign in required to {action}")]
    #[diagnostic(code(atlas::not_signed_in), help("Configure email and password with: atlas config init"))]
    NotSignedIn { action: String },

    #[error("{message}")]
    #[diagnostic(code(atlas::permission_denied))]
    PermissionDenied { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(atlas::not_found), help("{hint}"))]
    NotFound {
        resource_type: String,
        identifier: String,
        hint: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Backend error ({code}): {message}")]
    #[diagnostic(code(atlas::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(atlas::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(atlas::profile_not_found),
        help("Available profiles: {available}\nCreate one with: atlas config init")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured for profile '{profile}'")]
    #[diagnostic(
        code(atlas::no_backend),
        help("Set backend_url and backend_anon_key with: atlas config init")
    )]
    NoBackend { profile: String },

    #[error("{message}")]
    #[diagnostic(code(atlas::config), help("Run: atlas config show"))]
    Config { message: String },

    #[error(transparent)]
    #[diagnostic(code(atlas::config_file))]
    ConfigFile(Box<figment::Error>),

    // ── Lifecycle ────────────────────────────────────────────────────
    #[error("Interrupted")]
    #[diagnostic(code(atlas::cancelled))]
    Cancelled,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(atlas::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(atlas::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Network { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::NotSignedIn { .. } => {
                exit_code::AUTH
            }
            Self::PermissionDenied { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Cancelled => exit_code::CANCELLED,
            _ => exit_code::GENERAL,
        }
    }

    /// Name the profile in sign-in failures raised below the CLI layer.
    #[must_use]
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                message,
                profile: name.to_owned(),
            },
            other => other,
        }
    }

    /// Error mapper for a failed `action`, e.g.
    /// `.map_err(CliError::during("load countries"))`.
    pub fn during(action: &str) -> impl FnOnce(CoreError) -> Self + '_ {
        move |err| Self::from_core(err, action)
    }

    fn from_core(err: CoreError, action: &str) -> Self {
        match err {
            CoreError::NetworkFailure { .. } | CoreError::DecodeFailure { .. } => Self::Network {
                message: err.user_message(action),
            },

            CoreError::PermissionDenied { .. } => Self::PermissionDenied {
                message: PERMISSION_DENIED_MESSAGE.into(),
            },

            CoreError::Api { message, code, .. } => Self::ApiError {
                code: code.unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                message,
                profile: "current".into(),
            },

            CoreError::NotSignedIn { action } => Self::NotSignedIn { action },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                hint: if entity_type == "Country" {
                    "Search with: atlas countries list --search <term>".into()
                } else {
                    "Check the name and try again.".into()
                },
                resource_type: entity_type,
                identifier,
            },

            CoreError::ValidationFailed { field, reason } => Self::Validation { field, reason },

            CoreError::Cancelled => Self::Cancelled,

            CoreError::Config { message } => Self::Config { message },

            CoreError::Internal(message) => Self::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core(err, "complete the request")
    }
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::ConfigFile(Box::new(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile, what } => Self::NoCredentials {
                profile,
                what: what.into(),
            },
            ConfigError::Figment(e) => Self::ConfigFile(e),
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
