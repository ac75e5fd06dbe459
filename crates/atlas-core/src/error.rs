// ── Core error types ──
//
// User-facing errors from atlas-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<atlas_api::Error>`
// impl translates transport-layer errors into these categories.

use thiserror::Error;

/// Shown whenever the backend rejects a request on authorization grounds.
pub const PERMISSION_DENIED_MESSAGE: &str =
    "Authentication error, please try logging out and back in again.";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Gateway errors ───────────────────────────────────────────────
    /// Gateway unreachable, timed out, or answered non-2xx.
    #[error("Network failure: {message}")]
    NetworkFailure { message: String },

    /// Gateway answered with a payload that does not decode.
    #[error("Malformed response: {message}")]
    DecodeFailure { message: String },

    /// Backend authorization rejection (row-level security, expired token).
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Any other structured backend rejection.
    #[error("Backend error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Auth errors ──────────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Sign in required to {action}")]
    NotSignedIn { action: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Invalid {field}: {reason}")]
    ValidationFailed { field: String, reason: String },

    // ── Lifecycle ────────────────────────────────────────────────────
    /// The caller's cancellation token fired; the result was discarded.
    #[error("Operation cancelled")]
    Cancelled,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message the presentation layer shows for a failed `action`
    /// (e.g. `"load countries"`).
    ///
    /// Network and decode failures share one wording; permission
    /// failures get the re-login prompt.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::NetworkFailure { .. } | Self::DecodeFailure { .. } => {
                format!("Failed to {action}. Please try again later.")
            }
            Self::PermissionDenied { .. } => PERMISSION_DENIED_MESSAGE.to_owned(),
            Self::Api { message, .. } | Self::AuthenticationFailed { message } => message.clone(),
            other => format!("Failed to {action}: {other}"),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<atlas_api::Error> for CoreError {
    fn from(err: atlas_api::Error) -> Self {
        if err.is_permission_denied() {
            return CoreError::PermissionDenied {
                message: err.to_string(),
            };
        }
        if err.is_not_found() {
            let identifier = match &err {
                atlas_api::Error::Http { message, .. } | atlas_api::Error::Backend { message, .. } => {
                    message.clone()
                }
                other => other.to_string(),
            };
            return CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier,
            };
        }
        // Outages read the same for every gateway, whatever body came back.
        if err.is_transient() {
            return CoreError::NetworkFailure {
                message: err.to_string(),
            };
        }
        let code = err.api_error_code().map(str::to_owned);

        match err {
            atlas_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            atlas_api::Error::MissingApiKey { service } => CoreError::Config {
                message: format!("no API key configured for {service}"),
            },
            atlas_api::Error::Transport(ref e) if e.is_decode() => CoreError::DecodeFailure {
                message: e.to_string(),
            },
            atlas_api::Error::Transport(e) => CoreError::NetworkFailure {
                message: e.to_string(),
            },
            atlas_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            atlas_api::Error::Timeout { timeout_secs } => CoreError::NetworkFailure {
                message: format!("request timed out after {timeout_secs}s"),
            },
            atlas_api::Error::Tls(message) => CoreError::NetworkFailure {
                message: format!("TLS error: {message}"),
            },
            atlas_api::Error::Http { status, message } => CoreError::NetworkFailure {
                message: format!("HTTP {status}: {message}"),
            },
            atlas_api::Error::Backend { status, message, .. } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            atlas_api::Error::Deserialization { message, body: _ } => {
                CoreError::DecodeFailure { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_and_decode_share_wording() {
        let network = CoreError::NetworkFailure {
            message: "connection refused".into(),
        };
        let decode = CoreError::DecodeFailure {
            message: "expected array".into(),
        };
        assert_eq!(
            network.user_message("load countries"),
            "Failed to load countries. Please try again later."
        );
        assert_eq!(
            network.user_message("load countries"),
            decode.user_message("load countries")
        );
    }

    #[test]
    fn permission_code_maps_to_relogin_prompt() {
        let api = atlas_api::Error::Backend {
            status: 403,
            code: Some("42501".into()),
            message: "new row violates row-level security policy".into(),
        };
        let core = CoreError::from(api);
        assert!(core.is_permission_denied());
        assert_eq!(core.user_message("save entry"), PERMISSION_DENIED_MESSAGE);
    }

    #[test]
    fn other_backend_errors_keep_message() {
        let api = atlas_api::Error::Backend {
            status: 409,
            code: Some("23505".into()),
            message: "duplicate key value violates unique constraint".into(),
        };
        let core = CoreError::from(api);
        assert!(matches!(core, CoreError::Api { status: Some(409), .. }));
        assert_eq!(
            core.user_message("save entry"),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn api_404_is_not_found() {
        let api = atlas_api::Error::Http {
            status: 404,
            message: "city not found".into(),
        };
        assert!(matches!(CoreError::from(api), CoreError::NotFound { .. }));
    }

    #[test]
    fn backend_outage_reads_as_network_failure() {
        let api = atlas_api::Error::Backend {
            status: 502,
            code: None,
            message: "upstream connect error".into(),
        };
        let core = CoreError::from(api);
        assert!(matches!(core, CoreError::NetworkFailure { .. }));
        assert_eq!(
            core.user_message("load favourites"),
            "Failed to load favourites. Please try again later."
        );
    }

    #[test]
    fn backend_404_is_not_found() {
        let api = atlas_api::Error::Backend {
            status: 404,
            code: Some("PGRST205".into()),
            message: "relation not found".into(),
        };
        let CoreError::NotFound { identifier, .. } = CoreError::from(api) else {
            panic!("expected NotFound");
        };
        assert_eq!(identifier, "relation not found");
    }

    #[test]
    fn malformed_payload_is_decode_failure() {
        let api = atlas_api::Error::Deserialization {
            message: "invalid type: map, expected a sequence".into(),
            body: "{}".into(),
        };
        assert!(matches!(CoreError::from(api), CoreError::DecodeFailure { .. }));
    }
}
