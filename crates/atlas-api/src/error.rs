use thiserror::Error;

/// Postgres `insufficient_privilege`, returned by the row API when a
/// row-level security policy rejects the request.
pub const PERMISSION_DENIED_CODE: &str = "42501";

/// Top-level error type for the `atlas-api` crate.
///
/// Covers every failure mode across the three gateways: the public
/// country directory, the weather lookup, and the backend row/auth API.
/// `atlas-core` maps these into user-facing messages.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in rejected (bad credentials, unconfirmed account, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The weather gateway needs an API key and none was configured.
    #[error("No API key configured for {service}")]
    MissingApiKey { service: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Public gateways ─────────────────────────────────────────────
    /// Non-2xx response from the country directory or weather gateway.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // ── Backend ─────────────────────────────────────────────────────
    /// Structured error from the backend row or auth API.
    #[error("Backend error (HTTP {status}): {message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the backend refused the request on authorization
    /// grounds (row-level security or an expired/invalid token).
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Backend { code, status, .. } => {
                code.as_deref() == Some(PERMISSION_DENIED_CODE) || matches!(status, 401 | 403)
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } | Self::Backend { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } | Self::Backend { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the backend error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
