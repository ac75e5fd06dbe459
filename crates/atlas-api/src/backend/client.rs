// Backend HTTP client
//
// Wraps `reqwest::Client` with the backend's header conventions
// (`apikey` on every request, bearer token on authenticated ones),
// URL construction, and error-body parsing. Endpoint groups live in
// sibling modules as inherent methods.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use super::types::{ErrorResponse, UserResponse};
use crate::error::Error;
use crate::transport::{self, TransportConfig};

/// An authenticated backend session.
///
/// Holds the bearer token for row API calls. Secrets are redacted in
/// `Debug` output by `SecretString`.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    /// Token lifetime in seconds, as reported at sign-in.
    pub expires_in: Option<u64>,
    pub user: UserResponse,
}

/// Raw HTTP client for the backend row and auth APIs.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: SecretString,
    timeout: Duration,
}

impl BackendClient {
    /// Create a backend client from a `TransportConfig`.
    ///
    /// `base_url` is the project root (e.g. `https://xyz.supabase.co`);
    /// `anon_key` is the public project key sent as `apikey`.
    pub fn new(
        base_url: &str,
        anon_key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url: transport::normalize_base_url(base_url)?,
            anon_key,
            timeout: transport.timeout,
        })
    }

    /// Create a backend client with a pre-built `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        anon_key: SecretString,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: transport::normalize_base_url(base_url)?,
            anon_key,
            timeout: TransportConfig::default().timeout,
        })
    }

    /// The project base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Request construction ─────────────────────────────────────────

    /// Start a request against a path relative to the project root,
    /// attaching the project key and (if given) the session bearer token.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        session: Option<&Session>,
    ) -> Result<RequestBuilder, Error> {
        let url = self.base_url.join(path)?;
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url)
            .header("apikey", self.anon_key.expose_secret());
        if let Some(session) = session {
            builder = builder.bearer_auth(session.access_token.expose_secret());
        }
        Ok(builder)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Send a request and decode a JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, Error> {
        let resp = req
            .send()
            .await
            .map_err(|e| transport::classify_send_error(e, self.timeout))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }
        let body = resp.text().await?;
        trace!(len = body.len(), "backend response body");
        transport::decode_body(body)
    }

    /// Send a request whose successful response has no useful body.
    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<(), Error> {
        let resp = req
            .send()
            .await
            .map_err(|e| transport::classify_send_error(e, self.timeout))?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).unwrap_or_default();

        let message = parsed.message().unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw.clone()
            }
        });

        Error::Backend {
            status: status.as_u16(),
            code: parsed.code(),
            message,
        }
    }
}
