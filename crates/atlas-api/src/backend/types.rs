// Wire types for the backend row and auth APIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful `token?grant_type=password` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: UserResponse,
}

// ── Favourites table ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteRow {
    pub id: i64,
    /// Filled by the backend from the bearer token; absent when the
    /// policy hides the column.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub country_name: String,
    pub country_code: String,
    pub country_flag: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFavouriteRow {
    pub country_name: String,
    pub country_code: String,
    pub country_flag: String,
}

// ── Protected data table ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProtectedRow {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

// ── Errors ──────────────────────────────────────────────────────────

/// Union of the row API (`{code, message, details, hint}`) and auth
/// service (`{error_code, msg}` / `{error, error_description}`) error bodies.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ErrorResponse {
    /// Machine-readable code. Row API codes are strings (`"42501"`);
    /// the auth service sends a numeric HTTP echo in `code`, which is
    /// not useful, so its `error_code` / `error` fields win.
    pub fn code(&self) -> Option<String> {
        self.error_code
            .clone()
            .or_else(|| match &self.code {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                _ => None,
            })
            .or_else(|| self.error.clone())
    }

    pub fn message(&self) -> Option<String> {
        let base = self
            .message
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error_description.clone())?;
        Some(match &self.hint {
            Some(hint) if !hint.is_empty() => format!("{base} ({hint})"),
            _ => base,
        })
    }
}
