// ── Protected data records ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub owner: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated protected record ready for insertion.
///
/// Construction rejects a blank name so an invalid row is never sent.
/// New rows are always inserted active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProtectedRecord {
    name: String,
    description: String,
}

impl NewProtectedRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                field: "name".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
