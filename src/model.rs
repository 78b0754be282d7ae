//! Record Model
//!
//! The single entity managed by tadmin, plus the write payloads and the
//! validator that guards every write.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Human-facing name of the entity, used in messages
pub const ENTITY_NAME: &str = "Test";

/// Longest identifier accepted on the wire
const MAX_ID_LEN: usize = 64;

/// Opaque record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier for a new record
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Returns `None` for empty, oversized, or non-`[A-Za-z0-9_-]` input.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted Test record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
}

/// Payload for creating a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(default)]
    pub name: Option<String>,
}

impl NewRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Partial update payload; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RecordPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Check the required `name` field and return it on success
pub fn validate_name(name: Option<&str>) -> Result<&str, String> {
    match name {
        None => Err("Path `name` is required.".to_string()),
        Some(n) if n.trim().is_empty() => Err("Path `name` is required.".to_string()),
        Some(n) => Ok(n),
    }
}
