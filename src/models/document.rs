use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted document record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque unique identifier, immutable once assigned
    pub uid: String,
    pub owner_id: String,
    pub name: String,
    /// Opaque editor state; the server relays and stores it but never parses it
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    /// Marks documents created as a copy of another one
    pub cloned: bool,
    /// Lifecycle flag flipped by soft delete
    pub active: bool,
}

impl Document {
    /// Payload of a document created without content
    pub fn empty_payload() -> serde_json::Value {
        serde_json::Value::String(String::new())
    }
}

/// Fields of a document about to be inserted; `created_at` is assigned by the store
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub uid: String,
    pub owner_id: String,
    pub name: String,
    pub payload: serde_json::Value,
    pub cloned: bool,
}

impl NewDocument {
    pub fn new(uid: String, owner_id: String, name: String) -> Self {
        Self {
            uid,
            owner_id,
            name,
            payload: Document::empty_payload(),
            cloned: false,
        }
    }
}
