use serde::Deserialize;

use super::memstore::MemDocStore;
use super::pgstore::PgDocStore;
use crate::models::{Document, NewDocument};

/// Deployment choice for how deletes behave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleMode {
    /// Deletes flip the `active` flag; owner listings and the duplicate-name
    /// check only consider active records
    Soft,
    /// Deletes remove the record; nothing filters on `active`
    Hard,
}

#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(e) => write!(f, "document store unavailable: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Document store adapter. Postgres when a database URL is configured,
/// in-memory otherwise. Owned by `AppState` and injected into handlers.
///
/// Absent records are `Option`/vacuous success, never an error; the only
/// error condition is the backend being unreachable.
pub enum DocStore {
    Pg(PgDocStore),
    Memory(MemDocStore),
}

impl DocStore {
    pub async fn connect(database_url: &str, lifecycle: LifecycleMode) -> Result<Self, StoreError> {
        Ok(DocStore::Pg(PgDocStore::connect(database_url, lifecycle).await?))
    }

    pub fn memory(lifecycle: LifecycleMode) -> Self {
        DocStore::Memory(MemDocStore::new(lifecycle))
    }

    pub fn lifecycle(&self) -> LifecycleMode {
        match self {
            DocStore::Pg(store) => store.lifecycle(),
            DocStore::Memory(store) => store.lifecycle(),
        }
    }

    pub async fn find_by_id(&self, uid: &str) -> Result<Option<Document>, StoreError> {
        match self {
            DocStore::Pg(store) => store.find_by_id(uid).await,
            DocStore::Memory(store) => store.find_by_id(uid).await,
        }
    }

    pub async fn find_by_id_and_owner(
        &self,
        uid: &str,
        owner_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        match self {
            DocStore::Pg(store) => store.find_by_id_and_owner(uid, owner_id).await,
            DocStore::Memory(store) => store.find_by_id_and_owner(uid, owner_id).await,
        }
    }

    /// Documents belonging to an owner; active ones only in the soft-delete variant
    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Document>, StoreError> {
        match self {
            DocStore::Pg(store) => store.find_by_owner(owner_id).await,
            DocStore::Memory(store) => store.find_by_owner(owner_id).await,
        }
    }

    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<Document>, StoreError> {
        match self {
            DocStore::Pg(store) => store.find_active_by_name(name).await,
            DocStore::Memory(store) => store.find_active_by_name(name).await,
        }
    }

    pub async fn create(&self, new: NewDocument) -> Result<Document, StoreError> {
        match self {
            DocStore::Pg(store) => store.create(new).await,
            DocStore::Memory(store) => store.create(new).await,
        }
    }

    /// Atomic insert-if-absent, then return whichever record holds the uid.
    /// Two racing first-joins on the same unseen id end up with one record.
    pub async fn create_if_absent(&self, new: NewDocument) -> Result<Document, StoreError> {
        match self {
            DocStore::Pg(store) => store.create_if_absent(new).await,
            DocStore::Memory(store) => store.create_if_absent(new).await,
        }
    }

    /// Last writer wins; silent no-op on an absent uid
    pub async fn rename(&self, uid: &str, name: &str) -> Result<(), StoreError> {
        match self {
            DocStore::Pg(store) => store.rename(uid, name).await,
            DocStore::Memory(store) => store.rename(uid, name).await,
        }
    }

    /// Replace the stored payload only; silent no-op on an absent uid
    pub async fn update_payload(
        &self,
        uid: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        match self {
            DocStore::Pg(store) => store.update_payload(uid, payload).await,
            DocStore::Memory(store) => store.update_payload(uid, payload).await,
        }
    }

    pub async fn soft_delete(&self, uid: &str) -> Result<(), StoreError> {
        match self {
            DocStore::Pg(store) => store.soft_delete(uid).await,
            DocStore::Memory(store) => store.soft_delete(uid).await,
        }
    }

    pub async fn hard_delete(&self, uid: &str) -> Result<(), StoreError> {
        match self {
            DocStore::Pg(store) => store.hard_delete(uid).await,
            DocStore::Memory(store) => store.hard_delete(uid).await,
        }
    }
}
