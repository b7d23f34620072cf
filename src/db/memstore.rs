use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::store::{LifecycleMode, StoreError};
use crate::models::{Document, NewDocument};

/// In-memory document store, used when no database URL is configured.
/// Same contract as the Postgres store, nothing survives a restart.
pub struct MemDocStore {
    docs: Arc<RwLock<HashMap<String, Document>>>,
    lifecycle: LifecycleMode,
}

impl MemDocStore {
    pub fn new(lifecycle: LifecycleMode) -> Self {
        Self {
            docs: Arc::new(RwLock::new(HashMap::new())),
            lifecycle,
        }
    }

    pub fn lifecycle(&self) -> LifecycleMode {
        self.lifecycle
    }

    fn materialize(new: NewDocument) -> Document {
        Document {
            uid: new.uid,
            owner_id: new.owner_id,
            name: new.name,
            payload: new.payload,
            created_at: Utc::now(),
            cloned: new.cloned,
            active: true,
        }
    }

    pub async fn find_by_id(&self, uid: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.docs.read().await.get(uid).cloned())
    }

    pub async fn find_by_id_and_owner(
        &self,
        uid: &str,
        owner_id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(uid)
            .filter(|document| document.owner_id == owner_id)
            .cloned())
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Document>, StoreError> {
        let docs = self.docs.read().await;
        let mut documents: Vec<Document> = docs
            .values()
            .filter(|document| document.owner_id == owner_id)
            .filter(|document| self.lifecycle == LifecycleMode::Hard || document.active)
            .cloned()
            .collect();
        documents.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(documents)
    }

    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .values()
            .find(|document| document.name == name && document.active)
            .cloned())
    }

    pub async fn create(&self, new: NewDocument) -> Result<Document, StoreError> {
        let document = Self::materialize(new);
        self.docs
            .write()
            .await
            .insert(document.uid.clone(), document.clone());
        Ok(document)
    }

    pub async fn create_if_absent(&self, new: NewDocument) -> Result<Document, StoreError> {
        let mut docs = self.docs.write().await;
        let uid = new.uid.clone();
        let document = docs
            .entry(uid)
            .or_insert_with(|| Self::materialize(new))
            .clone();
        Ok(document)
    }

    pub async fn rename(&self, uid: &str, name: &str) -> Result<(), StoreError> {
        if let Some(document) = self.docs.write().await.get_mut(uid) {
            document.name = name.to_string();
        }
        Ok(())
    }

    pub async fn update_payload(
        &self,
        uid: &str,
        payload: serde_json::Value,
    ) -> Result<(), StoreError> {
        if let Some(document) = self.docs.write().await.get_mut(uid) {
            document.payload = payload;
        }
        Ok(())
    }

    pub async fn soft_delete(&self, uid: &str) -> Result<(), StoreError> {
        if let Some(document) = self.docs.write().await.get_mut(uid) {
            document.active = false;
        }
        Ok(())
    }

    pub async fn hard_delete(&self, uid: &str) -> Result<(), StoreError> {
        self.docs.write().await.remove(uid);
        Ok(())
    }
}
