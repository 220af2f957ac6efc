use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::database::collection::{
    is_valid_collection_name, DocumentStore, RemoveOutcome, StoredDocument, UpdateOutcome,
};
use crate::database::manager::DatabaseError;
use crate::database::object_id::ObjectId;

/// Process-local store. Collections keep insertion order.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_name(collection: &str) -> Result<(), DatabaseError> {
    if is_valid_collection_name(collection) {
        Ok(())
    } else {
        Err(DatabaseError::InvalidCollectionName(collection.to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), DatabaseError> {
        check_name(collection)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default();
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, DatabaseError> {
        check_name(collection)?;
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find(&self, collection: &str, id: ObjectId) -> Result<Option<StoredDocument>, DatabaseError> {
        check_name(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn insert(&self, collection: &str, body: Map<String, Value>) -> Result<ObjectId, DatabaseError> {
        check_name(collection)?;
        let id = ObjectId::new();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body });
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &str,
        id: ObjectId,
        body: Map<String, Value>,
    ) -> Result<UpdateOutcome, DatabaseError> {
        check_name(collection)?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id));

        Ok(match existing {
            Some(doc) => {
                doc.body = body;
                UpdateOutcome::Updated
            }
            None => UpdateOutcome::NotFound,
        })
    }

    async fn remove(&self, collection: &str, id: ObjectId) -> Result<RemoveOutcome, DatabaseError> {
        check_name(collection)?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(RemoveOutcome::NotFound);
        };

        match docs.iter().position(|d| d.id == id) {
            Some(index) => {
                docs.remove(index);
                Ok(RemoveOutcome::Removed)
            }
            None => Ok(RemoveOutcome::NotFound),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
