use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::database::collection::{DocumentStore, RemoveOutcome, StoredDocument, UpdateOutcome};
use crate::database::manager::DatabaseError;
use crate::database::models::{Document, Entity};
use crate::database::object_id::ObjectId;

/// Typed CRUD access to the collection of one entity type.
pub struct Repository<T> {
    collection: &'static str,
    store: Arc<dyn DocumentStore>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection,
            store: Arc::clone(&self.store),
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            collection: T::COLLECTION,
            store,
            _phantom: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Every decodable document, oldest first. Documents that no longer match
    /// `T` are logged and left out so one bad row cannot hide the rest.
    pub async fn list_all(&self) -> Result<Vec<Document<T>>, DatabaseError> {
        let documents = self
            .store
            .list(self.collection)
            .await?
            .into_iter()
            .filter_map(|doc| match self.decode(doc) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::warn!("Skipping document: {}", e);
                    None
                }
            })
            .collect();
        Ok(documents)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Option<Document<T>>, DatabaseError> {
        self.store
            .find(self.collection, id)
            .await?
            .map(|doc| self.decode(doc))
            .transpose()
    }

    pub async fn insert(&self, entity: &T) -> Result<ObjectId, DatabaseError> {
        let id = self.store.insert(self.collection, Self::encode(entity)?).await?;
        tracing::info!("Inserted {} {}", T::LABEL.to_lowercase(), id);
        Ok(id)
    }

    /// Overwrite every tracked field of the document with `id`.
    pub async fn replace(&self, id: ObjectId, entity: &T) -> Result<UpdateOutcome, DatabaseError> {
        self.store.replace(self.collection, id, Self::encode(entity)?).await
    }

    pub async fn remove(&self, id: ObjectId) -> Result<RemoveOutcome, DatabaseError> {
        self.store.remove(self.collection, id).await
    }

    fn encode(entity: &T) -> Result<serde_json::Map<String, Value>, DatabaseError> {
        match serde_json::to_value(entity)? {
            Value::Object(map) => Ok(map),
            other => Err(DatabaseError::Corrupt {
                collection: T::COLLECTION.to_string(),
                message: format!("entity serialized to non-object: {}", other),
            }),
        }
    }

    fn decode(&self, doc: StoredDocument) -> Result<Document<T>, DatabaseError> {
        let entity = serde_json::from_value(Value::Object(doc.body)).map_err(|e| DatabaseError::Corrupt {
            collection: self.collection.to_string(),
            message: format!("{}: {}", doc.id, e),
        })?;
        Ok(Document::new(doc.id, entity))
    }
}
