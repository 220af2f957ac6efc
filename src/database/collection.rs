use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::database::manager::DatabaseError;
use crate::database::object_id::ObjectId;

/// Raw document as held by a store: key plus JSON body without the key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: ObjectId,
    pub body: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Document store holding named collections of JSON documents.
///
/// Zero matched documents is reported through the outcome enums, never as an
/// error. `DatabaseError` means the store itself failed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Prepare storage for a collection. Idempotent.
    async fn ensure_collection(&self, collection: &str) -> Result<(), DatabaseError>;

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, DatabaseError>;

    async fn find(&self, collection: &str, id: ObjectId) -> Result<Option<StoredDocument>, DatabaseError>;

    /// Persist a new document under a freshly generated key.
    async fn insert(&self, collection: &str, body: Map<String, Value>) -> Result<ObjectId, DatabaseError>;

    /// Overwrite the body of the document with `id`.
    async fn replace(
        &self,
        collection: &str,
        id: ObjectId,
        body: Map<String, Value>,
    ) -> Result<UpdateOutcome, DatabaseError>;

    async fn remove(&self, collection: &str, id: ObjectId) -> Result<RemoveOutcome, DatabaseError>;

    /// Round trip to the backend.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Collection names end up in SQL identifiers: lowercase ascii, digits and
/// underscores, starting with a letter.
pub fn is_valid_collection_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
