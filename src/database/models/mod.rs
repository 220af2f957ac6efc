pub mod contact;
pub mod movie;

pub use contact::Contact;
pub use movie::Movie;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::object_id::ObjectId;

/// JSON type a tracked field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    Number,
    Boolean,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "a non-empty string",
            FieldKind::Number => "a number",
            FieldKind::Boolean => "a boolean",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text }
    }

    pub const fn number(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Number }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Boolean }
    }
}

/// A record type stored in its own collection.
///
/// `FIELDS` is the full tracked field set: every write must supply all of
/// them, and nothing outside it is persisted.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the route prefix.
    const COLLECTION: &'static str;
    /// Singular display name used in response messages.
    const LABEL: &'static str;
    const FIELDS: &'static [FieldSpec];
    /// Message returned when a payload fails validation.
    const VALIDATION_MESSAGE: &'static str;
    const DELETED_MESSAGE: &'static str;

    /// Body returned with 201 after a successful insert.
    fn created_body(id: ObjectId, _entity: &Self) -> Value {
        json!({ "id": id })
    }
}

/// A stored entity together with its key, rendered as `{ "_id": ..., ...fields }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub entity: T,
}

impl<T> Document<T> {
    pub fn new(id: ObjectId, entity: T) -> Self {
        Self { id, entity }
    }
}
