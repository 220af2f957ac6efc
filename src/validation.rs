//! Request payload validation against an entity's tracked field set.

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::database::models::{Entity, FieldKind, FieldSpec};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

/// Check `payload` against `T::FIELDS` and build the typed entity.
///
/// Every field must be present with the declared JSON type; `0` and `false`
/// are valid values. Fields outside the schema are dropped.
pub fn validate<T: Entity>(payload: &Value) -> Result<T, ValidationError> {
    let object = payload.as_object();

    let field_errors: HashMap<String, String> = T::FIELDS
        .iter()
        .filter_map(|field| {
            let value = object.and_then(|o| o.get(field.name));
            check_field(field, value).map(|problem| (field.name.to_string(), problem))
        })
        .collect();

    if !field_errors.is_empty() {
        return Err(ValidationError {
            message: T::VALIDATION_MESSAGE.to_string(),
            field_errors,
        });
    }

    let tracked: Map<String, Value> = T::FIELDS
        .iter()
        .filter_map(|field| {
            object
                .and_then(|o| o.get(field.name))
                .map(|v| (field.name.to_string(), v.clone()))
        })
        .collect();

    serde_json::from_value(Value::Object(tracked)).map_err(|e| {
        let mut field_errors = HashMap::new();
        field_errors.insert("body".to_string(), e.to_string());
        ValidationError {
            message: T::VALIDATION_MESSAGE.to_string(),
            field_errors,
        }
    })
}

fn check_field(field: &FieldSpec, value: Option<&Value>) -> Option<String> {
    let value = match value {
        None | Some(Value::Null) => return Some("This field is required".to_string()),
        Some(v) => v,
    };

    let ok = match field.kind {
        FieldKind::Text => value.as_str().map(|s| !s.is_empty()).unwrap_or(false),
        FieldKind::Number => value.is_number(),
        FieldKind::Boolean => value.is_boolean(),
    };

    if ok {
        None
    } else {
        Some(format!("Must be {}", field.kind.describe()))
    }
}
