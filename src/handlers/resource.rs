//! CRUD handlers shared by every entity collection.
//!
//! Each write checks the path id first, then the body, and only then touches
//! the repository.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};

use crate::database::models::{Document, Entity};
use crate::database::{ObjectId, RemoveOutcome, UpdateOutcome};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::validate;

/// `/{collection}` and `/{collection}/:id` for entity `T`.
pub fn routes<T: Entity>() -> Router<AppState> {
    let collection = format!("/{}", T::COLLECTION);
    let member = format!("/{}/:id", T::COLLECTION);

    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(&member, get(read::<T>).put(update::<T>).delete(delete::<T>))
}

fn not_found<T: Entity>() -> ApiError {
    ApiError::not_found(format!("{} not found", T::LABEL))
}

fn singular<T: Entity>() -> String {
    T::LABEL.to_lowercase()
}

/// GET /:collection
pub async fn list<T: Entity>(State(state): State<AppState>) -> Result<Json<Vec<Document<T>>>, ApiError> {
    let documents = state
        .repository::<T>()
        .list_all()
        .await
        .map_err(|e| ApiError::infrastructure(format!("Failed to fetch {}", T::COLLECTION), e))?;
    Ok(Json(documents))
}

/// GET /:collection/:id
pub async fn read<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document<T>>, ApiError> {
    let id = ObjectId::parse_str(&id)?;

    state
        .repository::<T>()
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::infrastructure(format!("Failed to fetch {}", singular::<T>()), e))?
        .map(Json)
        .ok_or_else(not_found::<T>)
}

/// POST /:collection
pub async fn create<T: Entity>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let entity: T = validate(&payload)?;

    let id = state
        .repository::<T>()
        .insert(&entity)
        .await
        .map_err(|e| ApiError::infrastructure(format!("Failed to create {}", singular::<T>()), e))?;

    Ok((StatusCode::CREATED, Json(T::created_body(id, &entity))))
}

/// PUT /:collection/:id - full replacement, 204 on success
pub async fn update<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = ObjectId::parse_str(&id)?;
    let Json(payload) = payload?;
    let entity: T = validate(&payload)?;

    let outcome = state
        .repository::<T>()
        .replace(id, &entity)
        .await
        .map_err(|e| ApiError::infrastructure(format!("Failed to update {}", singular::<T>()), e))?;

    match outcome {
        UpdateOutcome::Updated => Ok(StatusCode::NO_CONTENT),
        UpdateOutcome::NotFound => Err(not_found::<T>()),
    }
}

/// DELETE /:collection/:id
pub async fn delete<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = ObjectId::parse_str(&id)?;

    let outcome = state
        .repository::<T>()
        .remove(id)
        .await
        .map_err(|e| ApiError::infrastructure(format!("Failed to delete {}", singular::<T>()), e))?;

    match outcome {
        RemoveOutcome::Removed => Ok(Json(json!({ "message": T::DELETED_MESSAGE }))),
        RemoveOutcome::NotFound => Err(not_found::<T>()),
    }
}
