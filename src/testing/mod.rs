//! In-process test helpers: apps wired to throwaway stores, and a request driver.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceExt;

use crate::app::app;
use crate::config::AppConfig;
use crate::database::memory::MemoryDocumentStore;
use crate::database::{DatabaseError, DocumentStore, ObjectId, RemoveOutcome, StoredDocument, UpdateOutcome};
use crate::state::AppState;

pub const TEST_SESSION_SECRET: &str = "test-session-secret";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::from_lookup(|_| None).expect("defaults parse");
    config.database.url = Some("memory://".to_string());
    config.security.session_secret = TEST_SESSION_SECRET.to_string();
    config
}

pub fn memory_state(config: AppConfig) -> AppState {
    AppState::new(Arc::new(MemoryDocumentStore::new()), config)
}

pub fn memory_app() -> Router {
    app(memory_state(test_config()))
}

/// App whose store fails every call, as if the database were unreachable.
pub fn failing_app() -> Router {
    app(AppState::new(Arc::new(FailingStore), test_config()))
}

pub struct FailingStore;

fn unavailable() -> DatabaseError {
    DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn ensure_collection(&self, _collection: &str) -> Result<(), DatabaseError> {
        Err(unavailable())
    }

    async fn list(&self, _collection: &str) -> Result<Vec<StoredDocument>, DatabaseError> {
        Err(unavailable())
    }

    async fn find(&self, _collection: &str, _id: ObjectId) -> Result<Option<StoredDocument>, DatabaseError> {
        Err(unavailable())
    }

    async fn insert(&self, _collection: &str, _body: Map<String, Value>) -> Result<ObjectId, DatabaseError> {
        Err(unavailable())
    }

    async fn replace(
        &self,
        _collection: &str,
        _id: ObjectId,
        _body: Map<String, Value>,
    ) -> Result<UpdateOutcome, DatabaseError> {
        Err(unavailable())
    }

    async fn remove(&self, _collection: &str, _id: ObjectId) -> Result<RemoveOutcome, DatabaseError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(unavailable())
    }
}

/// Drive one request through the router and return status plus raw body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Bytes) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, headers, body)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let (status, _, bytes) = send_request(app, request).await;
    (status, bytes)
}

/// JSON in, JSON out. Empty responses come back as `Value::Null`.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body.map(|b| b.to_string())).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
