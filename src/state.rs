//! Shared application state, built once at startup and cloned into every handler.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::models::Entity;
use crate::database::{DocumentStore, Repository};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<AppConfig>,
    /// Shared client for outbound OAuth calls.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }

    pub fn repository<T: Entity>(&self) -> Repository<T> {
        Repository::new(Arc::clone(&self.store))
    }
}
