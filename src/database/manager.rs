use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::collection::DocumentStore;
use crate::database::memory::MemoryDocumentStore;
use crate::database::models::{Contact, Entity, Movie};
use crate::database::postgres::PgDocumentStore;

/// Errors from the document store layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Unsupported database scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid collection name: {0}")]
    InvalidCollectionName(String),

    #[error("Corrupt document in {collection}: {message}")]
    Corrupt { collection: String, message: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Opens the document store named by `DATABASE_URL`.
///
/// `postgres://` and `postgresql://` URLs get a pooled PostgreSQL backend;
/// `memory://` keeps everything in process.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Collections served by the API, created at startup.
    pub const COLLECTIONS: [&'static str; 2] = [Contact::COLLECTION, Movie::COLLECTION];

    /// Connect and prepare every collection. The store is usable on return.
    pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let store: Arc<dyn DocumentStore> = match Self::scheme(url)?.as_str() {
            "memory" => {
                info!("Using in-memory document store");
                Arc::new(MemoryDocumentStore::new())
            }
            "postgres" | "postgresql" => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(config.connection_timeout))
                    .connect(url)
                    .await?;
                info!("Connected to PostgreSQL document store");
                Arc::new(PgDocumentStore::new(pool))
            }
            other => return Err(DatabaseError::UnsupportedScheme(other.to_string())),
        };

        store.ping().await?;
        for collection in Self::COLLECTIONS {
            store.ensure_collection(collection).await?;
        }
        Ok(store)
    }

    fn scheme(url: &str) -> Result<String, DatabaseError> {
        let parsed = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        Ok(parsed.scheme().to_ascii_lowercase())
    }

    /// Pings the store to ensure connectivity
    pub async fn health_check(store: &dyn DocumentStore) -> Result<(), DatabaseError> {
        store.ping().await
    }
}
