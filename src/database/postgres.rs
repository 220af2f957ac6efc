use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgRow, types::Json, PgPool, Row};
use tracing::{debug, info};

use crate::database::collection::{
    is_valid_collection_name, DocumentStore, RemoveOutcome, StoredDocument, UpdateOutcome,
};
use crate::database::manager::DatabaseError;
use crate::database::object_id::ObjectId;

/// Document store on PostgreSQL: one table per collection, bodies in JSONB.
///
/// ```sql
/// CREATE TABLE "movies" (
///     id         TEXT PRIMARY KEY CHECK (char_length(id) = 24),
///     doc        JSONB NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
/// )
/// ```
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Quoted table identifier for a validated collection name.
    fn table(collection: &str) -> Result<String, DatabaseError> {
        if !is_valid_collection_name(collection) {
            return Err(DatabaseError::InvalidCollectionName(collection.to_string()));
        }
        Ok(format!("\"{}\"", collection))
    }

    fn decode_row(collection: &str, row: &PgRow) -> Result<StoredDocument, DatabaseError> {
        let raw_id: String = row.try_get("id")?;
        let id = ObjectId::parse_str(raw_id.trim()).map_err(|e| DatabaseError::Corrupt {
            collection: collection.to_string(),
            message: e.to_string(),
        })?;
        let Json(body): Json<Map<String, Value>> = row.try_get("doc")?;
        Ok(StoredDocument { id, body })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn ensure_collection(&self, collection: &str) -> Result<(), DatabaseError> {
        let table = Self::table(collection)?;
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\
                id TEXT PRIMARY KEY CHECK (char_length(id) = 24), \
                doc JSONB NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
            table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        info!("Collection ready: {}", collection);
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, DatabaseError> {
        let sql = format!("SELECT id, doc FROM {} ORDER BY created_at, id", Self::table(collection)?);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(|row| Self::decode_row(collection, row)).collect()
    }

    async fn find(&self, collection: &str, id: ObjectId) -> Result<Option<StoredDocument>, DatabaseError> {
        let sql = format!("SELECT id, doc FROM {} WHERE id = $1", Self::table(collection)?);
        let row = sqlx::query(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|row| Self::decode_row(collection, row)).transpose()
    }

    async fn insert(&self, collection: &str, body: Map<String, Value>) -> Result<ObjectId, DatabaseError> {
        let sql = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", Self::table(collection)?);
        let id = ObjectId::new();
        sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(Json(body))
            .execute(&self.pool)
            .await?;
        debug!("Inserted {} into {}", id, collection);
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &str,
        id: ObjectId,
        body: Map<String, Value>,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let sql = format!("UPDATE {} SET doc = $2 WHERE id = $1", Self::table(collection)?);
        let result = sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(Json(body))
            .execute(&self.pool)
            .await?;

        Ok(if result.rows_affected() == 0 {
            UpdateOutcome::NotFound
        } else {
            UpdateOutcome::Updated
        })
    }

    async fn remove(&self, collection: &str, id: ObjectId) -> Result<RemoveOutcome, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::table(collection)?);
        let result = sqlx::query(&sql).bind(id.to_hex()).execute(&self.pool).await?;

        Ok(if result.rows_affected() == 0 {
            RemoveOutcome::NotFound
        } else {
            RemoveOutcome::Removed
        })
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
