//! PostgreSQL backend: every collection lives in the `documents` JSONB table.

use async_trait::async_trait;
use kindred_core::types::{new_doc_id, DocId};
use serde_json::Value;
use sqlx::PgPool;

use super::{expect_object, DocumentStore, ListQuery, StoreError, StoredDocument};

/// Column list for `documents` queries.
const COLUMNS: &str = "collection, id, data, created_at, updated_at";

/// [`DocumentStore`] over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<StoredDocument, StoreError> {
        let data = Value::Object(expect_object(data, "document")?);
        let query = format!(
            "INSERT INTO documents (collection, id, data) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, StoredDocument>(&query)
            .bind(collection)
            .bind(new_doc_id())
            .bind(&data)
            .fetch_one(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM documents WHERE collection = $1 AND id = $2");
        let doc = sqlx::query_as::<_, StoredDocument>(&query)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        // `LIMIT NULL` means no limit.
        let sql = format!(
            "SELECT {COLUMNS} FROM documents \
             WHERE collection = $1 AND data @> $2 \
             ORDER BY created_at DESC, seq DESC \
             LIMIT $3"
        );
        let docs = sqlx::query_as::<_, StoredDocument>(&sql)
            .bind(collection)
            .bind(Value::Object(query.filters.clone()))
            .bind(query.limit.map(|l| l as i64))
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM documents WHERE collection = $1 AND data @> $2",
        )
        .bind(collection)
        .bind(Value::Object(query.filters.clone()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count.max(0) as u64)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let patch = Value::Object(expect_object(patch, "patch")?);
        let query = format!(
            "UPDATE documents SET data = data || $3, updated_at = now() \
             WHERE collection = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        let doc = sqlx::query_as::<_, StoredDocument>(&query)
            .bind(collection)
            .bind(id)
            .bind(&patch)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_many(
        &self,
        collection: &str,
        ids: &[DocId],
        patch: Value,
    ) -> Result<u64, StoreError> {
        let patch = Value::Object(expect_object(patch, "patch")?);
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3, updated_at = now() \
             WHERE collection = $1 AND id = ANY($2)",
        )
        .bind(collection)
        .bind(ids)
        .bind(&patch)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
