//! Document store abstraction.
//!
//! Collections hold schema-less JSON documents keyed by a generated id. The
//! [`DocumentStore`] trait is the only way the rest of the workspace touches
//! persistence; [`PgDocumentStore`] backs it with a JSONB table and
//! [`MemoryDocumentStore`] keeps everything in process.

use async_trait::async_trait;
use kindred_core::types::{DocId, Timestamp};
use serde_json::{Map, Value};

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

// ---------------------------------------------------------------------------
// Documents and queries
// ---------------------------------------------------------------------------

/// A document as persisted: the JSON body plus store-managed metadata.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredDocument {
    pub collection: String,
    pub id: DocId,
    pub data: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Equality filters on top-level fields plus an optional row limit.
///
/// Results are always ordered newest first by `created_at`; documents created
/// in the same instant come newest insert first.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filters: Map<String, Value>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(field.to_string(), value.into());
        self
    }

    /// Require `field == value` when a value is given; no-op otherwise.
    pub fn filter_opt<V: Into<Value>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.filter(field, v),
            None => self,
        }
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Whether `data` satisfies every filter.
    pub fn matches(&self, data: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }
}

/// Ensure a value is a JSON object and return its map.
pub(crate) fn expect_object(value: Value, what: &str) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "{what} must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Collection-oriented document persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document with a generated id.
    async fn insert(&self, collection: &str, data: Value) -> Result<StoredDocument, StoreError>;

    /// Fetch a document by id.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    /// List documents matching `query`, newest first. Ties on `created_at`
    /// resolve to the most recently inserted document first.
    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Count documents matching `query` (the limit is ignored).
    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError>;

    /// Shallow-merge `patch` into a document. Returns `None` if it does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Remove a document. Returns `true` if one was removed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Merge `patch` into every listed document as one atomic write.
    ///
    /// Ids that do not exist are skipped. Returns the number of documents
    /// updated.
    async fn update_many(
        &self,
        collection: &str,
        ids: &[DocId],
        patch: Value,
    ) -> Result<u64, StoreError>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
