//! In-process backend for local development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use kindred_core::types::{new_doc_id, DocId};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{expect_object, DocumentStore, ListQuery, StoreError, StoredDocument};

/// [`DocumentStore`] holding every collection in memory.
///
/// Documents within a collection are kept in insertion order so that ties on
/// `created_at` resolve newest-inserted first, like a sequence column would.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn merge_into(target: &mut Value, patch: &serde_json::Map<String, Value>) {
    if let Value::Object(map) = target {
        for (k, v) in patch {
            map.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<StoredDocument, StoreError> {
        let data = Value::Object(expect_object(data, "document")?);
        let now = Utc::now();
        let doc = StoredDocument {
            collection: collection.to_string(),
            id: new_doc_id(),
            data,
            created_at: now,
            updated_at: now,
        };

        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn list(
        &self,
        collection: &str,
        query: &ListQuery,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<StoredDocument> = docs
            .iter()
            .rev()
            .filter(|d| query.matches(&d.data))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn count(&self, collection: &str, query: &ListQuery) -> Result<u64, StoreError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| query.matches(&d.data)).count() as u64)
            .unwrap_or(0))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let patch = expect_object(patch, "patch")?;
        let mut guard = self.collections.write().await;
        let Some(doc) = guard
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };

        merge_into(&mut doc.data, &patch);
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn update_many(
        &self,
        collection: &str,
        ids: &[DocId],
        patch: Value,
    ) -> Result<u64, StoreError> {
        let patch = expect_object(patch, "patch")?;
        // One write guard for the whole batch keeps it atomic to readers.
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };

        let now = Utc::now();
        let mut updated = 0;
        for doc in docs.iter_mut().filter(|d| ids.contains(&d.id)) {
            merge_into(&mut doc.data, &patch);
            doc.updated_at = now;
            updated += 1;
        }
        Ok(updated)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
