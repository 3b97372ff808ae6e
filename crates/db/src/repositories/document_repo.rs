//! Typed CRUD over any [`Document`] collection.

use serde_json::Value;

use crate::models::{from_stored, Document};
use crate::store::{DocumentStore, ListQuery, StoreError};

/// Generic data access for typed documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a prepared document body.
    pub async fn insert<T: Document>(
        store: &dyn DocumentStore,
        body: Value,
    ) -> Result<T, StoreError> {
        let doc = store.insert(T::COLLECTION, body).await?;
        from_stored(doc)
    }

    pub async fn find_by_id<T: Document>(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        store
            .get(T::COLLECTION, id)
            .await?
            .map(from_stored)
            .transpose()
    }

    /// List documents matching `query`, newest first.
    pub async fn list<T: Document>(
        store: &dyn DocumentStore,
        query: &ListQuery,
    ) -> Result<Vec<T>, StoreError> {
        store
            .list(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(from_stored)
            .collect()
    }

    pub async fn count<T: Document>(
        store: &dyn DocumentStore,
        query: &ListQuery,
    ) -> Result<u64, StoreError> {
        store.count(T::COLLECTION, query).await
    }

    /// Merge a prepared patch. Returns `None` if the document does not exist.
    pub async fn update<T: Document>(
        store: &dyn DocumentStore,
        id: &str,
        patch: Value,
    ) -> Result<Option<T>, StoreError> {
        store
            .update(T::COLLECTION, id, patch)
            .await?
            .map(from_stored)
            .transpose()
    }

    /// Delete by id. Returns `true` if a document was removed.
    pub async fn delete<T: Document>(
        store: &dyn DocumentStore,
        id: &str,
    ) -> Result<bool, StoreError> {
        store.delete(T::COLLECTION, id).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::program::{CreateProgram, Program, UpdateProgram};
    use crate::store::MemoryDocumentStore;

    fn new_program(name: &str) -> CreateProgram {
        CreateProgram {
            name: name.to_string(),
            description: "Weekly classes".to_string(),
            category: None,
            image_url: None,
            impact: None,
            beneficiaries: Some(120),
            status: None,
        }
    }

    #[tokio::test]
    async fn typed_round_trip() {
        let store = MemoryDocumentStore::new();
        let body = Program::prepare_create(new_program("Literacy")).unwrap();
        let created: Program = DocumentRepo::insert(&store, body).await.unwrap();
        assert_eq!(created.name, "Literacy");
        assert_eq!(created.beneficiaries, Some(120));

        let found = DocumentRepo::find_by_id::<Program>(&store, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);

        let patch = Program::prepare_update(
            UpdateProgram {
                name: Some("Adult Literacy".into()),
                description: None,
                category: None,
                image_url: None,
                impact: None,
                beneficiaries: None,
                status: None,
            },
            &found,
        )
        .unwrap();
        let updated = DocumentRepo::update::<Program>(&store, &created.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Adult Literacy");
        assert_eq!(updated.beneficiaries, Some(120));

        assert!(DocumentRepo::delete::<Program>(&store, &created.id).await.unwrap());
        assert!(DocumentRepo::find_by_id::<Program>(&store, &created.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let store = MemoryDocumentStore::new();
        for name in ["A", "B"] {
            let body = Program::prepare_create(new_program(name)).unwrap();
            DocumentRepo::insert::<Program>(&store, body).await.unwrap();
        }
        store
            .insert(
                Program::COLLECTION,
                json!({"name": "C", "description": "x", "status": "inactive"}),
            )
            .await
            .unwrap();

        let active = DocumentRepo::list::<Program>(
            &store,
            &ListQuery::new().filter("status", "active"),
        )
        .await
        .unwrap();
        assert_eq!(active.len(), 2);

        let total = DocumentRepo::count::<Program>(&store, &ListQuery::new())
            .await
            .unwrap();
        assert_eq!(total, 3);
    }
}
