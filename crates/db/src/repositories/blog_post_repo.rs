//! Public blog lookups.

use kindred_core::status::PostStatus;

use super::DocumentRepo;
use crate::models::blog_post::BlogPost;
use crate::store::{DocumentStore, ListQuery, StoreError};

/// Provides data access for blog posts beyond plain CRUD.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Newest published post carrying `slug`.
    pub async fn find_published_by_slug(
        store: &dyn DocumentStore,
        slug: &str,
    ) -> Result<Option<BlogPost>, StoreError> {
        let query = ListQuery::new()
            .filter("slug", slug)
            .filter("status", PostStatus::Published.as_str())
            .limit(Some(1));
        Ok(DocumentRepo::list::<BlogPost>(store, &query)
            .await?
            .into_iter()
            .next())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Document;
    use crate::store::MemoryDocumentStore;

    #[tokio::test]
    async fn drafts_are_not_found_by_slug() {
        let store = MemoryDocumentStore::new();
        store
            .insert(
                BlogPost::COLLECTION,
                json!({"title": "Hi", "slug": "hi", "content": "x", "status": "draft"}),
            )
            .await
            .unwrap();
        assert!(BlogPostRepo::find_published_by_slug(&store, "hi")
            .await
            .unwrap()
            .is_none());

        store
            .insert(
                BlogPost::COLLECTION,
                json!({"title": "Hi", "slug": "hi", "content": "y", "status": "published"}),
            )
            .await
            .unwrap();
        let post = BlogPostRepo::find_published_by_slug(&store, "hi")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(post.content, "y");
    }
}
