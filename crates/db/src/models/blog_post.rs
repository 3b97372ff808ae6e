//! Blog posts (`blog_posts` collection).
//!
//! Posts get a URL slug derived from the title unless one is supplied, and
//! `publishedAt` is stamped the first time a post reaches `published`.

use chrono::Utc;
use kindred_core::error::CoreError;
use kindred_core::naming::slugify;
use kindred_core::status::PostStatus;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: DocId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<PostStatus>,
    pub published_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub published_at: Option<Timestamp>,
}

impl Document for BlogPost {
    const COLLECTION: &'static str = "blog_posts";
    const ENTITY: &'static str = "BlogPost";

    type Create = CreateBlogPost;
    type Update = UpdateBlogPost;

    fn prepare_create(mut input: CreateBlogPost) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Title", &input.title)?;

        let slug = match input.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => slugify(s),
            _ => slugify(&input.title),
        };
        input.slug = Some(slug);

        let status = *input.status.get_or_insert_with(PostStatus::default);
        if status == PostStatus::Published && input.published_at.is_none() {
            input.published_at = Some(Utc::now());
        }
        to_body(&input)
    }

    fn prepare_update(mut input: UpdateBlogPost, current: &Self) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        input.slug = input.slug.as_deref().map(slugify);

        if input.status == Some(PostStatus::Published)
            && current.published_at.is_none()
            && input.published_at.is_none()
        {
            input.published_at = Some(Utc::now());
        }
        to_patch(&input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> CreateBlogPost {
        CreateBlogPost {
            title: title.into(),
            slug: None,
            excerpt: None,
            content: "Body".into(),
            author: "Staff".into(),
            image_url: None,
            tags: vec![],
            status: None,
            published_at: None,
        }
    }

    #[test]
    fn slug_comes_from_title() {
        let body = BlogPost::prepare_create(draft("Our Year in Review!")).unwrap();
        assert_eq!(body["slug"], "our-year-in-review");
        assert_eq!(body["status"], "draft");
        assert!(body["publishedAt"].is_null());
    }

    #[test]
    fn explicit_slug_is_normalized() {
        let mut input = draft("Anything");
        input.slug = Some("Custom Slug".into());
        let body = BlogPost::prepare_create(input).unwrap();
        assert_eq!(body["slug"], "custom-slug");
    }

    #[test]
    fn publishing_stamps_published_at() {
        let mut input = draft("Launch");
        input.status = Some(PostStatus::Published);
        let body = BlogPost::prepare_create(input).unwrap();
        assert!(body["publishedAt"].is_string());
    }
}
