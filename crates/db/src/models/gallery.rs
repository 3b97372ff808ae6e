//! Photo gallery items (`gallery` collection).

use kindred_core::error::CoreError;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub event_id: Option<DocId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItem {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,
    pub category: Option<String>,
    pub event_id: Option<DocId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryItem {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub event_id: Option<DocId>,
}

impl Document for GalleryItem {
    const COLLECTION: &'static str = "gallery";
    const ENTITY: &'static str = "GalleryItem";

    type Create = CreateGalleryItem;
    type Update = UpdateGalleryItem;

    fn prepare_create(input: CreateGalleryItem) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Title", &input.title)?;
        to_body(&input)
    }

    fn prepare_update(input: UpdateGalleryItem, _current: &Self) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        to_patch(&input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
