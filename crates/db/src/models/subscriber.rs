//! Newsletter subscribers (`newsletter_subscribers` collection).

use kindred_core::error::CoreError;
use kindred_core::status::SubscriberStatus;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{normalize_email, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub id: DocId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: SubscriberStatus,
    /// Where the signup came from (footer form, donation flow, import...).
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub unsubscribed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriber {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub source: Option<String>,
    pub status: Option<SubscriberStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriber {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    pub source: Option<String>,
    pub status: Option<SubscriberStatus>,
}

/// Body of `POST /admin/subscribers/bulk-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateSubscribers {
    pub ids: Vec<DocId>,
    pub status: SubscriberStatus,
}

impl Document for NewsletterSubscriber {
    const COLLECTION: &'static str = "newsletter_subscribers";
    const ENTITY: &'static str = "NewsletterSubscriber";

    type Create = CreateSubscriber;
    type Update = UpdateSubscriber;

    fn prepare_create(mut input: CreateSubscriber) -> Result<Value, CoreError> {
        input.email = normalize_email(&input.email);
        validate_dto(&input)?;

        input.status.get_or_insert_with(SubscriberStatus::default);
        to_body(&input)
    }

    fn prepare_update(mut input: UpdateSubscriber, _current: &Self) -> Result<Value, CoreError> {
        input.email = input.email.as_deref().map(normalize_email);
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
