//! Contact form submissions (`contacts` collection).

use kindred_core::error::CoreError;
use kindred_core::status::{ContactStatus, Priority};
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{normalize_email, require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DocId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub status: ContactStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Contact form payload. Also used by admins to log an enquiry by hand.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
    pub status: Option<ContactStatus>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContact {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<ContactStatus>,
    pub priority: Option<Priority>,
    #[validate(length(max = 5000, message = "Notes must be at most 5000 characters"))]
    pub notes: Option<String>,
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";
    const ENTITY: &'static str = "Contact";

    type Create = CreateContact;
    type Update = UpdateContact;

    fn prepare_create(mut input: CreateContact) -> Result<Value, CoreError> {
        input.email = normalize_email(&input.email);
        validate_dto(&input)?;
        require_non_empty("Name", &input.name)?;
        require_non_empty("Subject", &input.subject)?;
        require_non_empty("Message", &input.message)?;

        input.status.get_or_insert_with(ContactStatus::default);
        input.priority.get_or_insert_with(Priority::default);
        to_body(&input)
    }

    fn prepare_update(mut input: UpdateContact, _current: &Self) -> Result<Value, CoreError> {
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
