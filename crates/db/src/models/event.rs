//! Public events (`events` collection).

use chrono::NaiveDate;
use kindred_core::error::CoreError;
use kindred_core::status::EventStatus;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: EventStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 300, message = "Location must be 1-300 characters"))]
    pub location: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered_count: u32,
    #[serde(default)]
    pub featured: bool,
    pub status: Option<EventStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 300, message = "Location must be 1-300 characters"))]
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub capacity: Option<u32>,
    pub registered_count: Option<u32>,
    pub featured: Option<bool>,
    pub status: Option<EventStatus>,
}

/// An event may not end before it starts.
fn check_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), CoreError> {
    match end {
        Some(end) if end < start => Err(CoreError::Validation(
            "End date must not be before the event date".to_string(),
        )),
        _ => Ok(()),
    }
}

impl Document for Event {
    const COLLECTION: &'static str = "events";
    const ENTITY: &'static str = "Event";

    type Create = CreateEvent;
    type Update = UpdateEvent;

    fn prepare_create(mut input: CreateEvent) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Title", &input.title)?;
        check_dates(input.date, input.end_date)?;

        input.status.get_or_insert_with(EventStatus::default);
        to_body(&input)
    }

    fn prepare_update(input: UpdateEvent, current: &Self) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        check_dates(
            input.date.unwrap_or(current.date),
            input.end_date.or(current.end_date),
        )?;
        to_patch(&input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
