//! Fundraising campaigns (`campaigns` collection).

use chrono::NaiveDate;
use kindred_core::error::CoreError;
use kindred_core::status::CampaignStatus;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub goal_amount: f64,
    #[serde(default)]
    pub raised_amount: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: CampaignStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Campaign {
    /// Share of the goal raised so far, capped at 100 and rounded to one decimal.
    pub fn progress_percent(&self) -> f64 {
        if self.goal_amount <= 0.0 {
            return 0.0;
        }
        let pct = (self.raised_amount / self.goal_amount * 100.0).min(100.0);
        (pct * 10.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaign {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Goal amount must be greater than zero"))]
    pub goal_amount: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Raised amount must not be negative"))]
    pub raised_amount: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaign {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Goal amount must be greater than zero"))]
    pub goal_amount: Option<f64>,
    #[validate(range(min = 0.0, message = "Raised amount must not be negative"))]
    pub raised_amount: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub status: Option<CampaignStatus>,
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), CoreError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(CoreError::Validation(
            "End date must not be before the start date".to_string(),
        )),
        _ => Ok(()),
    }
}

impl Document for Campaign {
    const COLLECTION: &'static str = "campaigns";
    const ENTITY: &'static str = "Campaign";

    type Create = CreateCampaign;
    type Update = UpdateCampaign;

    fn prepare_create(mut input: CreateCampaign) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Title", &input.title)?;
        check_dates(input.start_date, input.end_date)?;

        input.status.get_or_insert_with(CampaignStatus::default);
        to_body(&input)
    }

    fn prepare_update(input: UpdateCampaign, current: &Self) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        check_dates(
            input.start_date.or(current.start_date),
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
