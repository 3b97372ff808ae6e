//! Programs the organization runs (`programs` collection).

use kindred_core::error::CoreError;
use kindred_core::status::ProgramStatus;
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: DocId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free-text impact statement shown on the program page.
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub beneficiaries: Option<u32>,
    #[serde(default)]
    pub status: ProgramStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgram {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub impact: Option<String>,
    pub beneficiaries: Option<u32>,
    pub status: Option<ProgramStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgram {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub impact: Option<String>,
    pub beneficiaries: Option<u32>,
    pub status: Option<ProgramStatus>,
}

impl Document for Program {
    const COLLECTION: &'static str = "programs";
    const ENTITY: &'static str = "Program";

    type Create = CreateProgram;
    type Update = UpdateProgram;

    fn prepare_create(mut input: CreateProgram) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Name", &input.name)?;

        input.status.get_or_insert_with(ProgramStatus::default);
        to_body(&input)
    }

    fn prepare_update(input: UpdateProgram, _current: &Self) -> Result<Value, CoreError> {
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
