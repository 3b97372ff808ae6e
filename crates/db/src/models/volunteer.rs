//! Volunteer applications (`volunteers`) and the opportunities they apply to
//! (`volunteer_opportunities`).

use kindred_core::error::CoreError;
use kindred_core::status::{ApplicationStatus, OpportunityStatus};
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{normalize_email, require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerApplication {
    pub id: DocId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub opportunity_id: Option<DocId>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerApplication {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    pub opportunity_id: Option<DocId>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub availability: Option<String>,
    #[validate(length(max = 2000, message = "Experience must be at most 2000 characters"))]
    pub experience: Option<String>,
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteerApplication {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub opportunity_id: Option<DocId>,
    pub interests: Option<Vec<String>>,
    pub availability: Option<String>,
    pub experience: Option<String>,
    pub message: Option<String>,
    pub status: Option<ApplicationStatus>,
}

impl Document for VolunteerApplication {
    const COLLECTION: &'static str = "volunteers";
    const ENTITY: &'static str = "VolunteerApplication";

    type Create = CreateVolunteerApplication;
    type Update = UpdateVolunteerApplication;

    fn prepare_create(mut input: CreateVolunteerApplication) -> Result<Value, CoreError> {
        input.email = normalize_email(&input.email);
        validate_dto(&input)?;
        require_non_empty("Name", &input.name)?;

        input.status.get_or_insert_with(ApplicationStatus::default);
        to_body(&input)
    }

    fn prepare_update(
        mut input: UpdateVolunteerApplication,
        _current: &Self,
    ) -> Result<Value, CoreError> {
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

// ---------------------------------------------------------------------------
// Opportunities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerOpportunity {
    pub id: DocId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Informal reference to the owning program.
    #[serde(default)]
    pub program_id: Option<DocId>,
    #[serde(default)]
    pub location: Option<String>,
    /// Expected time commitment, e.g. "4 hours / week".
    #[serde(default)]
    pub commitment: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub spots_available: Option<u32>,
    #[serde(default)]
    pub status: OpportunityStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolunteerOpportunity {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub program_id: Option<DocId>,
    pub location: Option<String>,
    pub commitment: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub spots_available: Option<u32>,
    pub status: Option<OpportunityStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolunteerOpportunity {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub program_id: Option<DocId>,
    pub location: Option<String>,
    pub commitment: Option<String>,
    pub skills: Option<Vec<String>>,
    pub spots_available: Option<u32>,
    pub status: Option<OpportunityStatus>,
}

impl Document for VolunteerOpportunity {
    const COLLECTION: &'static str = "volunteer_opportunities";
    const ENTITY: &'static str = "VolunteerOpportunity";

    type Create = CreateVolunteerOpportunity;
    type Update = UpdateVolunteerOpportunity;

    fn prepare_create(mut input: CreateVolunteerOpportunity) -> Result<Value, CoreError> {
        validate_dto(&input)?;
        require_non_empty("Title", &input.title)?;

        input.status.get_or_insert_with(OpportunityStatus::default);
        to_body(&input)
    }

    fn prepare_update(
        input: UpdateVolunteerOpportunity,
        _current: &Self,
    ) -> Result<Value, CoreError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_defaults_to_pending() {
        let body = VolunteerApplication::prepare_create(CreateVolunteerApplication {
            name: "Lin".into(),
            email: "LIN@example.org".into(),
            phone: None,
            opportunity_id: Some("opp1".into()),
            interests: vec!["tutoring".into()],
            availability: Some("weekends".into()),
            experience: None,
            message: None,
            status: None,
        })
        .unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["email"], "lin@example.org");
        assert_eq!(body["opportunityId"], "opp1");
    }

    #[test]
    fn opportunity_update_needs_a_field() {
        let current = VolunteerOpportunity {
            id: "o".into(),
            title: "Tutor".into(),
            description: String::new(),
            program_id: None,
            location: None,
            commitment: None,
            skills: vec![],
            spots_available: None,
            status: OpportunityStatus::Open,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let empty = UpdateVolunteerOpportunity {
            title: None,
            description: None,
            program_id: None,
            location: None,
            commitment: None,
            skills: None,
            spots_available: None,
            status: None,
        };
        assert!(VolunteerOpportunity::prepare_update(empty, &current).is_err());
    }
}
