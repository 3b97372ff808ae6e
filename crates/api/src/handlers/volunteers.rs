//! Volunteer opportunities and applications.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::status::OpportunityStatus;
use kindred_db::models::volunteer::{
    CreateVolunteerApplication, VolunteerApplication, VolunteerOpportunity,
};
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityParams {
    pub program_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub application_id: String,
}

/// GET /api/v1/volunteer/opportunities
///
/// Open opportunities, optionally for one `?programId=`.
pub async fn list_opportunities(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<OpportunityParams>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new()
        .filter("status", OpportunityStatus::Open.as_str())
        .filter_opt("programId", params.program_id);
    let opportunities = DocumentRepo::list::<VolunteerOpportunity>(state.store(), &query).await?;

    Ok(Json(ApiResponse::new(opportunities)))
}

/// GET /api/v1/volunteer/opportunities/{id}
pub async fn get_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let opportunity = DocumentRepo::find_by_id::<VolunteerOpportunity>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(VolunteerOpportunity::ENTITY, id)))?;

    Ok(Json(ApiResponse::new(opportunity)))
}

/// POST /api/v1/volunteer/applications
///
/// Applications naming an opportunity are only accepted while it is open.
pub async fn apply(
    State(state): State<AppState>,
    ValidatedJson(mut input): ValidatedJson<CreateVolunteerApplication>,
) -> AppResult<impl IntoResponse> {
    input.status = None;

    if let Some(opportunity_id) = input.opportunity_id.as_deref() {
        let opportunity =
            DocumentRepo::find_by_id::<VolunteerOpportunity>(state.store(), opportunity_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::not_found(
                        VolunteerOpportunity::ENTITY,
                        opportunity_id,
                    ))
                })?;
        if opportunity.status != OpportunityStatus::Open {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Opportunity '{}' is not accepting applications",
                opportunity.title
            ))));
        }
    }

    let body = VolunteerApplication::prepare_create(input)?;
    let application = DocumentRepo::insert::<VolunteerApplication>(state.store(), body).await?;

    tracing::info!(
        application_id = %application.id,
        opportunity_id = ?application.opportunity_id,
        "Volunteer application received",
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(ApplicationReceipt {
            application_id: application.id,
        })),
    ))
}
