//! Public fundraising campaigns.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::status::CampaignStatus;
use kindred_db::models::campaign::Campaign;
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// A campaign with its computed progress towards the goal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignView {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub progress_percent: f64,
}

impl From<Campaign> for CampaignView {
    fn from(campaign: Campaign) -> Self {
        let progress_percent = campaign.progress_percent();
        Self {
            campaign,
            progress_percent,
        }
    }
}

/// GET /api/v1/campaigns
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new().filter("status", CampaignStatus::Active.as_str());
    let campaigns: Vec<CampaignView> = DocumentRepo::list::<Campaign>(state.store(), &query)
        .await?
        .into_iter()
        .map(CampaignView::from)
        .collect();

    Ok(Json(ApiResponse::new(campaigns)))
}

/// GET /api/v1/campaigns/{id}
///
/// Draft campaigns are not public and read as missing.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let campaign = DocumentRepo::find_by_id::<Campaign>(state.store(), &id)
        .await?
        .filter(|c| c.status != CampaignStatus::Draft)
        .ok_or_else(|| AppError::Core(CoreError::not_found(Campaign::ENTITY, id)))?;

    Ok(Json(ApiResponse::new(CampaignView::from(campaign))))
}
