//! Admin bulk operations on newsletter subscribers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kindred_db::models::subscriber::BulkUpdateSubscribers;
use kindred_db::repositories::SubscriberRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Largest number of ids accepted by one bulk update.
pub const MAX_BULK_IDS: usize = 1000;

#[derive(Debug, Serialize)]
pub struct BulkUpdateResult {
    pub updated: u64,
}

/// POST /api/v1/admin/subscribers/bulk-update
///
/// Set the status of many subscribers as one atomic batch.
pub async fn bulk_update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkUpdateSubscribers>,
) -> AppResult<impl IntoResponse> {
    let mut ids = input.ids;
    ids.retain(|id| !id.trim().is_empty());
    ids.sort();
    ids.dedup();

    if ids.is_empty() {
        return Err(AppError::BadRequest("ids must not be empty".into()));
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_BULK_IDS} ids may be updated at once"
        )));
    }

    let updated = SubscriberRepo::bulk_update_status(state.store(), &ids, input.status).await?;

    tracing::info!(
        requested = ids.len(),
        updated,
        status = %input.status,
        "Subscribers bulk updated",
    );

    Ok(Json(ApiResponse::new(BulkUpdateResult { updated })))
}
