//! Public event listing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::status::EventStatus;
use kindred_db::models::event::Event;
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::query::clamp_limit;
use crate::response::ApiResponse;
use crate::state::AppState;

/// `?status=&featured=&limit=` for `GET /events`.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub status: Option<EventStatus>,
    pub featured: Option<bool>,
    pub limit: Option<usize>,
}

/// GET /api/v1/events
///
/// Non-cancelled events, soonest first.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new()
        .filter_opt("status", params.status.map(EventStatus::as_str))
        .filter_opt("featured", params.featured);

    let mut events: Vec<Event> = DocumentRepo::list::<Event>(state.store(), &query)
        .await?
        .into_iter()
        .filter(|e| e.status != EventStatus::Cancelled)
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    events.truncate(clamp_limit(params.limit));

    Ok(Json(ApiResponse::new(events)))
}

/// GET /api/v1/events/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = DocumentRepo::find_by_id::<Event>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(Event::ENTITY, id)))?;

    Ok(Json(ApiResponse::new(event)))
}
