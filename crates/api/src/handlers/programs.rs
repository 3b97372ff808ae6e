//! Public program listing.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::status::ProgramStatus;
use kindred_db::models::program::Program;
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/programs
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new().filter("status", ProgramStatus::Active.as_str());
    let programs = DocumentRepo::list::<Program>(state.store(), &query).await?;

    Ok(Json(ApiResponse::new(programs)))
}

/// GET /api/v1/programs/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let program = DocumentRepo::find_by_id::<Program>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(Program::ENTITY, id)))?;

    Ok(Json(ApiResponse::new(program)))
}
