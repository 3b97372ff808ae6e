//! Generic admin CRUD handlers.
//!
//! Every admin collection exposes the same five endpoints; these handlers
//! are instantiated once per [`Document`] type by
//! [`routes::admin::crud_router`](crate::routes::admin::crud_router).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::RequireAdmin;
use crate::query::{clamp_limit, ListParams};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Payload returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

/// GET /api/v1/admin/{collection}
///
/// List documents newest first, optionally filtered by `?status=`.
pub async fn list<T: Document>(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new()
        .filter_opt("status", params.status)
        .limit(Some(clamp_limit(params.limit)));
    let items = DocumentRepo::list::<T>(state.store(), &query).await?;

    Ok(Json(ApiResponse::new(items)))
}

/// POST /api/v1/admin/{collection}
pub async fn create<T: Document>(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<T::Create>,
) -> AppResult<impl IntoResponse> {
    let body = T::prepare_create(input)?;
    let doc = DocumentRepo::insert::<T>(state.store(), body).await?;

    tracing::info!(
        collection = T::COLLECTION,
        id = %doc.id(),
        "Document created",
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(doc))))
}

/// GET /api/v1/admin/{collection}/{id}
pub async fn get<T: Document>(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let doc = DocumentRepo::find_by_id::<T>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(T::ENTITY, id)))?;

    Ok(Json(ApiResponse::new(doc)))
}

/// PUT /api/v1/admin/{collection}/{id}
///
/// Partially update a document; omitted fields keep their values.
pub async fn update<T: Document>(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<T::Update>,
) -> AppResult<impl IntoResponse> {
    let current = DocumentRepo::find_by_id::<T>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(T::ENTITY, id.clone())))?;

    let patch = T::prepare_update(input, &current)?;
    let doc = DocumentRepo::update::<T>(state.store(), &id, patch)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(T::ENTITY, id.clone())))?;

    tracing::info!(collection = T::COLLECTION, id = %id, "Document updated");

    Ok(Json(ApiResponse::new(doc)))
}

/// DELETE /api/v1/admin/{collection}/{id}
pub async fn delete<T: Document>(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let deleted = DocumentRepo::delete::<T>(state.store(), &id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::not_found(T::ENTITY, id)));
    }

    tracing::info!(collection = T::COLLECTION, id = %id, "Document deleted");

    Ok(Json(ApiResponse::new(DeletedResponse { id, deleted })))
}
