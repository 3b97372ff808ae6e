//! Public photo gallery.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kindred_db::models::gallery::GalleryItem;
use kindred_db::repositories::DocumentRepo;
use kindred_db::ListQuery;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::query::clamp_limit;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GalleryParams {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/v1/gallery
///
/// Newest items first, optionally narrowed to one `?category=`.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery::new()
        .filter_opt("category", params.category)
        .limit(Some(clamp_limit(params.limit)));
    let items = DocumentRepo::list::<GalleryItem>(state.store(), &query).await?;

    Ok(Json(ApiResponse::new(items)))
}
