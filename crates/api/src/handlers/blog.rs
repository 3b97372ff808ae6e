//! Public blog.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::status::PostStatus;
use kindred_db::models::blog_post::BlogPost;
use kindred_db::models::Document;
use kindred_db::repositories::{BlogPostRepo, DocumentRepo};
use kindred_db::ListQuery;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppQuery;
use crate::query::clamp_limit;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BlogParams {
    pub limit: Option<usize>,
}

/// GET /api/v1/blog
///
/// Published posts, newest first.
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BlogParams>,
) -> AppResult<impl IntoResponse> {
    // Sort before limiting: publish order differs from creation order.
    let query = ListQuery::new().filter("status", PostStatus::Published.as_str());
    let mut posts = DocumentRepo::list::<BlogPost>(state.store(), &query).await?;
    posts.sort_by(|a, b| {
        b.published_at
            .unwrap_or(b.created_at)
            .cmp(&a.published_at.unwrap_or(a.created_at))
    });
    posts.truncate(clamp_limit(params.limit));

    Ok(Json(ApiResponse::new(posts)))
}

/// GET /api/v1/blog/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_published_by_slug(state.store(), &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(BlogPost::ENTITY, slug)))?;

    Ok(Json(ApiResponse::new(post)))
}
