pub mod admin_crud;
pub mod blog;
pub mod campaigns;
pub mod contact;
pub mod dashboard;
pub mod donations;
pub mod events;
pub mod gallery;
pub mod newsletter;
pub mod programs;
pub mod subscribers;
pub mod volunteers;

use axum::extract::OriginalUri;

use crate::error::AppError;

/// Fallback for unmatched API paths: a 404 in the standard error envelope.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
