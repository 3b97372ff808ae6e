//! Request extractors that report failures through the JSON error envelope.

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::Json;
use kindred_core::validation::validate_dto;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// `Json<T>` whose rejections become [`AppError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query<T>` whose rejections become [`AppError::BadRequest`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// JSON body that must also pass its `validator` rules.
///
/// Public form endpoints take this instead of [`AppJson`] so malformed
/// submissions are rejected with a 400 before any handler code runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        validate_dto(&value)?;
        Ok(ValidatedJson(value))
    }
}
