//! Newsletter signup and opt-out.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kindred_core::error::CoreError;
use kindred_core::validation::{normalize_email, validate_email};
use kindred_db::models::subscriber::{CreateSubscriber, NewsletterSubscriber};
use kindred_db::models::Document;
use kindred_db::repositories::{SubscribeOutcome, SubscriberRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// POST /api/v1/newsletter/subscribe
///
/// New addresses get 201; lapsed subscribers are reactivated with 200;
/// addresses that are already active get 409.
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(mut input): ValidatedJson<CreateSubscriber>,
) -> AppResult<impl IntoResponse> {
    input.status = None;
    let body = NewsletterSubscriber::prepare_create(input)?;

    match SubscriberRepo::subscribe(state.store(), body).await? {
        SubscribeOutcome::Created(sub) => {
            tracing::info!(subscriber_id = %sub.id, "Newsletter subscriber added");
            Ok((StatusCode::CREATED, Json(ApiResponse::new(sub))))
        }
        SubscribeOutcome::Reactivated(sub) => {
            tracing::info!(subscriber_id = %sub.id, "Newsletter subscriber reactivated");
            Ok((StatusCode::OK, Json(ApiResponse::new(sub))))
        }
        SubscribeOutcome::AlreadyActive(_) => Err(AppError::Core(CoreError::Conflict(
            "This email is already subscribed".into(),
        ))),
    }
}

/// POST /api/v1/newsletter/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    AppJson(input): AppJson<UnsubscribeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    validate_email("Email", &email)?;

    let sub = SubscriberRepo::unsubscribe(state.store(), &email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found(NewsletterSubscriber::ENTITY, email))
        })?;

    tracing::info!(subscriber_id = %sub.id, "Newsletter subscriber opted out");

    Ok(Json(ApiResponse::new(sub)))
}
