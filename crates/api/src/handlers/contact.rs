//! Handler for the public contact form.

use axum::extract::State;
use axum::Json;
use kindred_db::models::contact::{Contact, CreateContact};
use kindred_db::models::Document;
use kindred_db::repositories::DocumentRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub contact_id: String,
}

/// POST /api/v1/contact
///
/// Store a contact form submission. Triage fields are always reset to their
/// defaults; only admins may set them. Responds 200 with the new id.
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(mut input): ValidatedJson<CreateContact>,
) -> AppResult<Json<ApiResponse<ContactReceipt>>> {
    input.status = None;
    input.priority = None;

    let body = Contact::prepare_create(input)?;
    let contact = DocumentRepo::insert::<Contact>(state.store(), body).await?;

    tracing::info!(contact_id = %contact.id, "Contact form submitted");

    Ok(Json(ApiResponse::new(ContactReceipt {
        contact_id: contact.id,
    })))
}
