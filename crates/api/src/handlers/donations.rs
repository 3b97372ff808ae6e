//! Donation checkout and payment callbacks.
//!
//! Checkout creates a pending donation and hands the browser everything the
//! hosted payment widget needs. The widget reports back through `verify`,
//! which settles the donation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kindred_core::error::CoreError;
use kindred_core::payment::generate_tx_ref;
use kindred_core::status::{CampaignStatus, DonationFrequency, DonationStatus};
use kindred_db::models::campaign::Campaign;
use kindred_db::models::donation::{CreateDonation, Donation, UpdateDonation};
use kindred_db::models::Document;
use kindred_db::repositories::{DocumentRepo, DonationRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1, max = 100, message = "Donor name must be 1-100 characters"))]
    pub donor_name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    pub amount: f64,
    pub currency: Option<String>,
    pub frequency: Option<DonationFrequency>,
    pub campaign_id: Option<String>,
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCustomer {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Configuration for the hosted checkout widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    pub public_key: String,
    pub tx_ref: String,
    pub amount: f64,
    pub currency: String,
    pub customer: CheckoutCustomer,
    pub title: String,
    pub description: String,
    pub donation_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub tx_ref: String,
    pub transaction_id: Option<String>,
    /// Status string reported by the payment widget.
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub donation_id: String,
    pub tx_ref: String,
    pub status: DonationStatus,
}

/// Map a widget callback status onto a donation outcome.
fn callback_status(raw: &str) -> Result<DonationStatus, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "successful" | "success" | "completed" => Ok(DonationStatus::Completed),
        "failed" | "cancelled" | "canceled" => Ok(DonationStatus::Failed),
        other => Err(CoreError::Validation(format!(
            "Unknown payment status '{other}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/donations/checkout
pub async fn checkout(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    let payment = &state.config.payment;

    if let Some(campaign_id) = input.campaign_id.as_deref() {
        let campaign = DocumentRepo::find_by_id::<Campaign>(state.store(), campaign_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::not_found(Campaign::ENTITY, campaign_id)))?;
        if campaign.status != CampaignStatus::Active {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Campaign '{}' is not accepting donations",
                campaign.title
            ))));
        }
    }

    let tx_ref = generate_tx_ref(&payment.tx_prefix, Utc::now());
    let create = CreateDonation {
        donor_name: input.donor_name,
        email: input.email,
        phone: input.phone,
        amount: input.amount,
        currency: input
            .currency
            .unwrap_or_else(|| payment.default_currency.clone()),
        frequency: input.frequency,
        campaign_id: input.campaign_id,
        message: input.message,
        anonymous: input.anonymous,
        tx_ref: Some(tx_ref.clone()),
        transaction_id: None,
        status: Some(DonationStatus::Pending),
    };

    let body = Donation::prepare_create(create)?;
    let donation = DocumentRepo::insert::<Donation>(state.store(), body).await?;

    tracing::info!(
        donation_id = %donation.id,
        tx_ref = %tx_ref,
        amount = donation.amount,
        currency = %donation.currency,
        "Checkout started",
    );

    let organization = &state.config.organization_name;
    let config = CheckoutConfig {
        public_key: payment.public_key.clone(),
        tx_ref,
        amount: donation.amount,
        currency: donation.currency,
        customer: CheckoutCustomer {
            email: donation.email,
            name: donation.donor_name,
            phone: donation.phone,
        },
        title: organization.clone(),
        description: format!("Donation to {organization}"),
        donation_id: donation.id,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(config))))
}

/// POST /api/v1/donations/verify
///
/// Callback from the payment widget. Settling is idempotent: a donation that
/// is already completed stays completed.
///
/// Unauthenticated. The reported `status` is trusted as-is and is not checked
/// against the payment provider, so anyone holding a `txRef` can settle its
/// donation.
pub async fn verify(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyRequest>,
) -> AppResult<impl IntoResponse> {
    if input.tx_ref.trim().is_empty() {
        return Err(AppError::BadRequest("txRef is required".into()));
    }
    let status = callback_status(&input.status)?;

    let outcome = DonationRepo::record_outcome(
        state.store(),
        &input.tx_ref,
        input.transaction_id.as_deref(),
        status,
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found(Donation::ENTITY, input.tx_ref.clone())))?;

    tracing::info!(
        donation_id = %outcome.donation.id,
        tx_ref = %input.tx_ref,
        status = %outcome.donation.status,
        newly_completed = outcome.newly_completed,
        "Donation callback recorded",
    );

    Ok(Json(ApiResponse::new(VerifyResponse {
        donation_id: outcome.donation.id,
        tx_ref: input.tx_ref,
        status: outcome.donation.status,
    })))
}

/// POST /api/v1/admin/donations
///
/// Admin entry of a donation. A donation created as completed is credited to
/// its campaign straight away.
pub async fn admin_create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateDonation>,
) -> AppResult<impl IntoResponse> {
    let body = Donation::prepare_create(input)?;
    let donation = DocumentRepo::insert::<Donation>(state.store(), body).await?;
    let donation = DonationRepo::credit_campaign(state.store(), donation).await?;

    tracing::info!(donation_id = %donation.id, status = %donation.status, "Donation created");

    Ok((StatusCode::CREATED, Json(ApiResponse::new(donation))))
}

/// PUT /api/v1/admin/donations/{id}
///
/// Like the generic admin update, but completing a donation here credits its
/// campaign the same way a checkout callback does.
pub async fn admin_update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateDonation>,
) -> AppResult<impl IntoResponse> {
    let current = DocumentRepo::find_by_id::<Donation>(state.store(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(Donation::ENTITY, id.clone())))?;

    let patch = Donation::prepare_update(input, &current)?;
    let donation = DocumentRepo::update::<Donation>(state.store(), &id, patch)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(Donation::ENTITY, id.clone())))?;
    let donation = DonationRepo::credit_campaign(state.store(), donation).await?;

    tracing::info!(donation_id = %id, status = %donation.status, "Donation updated");

    Ok(Json(ApiResponse::new(donation)))
}
