//! Donations recorded through checkout or entered by admins (`donations`).

use kindred_core::error::CoreError;
use kindred_core::payment::{validate_amount, validate_currency};
use kindred_core::status::{DonationFrequency, DonationStatus};
use kindred_core::types::{DocId, Timestamp};
use kindred_core::validation::{normalize_email, require_non_empty, validate_dto};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::{to_body, to_patch, Document};

/// Currency used when a payload does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DocId,
    pub donor_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub frequency: DonationFrequency,
    #[serde(default)]
    pub campaign_id: Option<DocId>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    /// Reference handed to the checkout widget.
    #[serde(default)]
    pub tx_ref: Option<String>,
    /// Provider-side transaction id reported by the checkout callback.
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: DonationStatus,
    /// Set once the amount has been added to the linked campaign's total.
    #[serde(default)]
    pub campaign_credited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonation {
    #[validate(length(min = 1, max = 100, message = "Donor name must be 1-100 characters"))]
    pub donor_name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub frequency: Option<DonationFrequency>,
    pub campaign_id: Option<DocId>,
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    pub tx_ref: Option<String>,
    pub transaction_id: Option<String>,
    pub status: Option<DonationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonation {
    #[validate(length(min = 1, max = 100, message = "Donor name must be 1-100 characters"))]
    pub donor_name: Option<String>,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub frequency: Option<DonationFrequency>,
    pub campaign_id: Option<DocId>,
    pub message: Option<String>,
    pub anonymous: Option<bool>,
    pub transaction_id: Option<String>,
    pub status: Option<DonationStatus>,
}

impl Document for Donation {
    const COLLECTION: &'static str = "donations";
    const ENTITY: &'static str = "Donation";

    type Create = CreateDonation;
    type Update = UpdateDonation;

    fn prepare_create(mut input: CreateDonation) -> Result<Value, CoreError> {
        input.email = normalize_email(&input.email);
        input.currency = input.currency.trim().to_ascii_uppercase();
        validate_dto(&input)?;
        require_non_empty("Donor name", &input.donor_name)?;
        validate_amount(input.amount)?;
        validate_currency(&input.currency)?;

        input.frequency.get_or_insert_with(DonationFrequency::default);
        input.status.get_or_insert_with(DonationStatus::default);
        to_body(&input)
    }

    fn prepare_update(mut input: UpdateDonation, _current: &Self) -> Result<Value, CoreError> {
        input.email = input.email.as_deref().map(normalize_email);
        input.currency = input.currency.map(|c| c.trim().to_ascii_uppercase());
        validate_dto(&input)?;
        if let Some(amount) = input.amount {
            validate_amount(amount)?;
        }
        if let Some(currency) = &input.currency {
            validate_currency(currency)?;
        }
        to_patch(&input)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn pledge(amount: f64) -> CreateDonation {
        CreateDonation {
            donor_name: "Grace".into(),
            email: "grace@example.org".into(),
            phone: None,
            amount,
            currency: "usd".into(),
            frequency: None,
            campaign_id: None,
            message: None,
            anonymous: false,
            tx_ref: None,
            transaction_id: None,
            status: None,
        }
    }

    #[test]
    fn create_defaults_to_pending_one_time() {
        let body = Donation::prepare_create(pledge(50.0)).unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["frequency"], "one_time");
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["donorName"], "Grace");
    }

    #[test]
    fn create_rejects_non_positive_amount() {
        assert_matches!(
            Donation::prepare_create(pledge(0.0)),
            Err(CoreError::Validation(_))
        );
    }
}
