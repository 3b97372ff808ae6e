//! Donation lookups and campaign totals.

use kindred_core::status::DonationStatus;
use serde_json::{json, Map, Value};

use super::DocumentRepo;
use crate::models::campaign::Campaign;
use crate::models::donation::Donation;
use crate::store::{DocumentStore, ListQuery, StoreError};

/// Provides data access for donations beyond plain CRUD.
pub struct DonationRepo;

/// Result of [`DonationRepo::record_outcome`].
#[derive(Debug, Clone)]
pub struct RecordedOutcome {
    pub donation: Donation,
    /// `true` only on the call that moved the donation to `completed`.
    pub newly_completed: bool,
}

impl DonationRepo {
    /// Find the donation created for a checkout transaction reference.
    pub async fn find_by_tx_ref(
        store: &dyn DocumentStore,
        tx_ref: &str,
    ) -> Result<Option<Donation>, StoreError> {
        let query = ListQuery::new().filter("txRef", tx_ref).limit(Some(1));
        Ok(DocumentRepo::list::<Donation>(store, &query)
            .await?
            .into_iter()
            .next())
    }

    /// Apply a checkout callback to the donation behind `tx_ref`.
    ///
    /// A completed donation is final: repeated callbacks leave it untouched.
    /// The first transition to `completed` credits the linked campaign.
    /// Returns `None` for unknown references.
    pub async fn record_outcome(
        store: &dyn DocumentStore,
        tx_ref: &str,
        transaction_id: Option<&str>,
        status: DonationStatus,
    ) -> Result<Option<RecordedOutcome>, StoreError> {
        let Some(donation) = Self::find_by_tx_ref(store, tx_ref).await? else {
            return Ok(None);
        };

        if donation.status == DonationStatus::Completed {
            return Ok(Some(RecordedOutcome {
                donation,
                newly_completed: false,
            }));
        }

        let mut patch = Map::new();
        patch.insert("status".into(), json!(status));
        if let Some(id) = transaction_id {
            patch.insert("transactionId".into(), json!(id));
        }
        let updated = DocumentRepo::update::<Donation>(store, &donation.id, Value::Object(patch))
            .await?
            .unwrap_or(donation);

        let newly_completed = status == DonationStatus::Completed;
        let updated = Self::credit_campaign(store, updated).await?;

        Ok(Some(RecordedOutcome {
            donation: updated,
            newly_completed,
        }))
    }

    /// Add a completed donation to its campaign's total, at most once.
    ///
    /// Every path that can complete a donation (checkout callbacks and admin
    /// writes) goes through here. Donations that are not completed, carry no
    /// campaign, or were already credited are returned unchanged.
    pub async fn credit_campaign(
        store: &dyn DocumentStore,
        donation: Donation,
    ) -> Result<Donation, StoreError> {
        if donation.status != DonationStatus::Completed || donation.campaign_credited {
            return Ok(donation);
        }
        let Some(campaign_id) = donation.campaign_id.as_deref() else {
            return Ok(donation);
        };

        if Self::add_to_campaign(store, campaign_id, donation.amount)
            .await?
            .is_none()
        {
            tracing::warn!(
                campaign_id,
                donation_id = %donation.id,
                "Completed donation references a missing campaign",
            );
            return Ok(donation);
        }

        let credited = DocumentRepo::update::<Donation>(
            store,
            &donation.id,
            json!({ "campaignCredited": true }),
        )
        .await?;
        Ok(credited.unwrap_or(donation))
    }

    /// Add `amount` to a campaign's `raisedAmount`.
    ///
    /// This is a read-then-write; concurrent completions for the same
    /// campaign can race. Returns `None` if the campaign does not exist.
    pub async fn add_to_campaign(
        store: &dyn DocumentStore,
        campaign_id: &str,
        amount: f64,
    ) -> Result<Option<Campaign>, StoreError> {
        let Some(campaign) = DocumentRepo::find_by_id::<Campaign>(store, campaign_id).await? else {
            return Ok(None);
        };
        let raised = campaign.raised_amount + amount;
        DocumentRepo::update::<Campaign>(store, campaign_id, json!({ "raisedAmount": raised }))
            .await
    }
}
