//! Newsletter subscriber lookups and bulk status changes.

use chrono::Utc;
use kindred_core::status::SubscriberStatus;
use kindred_core::types::DocId;
use serde_json::{json, Value};

use super::DocumentRepo;
use crate::models::subscriber::NewsletterSubscriber;
use crate::models::Document;
use crate::store::{DocumentStore, ListQuery, StoreError};

/// Provides data access for newsletter subscribers beyond plain CRUD.
pub struct SubscriberRepo;

/// Result of [`SubscriberRepo::subscribe`].
#[derive(Debug, Clone)]
pub enum SubscribeOutcome {
    /// First signup for this address.
    Created(NewsletterSubscriber),
    /// A previously unsubscribed or bounced address was switched back on.
    Reactivated(NewsletterSubscriber),
    /// The address is already an active subscriber; nothing changed.
    AlreadyActive(NewsletterSubscriber),
}

/// Patch moving a subscriber to `status`, stamping `unsubscribedAt` when
/// leaving and clearing it when coming back.
fn status_patch(status: SubscriberStatus) -> Value {
    let unsubscribed_at = match status {
        SubscriberStatus::Unsubscribed => json!(Utc::now()),
        _ => Value::Null,
    };
    json!({
        "status": status,
        "unsubscribedAt": unsubscribed_at,
    })
}

impl SubscriberRepo {
    /// Find a subscriber by (already normalized) email address.
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, StoreError> {
        let query = ListQuery::new().filter("email", email).limit(Some(1));
        Ok(DocumentRepo::list::<NewsletterSubscriber>(store, &query)
            .await?
            .into_iter()
            .next())
    }

    /// Subscribe the address in a prepared subscriber body.
    ///
    /// Known addresses are reused instead of duplicated.
    pub async fn subscribe(
        store: &dyn DocumentStore,
        body: Value,
    ) -> Result<SubscribeOutcome, StoreError> {
        let email = body
            .get("email")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::InvalidDocument("subscriber has no email".into()))?
            .to_string();

        match Self::find_by_email(store, &email).await? {
            Some(existing) if existing.status == SubscriberStatus::Active => {
                Ok(SubscribeOutcome::AlreadyActive(existing))
            }
            Some(existing) => {
                let updated = Self::set_status(store, &existing.id, SubscriberStatus::Active)
                    .await?
                    .unwrap_or(existing);
                Ok(SubscribeOutcome::Reactivated(updated))
            }
            None => Ok(SubscribeOutcome::Created(DocumentRepo::insert(store, body).await?)),
        }
    }

    /// Unsubscribe by email. Returns `None` for unknown addresses.
    pub async fn unsubscribe(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<NewsletterSubscriber>, StoreError> {
        let Some(existing) = Self::find_by_email(store, email).await? else {
            return Ok(None);
        };
        if existing.status == SubscriberStatus::Unsubscribed {
            return Ok(Some(existing));
        }
        Self::set_status(store, &existing.id, SubscriberStatus::Unsubscribed).await
    }

    /// Change one subscriber's status.
    pub async fn set_status(
        store: &dyn DocumentStore,
        id: &str,
        status: SubscriberStatus,
    ) -> Result<Option<NewsletterSubscriber>, StoreError> {
        DocumentRepo::update::<NewsletterSubscriber>(store, id, status_patch(status)).await
    }

    /// Set the status of many subscribers in one atomic batch.
    ///
    /// Returns the number of subscribers updated; unknown ids are skipped.
    pub async fn bulk_update_status(
        store: &dyn DocumentStore,
        ids: &[DocId],
        status: SubscriberStatus,
    ) -> Result<u64, StoreError> {
        store
            .update_many(NewsletterSubscriber::COLLECTION, ids, status_patch(status))
            .await
    }
}
