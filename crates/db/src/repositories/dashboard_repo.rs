//! Loads everything the admin dashboard statistics are computed from.

use super::DocumentRepo;
use crate::models::blog_post::BlogPost;
use crate::models::campaign::Campaign;
use crate::models::contact::Contact;
use crate::models::donation::Donation;
use crate::models::event::Event;
use crate::models::gallery::GalleryItem;
use crate::models::program::Program;
use crate::models::subscriber::NewsletterSubscriber;
use crate::models::volunteer::{VolunteerApplication, VolunteerOpportunity};
use crate::store::{DocumentStore, ListQuery, StoreError};

/// Full contents of the collections the dashboard buckets by date, plus
/// plain counts for the rest.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub contacts: Vec<Contact>,
    pub donations: Vec<Donation>,
    pub volunteers: Vec<VolunteerApplication>,
    pub subscribers: Vec<NewsletterSubscriber>,
    pub events: Vec<Event>,
    pub blog_posts: u64,
    pub programs: u64,
    pub campaigns: u64,
    pub gallery_items: u64,
    pub opportunities: u64,
}

pub struct DashboardRepo;

impl DashboardRepo {
    /// Load the snapshot, querying collections concurrently.
    pub async fn load_snapshot(store: &dyn DocumentStore) -> Result<DashboardSnapshot, StoreError> {
        let all = ListQuery::new();
        let (contacts, donations, volunteers, subscribers, events) = tokio::try_join!(
            DocumentRepo::list::<Contact>(store, &all),
            DocumentRepo::list::<Donation>(store, &all),
            DocumentRepo::list::<VolunteerApplication>(store, &all),
            DocumentRepo::list::<NewsletterSubscriber>(store, &all),
            DocumentRepo::list::<Event>(store, &all),
        )?;
        let (blog_posts, programs, campaigns, gallery_items, opportunities) = tokio::try_join!(
            DocumentRepo::count::<BlogPost>(store, &all),
            DocumentRepo::count::<Program>(store, &all),
            DocumentRepo::count::<Campaign>(store, &all),
            DocumentRepo::count::<GalleryItem>(store, &all),
            DocumentRepo::count::<VolunteerOpportunity>(store, &all),
        )?;

        tracing::debug!(
            contacts = contacts.len(),
            donations = donations.len(),
            volunteers = volunteers.len(),
            subscribers = subscribers.len(),
            events = events.len(),
            "Dashboard snapshot loaded",
        );

        Ok(DashboardSnapshot {
            contacts,
            donations,
            volunteers,
            subscribers,
            events,
            blog_posts,
            programs,
            campaigns,
            gallery_items,
            opportunities,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::Document;
    use crate::store::MemoryDocumentStore;

    #[tokio::test]
    async fn snapshot_counts_every_collection() {
        let store = MemoryDocumentStore::new();
        store
            .insert(
                Contact::COLLECTION,
                json!({"name": "A", "email": "a@x.org", "subject": "s", "message": "m"}),
            )
            .await
            .unwrap();
        store
            .insert(Program::COLLECTION, json!({"name": "P"}))
            .await
            .unwrap();
        store
            .insert(
                GalleryItem::COLLECTION,
                json!({"title": "G", "imageUrl": "https://img/g.jpg"}),
            )
            .await
            .unwrap();

        let snap = DashboardRepo::load_snapshot(&store).await.unwrap();
        assert_eq!(snap.contacts.len(), 1);
        assert_eq!(snap.programs, 1);
        assert_eq!(snap.gallery_items, 1);
        assert!(snap.donations.is_empty());
    }
}
