//! Handler for the admin dashboard summary.
//!
//! The store snapshot is loaded once and every figure is derived from it in
//! memory by [`compute_stats`].

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use kindred_core::dashboard::{
    merge_recent, to_entries, ActivityEntry, ActivityItem, ActivityKind, MonthWindow,
    MonthlyCounts, RECENT_ACTIVITY_LIMIT,
};
use kindred_core::status::{
    ApplicationStatus, ContactStatus, DonationStatus, EventStatus, SubscriberStatus,
};
use kindred_core::types::Timestamp;
use kindred_db::models::Document;
use kindred_db::repositories::{DashboardRepo, DashboardSnapshot};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTotals {
    pub contacts: u64,
    pub donations: u64,
    pub volunteers: u64,
    pub subscribers: u64,
    pub events: u64,
    pub blog_posts: u64,
    pub programs: u64,
    pub campaigns: u64,
    pub gallery_items: u64,
    pub opportunities: u64,
}

/// Money figures only count completed donations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub total_raised: f64,
    pub raised_this_month: f64,
    pub completed_count: u64,
    pub pending_count: u64,
    pub average_donation: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthStats {
    pub contacts: MonthlyCounts,
    pub donations: MonthlyCounts,
    pub volunteers: MonthlyCounts,
    pub subscribers: MonthlyCounts,
}

/// Items waiting on an admin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingWork {
    pub new_contacts: u64,
    pub pending_volunteers: u64,
    pub pending_donations: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub totals: CollectionTotals,
    pub donations: DonationSummary,
    pub growth: GrowthStats,
    pub pending: PendingWork,
    pub upcoming_events: u64,
    pub active_subscribers: u64,
    pub recent_activity: Vec<ActivityEntry>,
    pub generated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn created_stamps<T: Document>(docs: &[T]) -> Vec<Timestamp> {
    docs.iter().map(|d| d.created_at()).collect()
}

fn count_matching<T>(docs: &[T], pred: impl Fn(&T) -> bool) -> u64 {
    docs.iter().filter(|d| pred(d)).count() as u64
}

/// Activity items for the newest `RECENT_ACTIVITY_LIMIT` documents of one list.
fn recent<T, F>(docs: &[T], to_item: F) -> Vec<ActivityItem>
where
    T: Document,
    F: Fn(&T) -> ActivityItem,
{
    let mut items: Vec<ActivityItem> = docs.iter().map(to_item).collect();
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(RECENT_ACTIVITY_LIMIT);
    items
}

fn recent_activity(snapshot: &DashboardSnapshot, now: Timestamp) -> Vec<ActivityEntry> {
    let contacts = recent(&snapshot.contacts, |c| ActivityItem {
        kind: ActivityKind::Contact,
        title: "New contact message".into(),
        description: format!("{}: {}", c.name, c.subject),
        timestamp: c.created_at,
    });
    let donations = recent(&snapshot.donations, |d| {
        let donor = if d.anonymous {
            "Anonymous"
        } else {
            d.donor_name.as_str()
        };
        ActivityItem {
            kind: ActivityKind::Donation,
            title: "Donation received".into(),
            description: format!("{donor} gave {:.2} {}", d.amount, d.currency),
            timestamp: d.created_at,
        }
    });
    let volunteers = recent(&snapshot.volunteers, |v| ActivityItem {
        kind: ActivityKind::Volunteer,
        title: "New volunteer application".into(),
        description: format!("{} applied to volunteer", v.name),
        timestamp: v.created_at,
    });
    let subscribers = recent(&snapshot.subscribers, |s| ActivityItem {
        kind: ActivityKind::Subscriber,
        title: "New newsletter subscriber".into(),
        description: s.email.clone(),
        timestamp: s.created_at,
    });
    let events = recent(&snapshot.events, |e| ActivityItem {
        kind: ActivityKind::Event,
        title: "Event scheduled".into(),
        description: format!("{} on {}", e.title, e.date),
        timestamp: e.created_at,
    });

    let merged = merge_recent(
        [contacts, donations, volunteers, subscribers, events],
        RECENT_ACTIVITY_LIMIT,
    );
    to_entries(merged, now)
}

/// Derive every dashboard figure from a store snapshot.
pub fn compute_stats(snapshot: &DashboardSnapshot, now: Timestamp) -> DashboardStats {
    let window = MonthWindow::containing(now);
    let today = now.date_naive();

    let completed: Vec<_> = snapshot
        .donations
        .iter()
        .filter(|d| d.status == DonationStatus::Completed)
        .collect();
    let total_raised: f64 = completed.iter().map(|d| d.amount).sum();
    let raised_this_month: f64 = completed
        .iter()
        .filter(|d| window.is_this_month(d.created_at))
        .map(|d| d.amount)
        .sum();
    let completed_count = completed.len() as u64;
    let average_donation = if completed_count == 0 {
        0.0
    } else {
        total_raised / completed_count as f64
    };

    DashboardStats {
        totals: CollectionTotals {
            contacts: snapshot.contacts.len() as u64,
            donations: snapshot.donations.len() as u64,
            volunteers: snapshot.volunteers.len() as u64,
            subscribers: snapshot.subscribers.len() as u64,
            events: snapshot.events.len() as u64,
            blog_posts: snapshot.blog_posts,
            programs: snapshot.programs,
            campaigns: snapshot.campaigns,
            gallery_items: snapshot.gallery_items,
            opportunities: snapshot.opportunities,
        },
        donations: DonationSummary {
            total_raised: round_money(total_raised),
            raised_this_month: round_money(raised_this_month),
            completed_count,
            pending_count: count_matching(&snapshot.donations, |d| {
                d.status == DonationStatus::Pending
            }),
            average_donation: round_money(average_donation),
        },
        growth: GrowthStats {
            contacts: MonthlyCounts::from_timestamps(created_stamps(&snapshot.contacts), &window),
            donations: MonthlyCounts::from_timestamps(
                created_stamps(&snapshot.donations),
                &window,
            ),
            volunteers: MonthlyCounts::from_timestamps(
                created_stamps(&snapshot.volunteers),
                &window,
            ),
            subscribers: MonthlyCounts::from_timestamps(
                created_stamps(&snapshot.subscribers),
                &window,
            ),
        },
        pending: PendingWork {
            new_contacts: count_matching(&snapshot.contacts, |c| c.status == ContactStatus::New),
            pending_volunteers: count_matching(&snapshot.volunteers, |v| {
                v.status == ApplicationStatus::Pending
            }),
            pending_donations: count_matching(&snapshot.donations, |d| {
                d.status == DonationStatus::Pending
            }),
        },
        upcoming_events: count_matching(&snapshot.events, |e| {
            e.status == EventStatus::Upcoming && e.date >= today
        }),
        active_subscribers: count_matching(&snapshot.subscribers, |s| {
            s.status == SubscriberStatus::Active
        }),
        recent_activity: recent_activity(snapshot, now),
        generated_at: now,
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/dashboard/stats
pub async fn stats(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let snapshot = DashboardRepo::load_snapshot(state.store()).await?;
    let stats = compute_stats(&snapshot, Utc::now());

    Ok(Json(ApiResponse::new(stats)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
