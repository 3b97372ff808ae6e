//! Admin dashboard statistics.
//!
//! Month bucketing, growth rates, and the "recent activity" feed. All data is
//! passed in by the caller; nothing here touches the store.

use chrono::{Datelike, Duration, TimeZone, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// Default number of items in the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Month windows
// ---------------------------------------------------------------------------

/// Calendar month boundaries (UTC) around a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub last_month_start: Timestamp,
    pub this_month_start: Timestamp,
    pub next_month_start: Timestamp,
}

impl MonthWindow {
    /// Build the window for the month containing `now`.
    pub fn containing(now: Timestamp) -> Self {
        let (year, month) = (now.year(), now.month());
        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };

        Self {
            last_month_start: month_start(prev_year, prev_month),
            this_month_start: month_start(year, month),
            next_month_start: month_start(next_year, next_month),
        }
    }

    pub fn is_this_month(&self, ts: Timestamp) -> bool {
        ts >= self.this_month_start && ts < self.next_month_start
    }

    pub fn is_last_month(&self, ts: Timestamp) -> bool {
        ts >= self.last_month_start && ts < self.this_month_start
    }
}

fn month_start(year: i32, month: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first day of a calendar month is always a valid UTC instant")
}

/// Count timestamps in the half-open range `[start, end)`.
pub fn count_in_range<I>(timestamps: I, start: Timestamp, end: Timestamp) -> u64
where
    I: IntoIterator<Item = Timestamp>,
{
    timestamps
        .into_iter()
        .filter(|ts| *ts >= start && *ts < end)
        .count() as u64
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Month-over-month percentage change, rounded to one decimal place.
///
/// With no activity last month, any activity this month counts as 100%
/// growth and no activity counts as 0%.
pub fn growth_rate(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    let pct = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// This-month / last-month counts for one collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCounts {
    pub this_month: u64,
    pub last_month: u64,
    pub growth_rate: f64,
}

impl MonthlyCounts {
    pub fn from_timestamps<I>(timestamps: I, window: &MonthWindow) -> Self
    where
        I: IntoIterator<Item = Timestamp>,
    {
        let (mut this_month, mut last_month) = (0u64, 0u64);
        for ts in timestamps {
            if window.is_this_month(ts) {
                this_month += 1;
            } else if window.is_last_month(ts) {
                last_month += 1;
            }
        }
        Self {
            this_month,
            last_month,
            growth_rate: growth_rate(this_month, last_month),
        }
    }
}

// ---------------------------------------------------------------------------
// Relative time
// ---------------------------------------------------------------------------

/// Format the distance between `then` and `now` as "N units ago".
///
/// Timestamps in the future (clock skew) read as "just now".
pub fn relative_time(now: Timestamp, then: Timestamp) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < Duration::minutes(1) {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 30 {
        ago(days, "day")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

// ---------------------------------------------------------------------------
// Recent activity
// ---------------------------------------------------------------------------

/// Source collection of an activity item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Contact,
    Donation,
    Volunteer,
    Subscriber,
    Event,
}

/// One entry in the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: Timestamp,
}

/// [`ActivityItem`] with its display-ready relative time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    #[serde(flatten)]
    pub item: ActivityItem,
    pub relative_time: String,
}

/// Merge per-collection activity lists, newest first, keeping at most `limit`.
///
/// The sort is stable, so items with equal timestamps keep the order of the
/// input lists.
pub fn merge_recent<I>(lists: I, limit: usize) -> Vec<ActivityItem>
where
    I: IntoIterator<Item = Vec<ActivityItem>>,
{
    let mut merged: Vec<ActivityItem> = lists.into_iter().flatten().collect();
    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged.truncate(limit);
    merged
}

/// Attach relative times to merged activity items.
pub fn to_entries(items: Vec<ActivityItem>, now: Timestamp) -> Vec<ActivityEntry> {
    items
        .into_iter()
        .map(|item| {
            let relative_time = relative_time(now, item.timestamp);
            ActivityEntry {
                item,
                relative_time,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
