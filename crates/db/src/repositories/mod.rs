//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&dyn DocumentStore` as the first argument.

pub mod blog_post_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod donation_repo;
pub mod subscriber_repo;

pub use blog_post_repo::BlogPostRepo;
pub use dashboard_repo::{DashboardRepo, DashboardSnapshot};
pub use document_repo::DocumentRepo;
pub use donation_repo::{DonationRepo, RecordedOutcome};
pub use subscriber_repo::{SubscribeOutcome, SubscriberRepo};
