//! Routes for the public website.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    blog, campaigns, contact, donations, events, gallery, newsletter, programs, volunteers,
};
use crate::state::AppState;

/// Contact form, mounted at `/contact`.
///
/// ```text
/// POST /  -> submit
/// ```
pub fn contact_router() -> Router<AppState> {
    Router::new().route("/", post(contact::submit))
}

/// Events, mounted at `/events`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get
/// ```
pub fn events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list))
        .route("/{id}", get(events::get))
}

/// Programs, mounted at `/programs`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get
/// ```
pub fn programs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(programs::list))
        .route("/{id}", get(programs::get))
}

/// Volunteering, mounted at `/volunteer`.
///
/// ```text
/// GET  /opportunities       -> list_opportunities
/// GET  /opportunities/{id}  -> get_opportunity
/// POST /applications        -> apply
/// ```
pub fn volunteer_router() -> Router<AppState> {
    Router::new()
        .route("/opportunities", get(volunteers::list_opportunities))
        .route("/opportunities/{id}", get(volunteers::get_opportunity))
        .route("/applications", post(volunteers::apply))
}

/// Blog, mounted at `/blog`.
///
/// ```text
/// GET /        -> list
/// GET /{slug}  -> get_by_slug
/// ```
pub fn blog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list))
        .route("/{slug}", get(blog::get_by_slug))
}

/// Gallery, mounted at `/gallery`.
pub fn gallery_router() -> Router<AppState> {
    Router::new().route("/", get(gallery::list))
}

/// Campaigns, mounted at `/campaigns`.
///
/// ```text
/// GET /      -> list
/// GET /{id}  -> get
/// ```
pub fn campaigns_router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaigns::list))
        .route("/{id}", get(campaigns::get))
}

/// Newsletter, mounted at `/newsletter`.
///
/// ```text
/// POST /subscribe    -> subscribe
/// POST /unsubscribe  -> unsubscribe
/// ```
pub fn newsletter_router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
}

/// Donations, mounted at `/donations`.
///
/// ```text
/// POST /checkout  -> checkout
/// POST /verify    -> verify
/// ```
pub fn donations_router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(donations::checkout))
        .route("/verify", post(donations::verify))
}
