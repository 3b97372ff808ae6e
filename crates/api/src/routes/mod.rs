pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /contact                                         contact form (POST)
///
/// /events                                          list upcoming events
/// /events/{id}                                     get event
///
/// /programs                                        list active programs
/// /programs/{id}                                   get program
///
/// /volunteer/opportunities                         list open opportunities
/// /volunteer/opportunities/{id}                    get opportunity
/// /volunteer/applications                          apply (POST)
///
/// /blog                                            list published posts
/// /blog/{slug}                                     get post by slug
///
/// /gallery                                         list gallery items
///
/// /campaigns                                       list active campaigns
/// /campaigns/{id}                                  get campaign
///
/// /newsletter/subscribe                            subscribe (POST)
/// /newsletter/unsubscribe                          unsubscribe (POST)
///
/// /donations/checkout                              start checkout (POST)
/// /donations/verify                                payment callback (POST)
///
/// /admin/...                                       see routes::admin (bearer token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/contact", public::contact_router())
        .nest("/events", public::events_router())
        .nest("/programs", public::programs_router())
        .nest("/volunteer", public::volunteer_router())
        .nest("/blog", public::blog_router())
        .nest("/gallery", public::gallery_router())
        .nest("/campaigns", public::campaigns_router())
        .nest("/newsletter", public::newsletter_router())
        .nest("/donations", public::donations_router())
        .nest("/admin", admin::router())
        .fallback(handlers::route_not_found)
}
