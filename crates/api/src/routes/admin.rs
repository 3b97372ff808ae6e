//! Admin routes, mounted at `/admin`.

use axum::routing::{get, post};
use axum::Router;
use kindred_db::models::blog_post::BlogPost;
use kindred_db::models::campaign::Campaign;
use kindred_db::models::contact::Contact;
use kindred_db::models::donation::Donation;
use kindred_db::models::event::Event;
use kindred_db::models::gallery::GalleryItem;
use kindred_db::models::program::Program;
use kindred_db::models::subscriber::NewsletterSubscriber;
use kindred_db::models::volunteer::{VolunteerApplication, VolunteerOpportunity};
use kindred_db::models::Document;

use crate::handlers::{admin_crud, dashboard, donations, subscribers};
use crate::state::AppState;

/// CRUD routes for one collection.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get
/// PUT    /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn crud_router<T: Document>() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_crud::list::<T>).post(admin_crud::create::<T>))
        .route(
            "/{id}",
            get(admin_crud::get::<T>)
                .put(admin_crud::update::<T>)
                .delete(admin_crud::delete::<T>),
        )
}

/// Donation CRUD. Writes go through the donation handlers so that completing
/// a donation credits its campaign.
fn donations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(admin_crud::list::<Donation>).post(donations::admin_create),
        )
        .route(
            "/{id}",
            get(admin_crud::get::<Donation>)
                .put(donations::admin_update)
                .delete(admin_crud::delete::<Donation>),
        )
}

/// Every admin route.
///
/// ```text
/// /contacts                   CRUD
/// /donations                  CRUD (completion credits the campaign)
/// /events                     CRUD
/// /blog-posts                 CRUD
/// /volunteers                 CRUD (applications)
/// /volunteer-opportunities    CRUD
/// /programs                   CRUD
/// /campaigns                  CRUD
/// /gallery                    CRUD
/// /subscribers                CRUD
/// /subscribers/bulk-update    set status of many subscribers (POST)
/// /dashboard/stats            dashboard summary (GET)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/contacts", crud_router::<Contact>())
        .nest("/donations", donations_router())
        .nest("/events", crud_router::<Event>())
        .nest("/blog-posts", crud_router::<BlogPost>())
        .nest("/volunteers", crud_router::<VolunteerApplication>())
        .nest(
            "/volunteer-opportunities",
            crud_router::<VolunteerOpportunity>(),
        )
        .nest("/programs", crud_router::<Program>())
        .nest("/campaigns", crud_router::<Campaign>())
        .nest("/gallery", crud_router::<GalleryItem>())
        .nest(
            "/subscribers",
            crud_router::<NewsletterSubscriber>()
                .route("/bulk-update", post(subscribers::bulk_update)),
        )
        .route("/dashboard/stats", get(dashboard::stats))
}
