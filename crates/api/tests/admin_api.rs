//! Integration tests for the admin CRUD surface and its bearer-token guard.

mod common;

use axum::http::{Method, StatusCode};
use common::body_json;
use serde_json::json;

// ---------------------------------------------------------------------------
// Generic CRUD (exercised through programs)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_metadata() {
    let app = common::build_test_app();
    let response = app
        .post_json(
            "/api/v1/admin/programs",
            json!({"name": "Literacy", "description": "Reading classes", "beneficiaries": 120}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Literacy");
    assert_eq!(json["data"]["status"], "active");
    assert!(json["data"]["id"].is_string());
    assert!(json["data"]["createdAt"].is_string());
    assert!(json["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn list_filters_by_status_and_limit() {
    let app = common::build_test_app();
    for (name, status) in [("A", "active"), ("B", "inactive"), ("C", "active")] {
        app.create(
            "/api/v1/admin/programs",
            json!({"name": name, "description": "x", "status": status}),
        )
        .await;
    }

    let all = body_json(app.get("/api/v1/admin/programs").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);

    let inactive = body_json(app.get("/api/v1/admin/programs?status=inactive").await).await;
    let inactive = inactive["data"].as_array().unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0]["name"], "B");

    let limited = body_json(app.get("/api/v1/admin/programs?limit=2").await).await;
    assert_eq!(limited["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_merges_fields() {
    let app = common::build_test_app();
    let created = app
        .create(
            "/api/v1/admin/programs",
            json!({"name": "Meals", "description": "Hot lunches", "beneficiaries": 40}),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/v1/admin/programs/{id}"),
            json!({"status": "inactive"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "inactive");
    assert_eq!(json["data"]["name"], "Meals");
    assert_eq!(json["data"]["beneficiaries"], 40);
}

#[tokio::test]
async fn update_with_no_fields_returns_400() {
    let app = common::build_test_app();
    let created = app
        .create(
            "/api/v1/admin/programs",
            json!({"name": "Meals", "description": "Hot lunches"}),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put_json(&format!("/api/v1/admin/programs/{id}"), json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_document_returns_404() {
    let app = common::build_test_app();
    let response = app
        .put_json("/api/v1/admin/programs/ghost", json!({"name": "X"}))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_returns_404() {
    let app = common::build_test_app();
    let created = app
        .create(
            "/api/v1/admin/programs",
            json!({"name": "Short-lived", "description": "x"}),
        )
        .await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/admin/programs/{id}");

    let response = app.delete(&uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["deleted"], true);

    assert_eq!(app.get(&uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.delete(&uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_event_disappears_from_public_listing() {
    let app = common::build_test_app();
    let event = app
        .create(
            "/api/v1/admin/events",
            json!({"title": "Bake sale", "date": "2027-04-02", "location": "Library"}),
        )
        .await;
    let id = event["id"].as_str().unwrap();

    let before = body_json(app.get("/api/v1/events").await).await;
    assert_eq!(before["data"].as_array().unwrap().len(), 1);

    let response = app.delete(&format!("/api/v1/admin/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let after = body_json(app.get("/api/v1/events").await).await;
    assert!(after["data"].as_array().unwrap().is_empty());
    assert_eq!(
        app.get(&format!("/api/v1/events/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn invalid_status_value_returns_400() {
    let app = common::build_test_app();
    let response = app
        .post_json(
            "/api/v1/admin/programs",
            json!({"name": "X", "description": "y", "status": "paused"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Collection-specific rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn event_end_date_before_start_is_rejected() {
    let app = common::build_test_app();
    let response = app
        .post_json(
            "/api/v1/admin/events",
            json!({
                "title": "Retreat",
                "date": "2027-05-10",
                "endDate": "2027-05-01",
                "location": "Lakeside",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn publishing_a_post_stamps_published_at() {
    let app = common::build_test_app();
    let draft = app
        .create(
            "/api/v1/admin/blog-posts",
            json!({"title": "Annual report", "content": "Numbers", "author": "Board"}),
        )
        .await;
    assert!(draft["publishedAt"].is_null());
    assert_eq!(draft["slug"], "annual-report");

    let id = draft["id"].as_str().unwrap();
    let published = body_json(
        app.put_json(
            &format!("/api/v1/admin/blog-posts/{id}"),
            json!({"status": "published"}),
        )
        .await,
    )
    .await;
    assert!(published["data"]["publishedAt"].is_string());
}

#[tokio::test]
async fn every_collection_is_mounted() {
    let app = common::build_test_app();
    for collection in [
        "contacts",
        "donations",
        "events",
        "blog-posts",
        "volunteers",
        "volunteer-opportunities",
        "programs",
        "campaigns",
        "gallery",
        "subscribers",
    ] {
        let response = app.get(&format!("/api/v1/admin/{collection}")).await;
        assert_eq!(response.status(), StatusCode::OK, "GET /admin/{collection}");
    }
}

// ---------------------------------------------------------------------------
// Bulk subscriber update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bulk_update_changes_listed_subscribers() {
    let app = common::build_test_app();
    let mut ids = Vec::new();
    for email in ["a@example.org", "b@example.org", "c@example.org"] {
        let sub = app
            .create("/api/v1/admin/subscribers", json!({"email": email}))
            .await;
        ids.push(sub["id"].as_str().unwrap().to_string());
    }

    let response = app
        .post_json(
            "/api/v1/admin/subscribers/bulk-update",
            json!({"ids": [ids[0], ids[1], ids[1], "ghost"], "status": "unsubscribed"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["updated"], 2);

    let active = body_json(app.get("/api/v1/admin/subscribers?status=active").await).await;
    let active = active["data"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["email"], "c@example.org");

    let gone = body_json(app.get(&format!("/api/v1/admin/subscribers/{}", ids[0])).await).await;
    assert!(gone["data"]["unsubscribedAt"].is_string());
}

#[tokio::test]
async fn bulk_update_with_no_ids_returns_400() {
    let app = common::build_test_app();
    let response = app
        .post_json(
            "/api/v1/admin/subscribers/bulk-update",
            json!({"ids": [], "status": "bounced"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Admin guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_token_returns_401() {
    let app = common::build_test_app();
    let response = app
        .send_with_token(Method::GET, "/api/v1/admin/contacts", None, None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let app = common::build_test_app();
    let response = app
        .send_with_token(
            Method::GET,
            "/api/v1/admin/dashboard/stats",
            None,
            Some("guess"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_is_open_when_no_token_configured() {
    let mut config = common::test_config();
    config.admin_token = None;
    let app = common::build_test_app_with(config);

    let response = app
        .send_with_token(Method::GET, "/api/v1/admin/contacts", None, None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}
