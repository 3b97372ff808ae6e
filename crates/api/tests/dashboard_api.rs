//! Integration tests for the admin dashboard summary.

mod common;

use axum::http::StatusCode;
use common::body_json;
use serde_json::json;

#[tokio::test]
async fn empty_store_reports_zeroes() {
    let app = common::build_test_app();
    let response = app.get("/api/v1/admin/dashboard/stats").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["totals"]["contacts"], 0);
    assert_eq!(data["donations"]["totalRaised"], 0.0);
    assert_eq!(data["growth"]["contacts"]["growthRate"], 0.0);
    assert!(data["recentActivity"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn stats_reflect_new_activity() {
    let app = common::build_test_app();

    app.create(
        "/api/v1/contact",
        json!({
            "name": "Ada",
            "email": "ada@example.org",
            "subject": "Hi",
            "message": "Hello there",
        }),
    )
    .await;
    app.create(
        "/api/v1/newsletter/subscribe",
        json!({"email": "reader@example.org"}),
    )
    .await;
    let checkout = app
        .create(
            "/api/v1/donations/checkout",
            json!({"donorName": "Grace", "email": "grace@example.org", "amount": 40.0}),
        )
        .await;
    app.post_json(
        "/api/v1/donations/verify",
        json!({"txRef": checkout["txRef"], "status": "successful"}),
    )
    .await;
    app.create(
        "/api/v1/admin/programs",
        json!({"name": "Literacy", "description": "Reading"}),
    )
    .await;

    let json = body_json(app.get("/api/v1/admin/dashboard/stats").await).await;
    let data = &json["data"];

    assert_eq!(data["totals"]["contacts"], 1);
    assert_eq!(data["totals"]["subscribers"], 1);
    assert_eq!(data["totals"]["donations"], 1);
    assert_eq!(data["totals"]["programs"], 1);

    assert_eq!(data["donations"]["totalRaised"], 40.0);
    assert_eq!(data["donations"]["raisedThisMonth"], 40.0);
    assert_eq!(data["donations"]["completedCount"], 1);

    // Nothing last month, so any activity this month reads as 100% growth.
    assert_eq!(data["growth"]["contacts"]["thisMonth"], 1);
    assert_eq!(data["growth"]["contacts"]["growthRate"], 100.0);

    assert_eq!(data["pending"]["newContacts"], 1);
    assert_eq!(data["activeSubscribers"], 1);

    let activity = data["recentActivity"].as_array().unwrap();
    assert_eq!(activity.len(), 3);
    for entry in activity {
        assert_eq!(entry["relativeTime"], "just now");
        assert!(entry["timestamp"].is_string());
    }
}
