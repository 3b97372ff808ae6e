//! Integration tests for donation checkout and payment callbacks.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use serde_json::json;

fn checkout_body(amount: f64) -> serde_json::Value {
    json!({
        "donorName": "Grace Hopper",
        "email": "grace@example.org",
        "amount": amount,
    })
}

async fn active_campaign(app: &TestApp) -> String {
    let campaign = app
        .create(
            "/api/v1/admin/campaigns",
            json!({"title": "Clean water", "goalAmount": 1000.0, "status": "active"}),
        )
        .await;
    campaign["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn checkout_returns_widget_config_and_pending_donation() {
    let app = common::build_test_app();
    let response = app
        .post_json("/api/v1/donations/checkout", checkout_body(25.0))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["publicKey"], "pk_test_kindred");
    assert_eq!(data["amount"], 25.0);
    assert_eq!(data["currency"], "USD");
    assert_eq!(data["title"], "Kindred Test Fund");
    assert_eq!(data["customer"]["email"], "grace@example.org");
    assert_eq!(data["customer"]["name"], "Grace Hopper");
    assert!(data["txRef"].as_str().unwrap().starts_with("TEST-"));

    let id = data["donationId"].as_str().unwrap();
    let stored = body_json(app.get(&format!("/api/v1/admin/donations/{id}")).await).await;
    assert_eq!(stored["data"]["status"], "pending");
    assert_eq!(stored["data"]["txRef"], data["txRef"]);
}

#[tokio::test]
async fn checkout_rejects_bad_amounts_and_currencies() {
    let app = common::build_test_app();

    let zero = app
        .post_json("/api/v1/donations/checkout", checkout_body(0.0))
        .await;
    assert_eq!(zero.status(), StatusCode::BAD_REQUEST);

    let huge = app
        .post_json("/api/v1/donations/checkout", checkout_body(50_000_000.0))
        .await;
    assert_eq!(huge.status(), StatusCode::BAD_REQUEST);

    let mut body = checkout_body(10.0);
    body["currency"] = json!("dollars");
    let currency = app.post_json("/api/v1/donations/checkout", body).await;
    assert_eq!(currency.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_normalizes_currency() {
    let app = common::build_test_app();
    let mut body = checkout_body(10.0);
    body["currency"] = json!("ngn");

    let data = app.create("/api/v1/donations/checkout", body).await;
    assert_eq!(data["currency"], "NGN");
}

#[tokio::test]
async fn checkout_for_unknown_campaign_returns_404() {
    let app = common::build_test_app();
    let mut body = checkout_body(10.0);
    body["campaignId"] = json!("ghost");

    let response = app.post_json("/api/v1/donations/checkout", body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_completes_donation_and_credits_campaign_once() {
    let app = common::build_test_app();
    let campaign_id = active_campaign(&app).await;

    let mut body = checkout_body(250.0);
    body["campaignId"] = json!(campaign_id);
    let checkout = app.create("/api/v1/donations/checkout", body).await;
    let tx_ref = checkout["txRef"].as_str().unwrap();

    let callback = json!({"txRef": tx_ref, "transactionId": "flw-991", "status": "successful"});
    let response = app.post_json("/api/v1/donations/verify", callback.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["donationId"], checkout["donationId"]);

    // A replayed callback must not double-count.
    let replay = app.post_json("/api/v1/donations/verify", callback).await;
    assert_eq!(replay.status(), StatusCode::OK);

    let campaign = body_json(app.get(&format!("/api/v1/campaigns/{campaign_id}")).await).await;
    assert_eq!(campaign["data"]["raisedAmount"], 250.0);
    assert_eq!(campaign["data"]["progressPercent"], 25.0);

    let id = checkout["donationId"].as_str().unwrap();
    let stored = body_json(app.get(&format!("/api/v1/admin/donations/{id}")).await).await;
    assert_eq!(stored["data"]["transactionId"], "flw-991");
}

#[tokio::test]
async fn verify_failed_payment_marks_donation_failed() {
    let app = common::build_test_app();
    let checkout = app
        .create("/api/v1/donations/checkout", checkout_body(10.0))
        .await;

    let response = app
        .post_json(
            "/api/v1/donations/verify",
            json!({"txRef": checkout["txRef"], "status": "cancelled"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "failed");
}

#[tokio::test]
async fn verify_unknown_reference_returns_404() {
    let app = common::build_test_app();
    let response = app
        .post_json(
            "/api/v1/donations/verify",
            json!({"txRef": "TEST-0-nothing", "status": "successful"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn verify_unknown_status_returns_400() {
    let app = common::build_test_app();
    let checkout = app
        .create("/api/v1/donations/checkout", checkout_body(10.0))
        .await;

    let response = app
        .post_json(
            "/api/v1/donations/verify",
            json!({"txRef": checkout["txRef"], "status": "maybe"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_completion_credits_campaign_once() {
    let app = common::build_test_app();
    let campaign_id = active_campaign(&app).await;

    let mut body = checkout_body(40.0);
    body["campaignId"] = json!(campaign_id);
    let checkout = app.create("/api/v1/donations/checkout", body).await;
    let id = checkout["donationId"].as_str().unwrap();

    let response = app
        .put_json(
            &format!("/api/v1/admin/donations/{id}"),
            json!({"status": "completed"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert_eq!(json["data"]["campaignCredited"], true);

    // The widget callback arriving afterwards must not add it again.
    let callback = json!({"txRef": checkout["txRef"], "status": "successful"});
    let verify = app.post_json("/api/v1/donations/verify", callback).await;
    assert_eq!(verify.status(), StatusCode::OK);

    // Neither must a refund followed by re-completion.
    for status in ["refunded", "completed"] {
        let response = app
            .put_json(
                &format!("/api/v1/admin/donations/{id}"),
                json!({"status": status}),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let campaign = body_json(app.get(&format!("/api/v1/campaigns/{campaign_id}")).await).await;
    assert_eq!(campaign["data"]["raisedAmount"], 40.0);
}

#[tokio::test]
async fn admin_created_completed_donation_credits_campaign() {
    let app = common::build_test_app();
    let campaign_id = active_campaign(&app).await;

    let donation = app
        .create(
            "/api/v1/admin/donations",
            json!({
                "donorName": "Walk-in donor",
                "email": "cash@example.org",
                "amount": 60.0,
                "campaignId": campaign_id,
                "status": "completed",
            }),
        )
        .await;
    assert_eq!(donation["campaignCredited"], true);

    let campaign = body_json(app.get(&format!("/api/v1/campaigns/{campaign_id}")).await).await;
    assert_eq!(campaign["data"]["raisedAmount"], 60.0);
}
