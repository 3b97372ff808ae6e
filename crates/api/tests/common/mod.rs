#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kindred_api::config::{PaymentConfig, ServerConfig, StorageBackend};
use kindred_api::router::build_app_router;
use kindred_api::state::AppState;
use kindred_db::MemoryDocumentStore;
use tower::ServiceExt;

/// Bearer token configured for the admin API in tests.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the in-memory store, `http://localhost:5173` as CORS origin and a
/// fixed payment configuration.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage: StorageBackend::Memory,
        database_url: None,
        admin_token: Some(ADMIN_TOKEN.to_string()),
        payment: PaymentConfig {
            public_key: "pk_test_kindred".to_string(),
            default_currency: "USD".to_string(),
            tx_prefix: "TEST".to_string(),
        },
        organization_name: "Kindred Test Fund".to_string(),
        static_dir: None,
    }
}

/// The application router plus direct access to its store.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDocumentStore>,
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

/// Build the application from a custom configuration.
pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let store = Arc::new(MemoryDocumentStore::new());
    let state = AppState {
        store: store.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
    }
}

impl TestApp {
    /// Send a request. Admin paths carry the test admin token.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let token = uri.starts_with("/api/v1/admin").then_some(ADMIN_TOKEN);
        self.send_with_token(method, uri, body, token).await
    }

    /// Send a request with an explicit (or no) bearer token.
    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Method::DELETE, uri, None).await
    }

    /// POST and return the `data` of a successful response.
    pub async fn create(&self, uri: &str, body: serde_json::Value) -> serde_json::Value {
        let response = self.post_json(uri, body).await;
        let status = response.status();
        let json = body_json(response).await;
        assert!(status.is_success(), "POST {uri} failed with {status}: {json}");
        json["data"].clone()
    }
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
