//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use notevault_api::{AppState, build_app};
use notevault_core::config::AppConfig;
use notevault_core::traits::ManualClock;
use notevault_database::{MemoryShareLinkStore, MemoryUserStore};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// State behind the router, for direct service calls
    pub state: AppState,
    /// Clock shared by every time-dependent component
    pub clock: ManualClock,
    /// Share-link store, for inspecting persisted state
    pub shares: Arc<MemoryShareLinkStore>,
}

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Create a new test application on in-memory stores
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application after adjusting the default config
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = Some(TEST_SECRET.to_string());
        adjust(&mut config);

        let clock = ManualClock::starting_now();
        let shares = Arc::new(MemoryShareLinkStore::new());
        let users = Arc::new(MemoryUserStore::new());

        let state = AppState::new(config, shares.clone(), users, Arc::new(clock.clone()))
            .expect("Failed to build app state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            clock,
            shares,
        }
    }

    /// Register an account through the API
    pub async fn register(&self, email: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Register failed: {:?}", response.body);
    }

    /// Log in and return the bearer token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Register and log in
    pub async fn signed_in(&self, email: &str) -> String {
        self.register(email, "password123").await;
        self.login(email, "password123").await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a share link through the API and return its token
    pub async fn share(&self, token: &str, note_id: i64, query: &str) -> String {
        let response = self
            .request("POST", &format!("/api/share/{note_id}{query}"), None, Some(token))
            .await;
        assert_eq!(response.status, StatusCode::OK, "Share failed: {:?}", response.body);

        let url = response.body["url"].as_str().expect("No url in response");
        url.strip_prefix("/share/")
            .expect("url should start with /share/")
            .to_string()
    }
}
