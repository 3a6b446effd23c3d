//! Integration tests for accounts and the authentication gate.

mod helpers;

use chrono::Duration;
use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["subject"], "alice@example.com");
    assert_eq!(response.body["roles"][0], "user");
    assert!(response.body["userId"].as_i64().is_some());
}

#[tokio::test]
async fn test_login_failure_shape() {
    let app = TestApp::new();
    app.register("alice@example.com", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": "alice@example.com", "password": "wrong-password" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);
    assert!(response.body["token"].is_null());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_bad_input() {
    let app = TestApp::new();
    app.register("alice@example.com", "password123").await;

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "email": "alice@example.com", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let bad_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "email": "nope", "password": "password123" })),
            None,
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let short_password = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "email": "bob@example.com", "password": "short" })),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_need_a_token() {
    let app = TestApp::new();
    for (method, path) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/shares"),
        ("POST", "/api/share/5"),
        ("DELETE", "/api/share/abc"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
    }

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");
}

#[tokio::test]
async fn test_invalid_bearer_is_rejected_even_on_public_routes() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/health", None, Some("not.a.token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_token_creates_nothing() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;

    app.clock.advance(Duration::hours(2));

    let response = app.request("POST", "/api/share/5", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Unauthorized");
    assert!(app.shares.is_empty());
}

#[tokio::test]
async fn test_token_lifetime_follows_the_clock() {
    let app = TestApp::new();
    app.register("alice@example.com", "password123").await;
    let codec = app.state.gate.codec();
    let issued = codec
        .issue("alice@example.com", Duration::hours(2))
        .expect("issue");

    app.clock.advance(Duration::hours(1));
    let response = app
        .request("GET", "/api/auth/me", None, Some(&issued.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    app.clock.advance(Duration::hours(2));
    let response = app
        .request("GET", "/api/auth/me", None, Some(&issued.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_unknown_subject_is_rejected() {
    let app = TestApp::new();
    let issued = app
        .state
        .gate
        .codec()
        .issue_default("ghost@example.com")
        .expect("issue");

    let response = app
        .request("GET", "/api/health", None, Some(&issued.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_weak_secret_refuses_to_build_state() {
    use std::sync::Arc;

    use notevault_api::AppState;
    use notevault_core::config::AppConfig;
    use notevault_core::error::ConfigError;
    use notevault_core::traits::SystemClock;
    use notevault_database::{MemoryShareLinkStore, MemoryUserStore};

    let mut config = AppConfig::default();
    config.auth.jwt_secret = Some("too-short".to_string());

    let err = AppState::new(
        config,
        Arc::new(MemoryShareLinkStore::new()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(SystemClock),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::WeakSecret { actual_bits: 72 });
}
