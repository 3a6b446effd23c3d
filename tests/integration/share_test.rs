//! Integration tests for share-link issuance, resolution, and revocation.

mod helpers;

use std::sync::Arc;

use chrono::Duration;
use http::StatusCode;

use helpers::TestApp;
use notevault_core::config::ConsumePolicy;
use notevault_core::types::{NoteId, UserId};

#[tokio::test]
async fn test_create_and_resolve_share() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;

    let share = app.share(&token, 42, "").await;
    assert_eq!(share.len(), 43);

    let response = app
        .request("GET", &format!("/api/share/{share}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["resourceId"], 42);
}

#[tokio::test]
async fn test_default_link_lasts_two_hours() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;
    let share = app.share(&token, 42, "").await;
    let path = format!("/api/share/{share}");

    app.clock.advance(Duration::minutes(119));
    assert_eq!(app.request("GET", &path, None, None).await.status, StatusCode::OK);

    app.clock.advance(Duration::minutes(1));
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, serde_json::json!({ "error": "invalid_or_expired" }));
}

#[tokio::test]
async fn test_unlimited_link_for_note_42_resolves_twice() {
    let app = TestApp::new();
    let link = app
        .state
        .share_service
        .issue(NoteId(42), UserId(7), Some(Duration::hours(2)), None)
        .await
        .expect("issue");

    for _ in 0..2 {
        let response = app
            .request("GET", &format!("/api/share/{}", link.token), None, None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["resourceId"], 42);
    }
}

#[tokio::test]
async fn test_single_use_link_over_http() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;
    let share = app.share(&token, 9, "?max_uses=1").await;
    let path = format!("/api/share/{share}");

    assert_eq!(app.request("GET", &path, None, None).await.status, StatusCode::OK);

    let second = app.request("GET", &path, None, None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(second.body["error"], "invalid_or_expired");
}

#[tokio::test]
async fn test_unknown_token_looks_like_expired_one() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/share/never-issued", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, serde_json::json!({ "error": "invalid_or_expired" }));
}

#[tokio::test]
async fn test_invalid_share_parameters() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;

    for query in ["?max_uses=0", "?ttl_minutes=0"] {
        let response = app
            .request("POST", &format!("/api/share/42{query}"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{query}");
    }
    assert!(app.shares.is_empty());
}

#[tokio::test]
async fn test_list_and_revoke() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;

    let share = app.share(&alice, 42, "?ttl_minutes=30&max_uses=3").await;

    let listed = app.request("GET", "/api/shares", None, Some(&alice)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
    assert_eq!(listed.body[0]["token"], share.as_str());
    assert_eq!(listed.body[0]["remainingUses"], 3);
    assert_eq!(listed.body[0]["active"], true);

    let others = app.request("GET", "/api/shares", None, Some(&bob)).await;
    assert_eq!(others.body.as_array().map(Vec::len), Some(0));

    let path = format!("/api/share/{share}");
    let stolen = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(stolen.status, StatusCode::NOT_FOUND);

    let revoked = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(revoked.status, StatusCode::NO_CONTENT);

    let resolved = app.request("GET", &path, None, None).await;
    assert_eq!(resolved.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_sends_anonymous_visitors_to_login() {
    let app = TestApp::new();
    let token = app.signed_in("alice@example.com").await;
    let share = app.share(&token, 42, "?max_uses=1").await;

    let response = app
        .request("GET", &format!("/share/{share}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some(format!("/login?redirect=/share/{share}").as_str())
    );

    // The login bounce does not spend the only use.
    assert_eq!(app.shares.get_by_token(&share).unwrap().remaining_uses, Some(1));
}

#[tokio::test]
async fn test_login_redirect_escapes_query_characters_in_token() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/share/x%26next%3Dhttps%3A%2F%2Fevil.example",
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.location(),
        Some("/login?redirect=/share/x%26next%3Dhttps%3A//evil.example")
    );
}

#[tokio::test]
async fn test_redirect_sends_signed_in_visitors_to_the_note() {
    let app = TestApp::new();
    let alice = app.signed_in("alice@example.com").await;
    let bob = app.signed_in("bob@example.com").await;
    let share = app.share(&alice, 42, "?max_uses=1").await;
    let path = format!("/share/{share}");

    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.location(), Some("/notes/42"));

    let again = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body["error"], "invalid_or_expired");
}

#[tokio::test]
async fn test_peek_policy_does_not_consume() {
    let app = TestApp::with_config(|config| {
        config.share.api_consumption = ConsumePolicy::Peek;
    });
    let token = app.signed_in("alice@example.com").await;
    let share = app.share(&token, 42, "?max_uses=1").await;
    let path = format!("/api/share/{share}");

    for _ in 0..3 {
        assert_eq!(app.request("GET", &path, None, None).await.status, StatusCode::OK);
    }
    assert_eq!(app.shares.get_by_token(&share).unwrap().remaining_uses, Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_redemption_over_http() {
    let app = Arc::new(TestApp::new());
    let token = app.signed_in("alice@example.com").await;
    let share = app.share(&token, 42, "?max_uses=1").await;
    let path = format!("/api/share/{share}");

    let tasks = (0..16).map(|_| {
        let app = Arc::clone(&app);
        let path = path.clone();
        tokio::spawn(async move { app.request("GET", &path, None, None).await.status })
    });
    let statuses: Vec<StatusCode> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .collect();

    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::NOT_FOUND)
            .count(),
        15
    );
}

#[tokio::test]
async fn test_preflight_is_public() {
    let app = TestApp::new();
    let response = app.request("OPTIONS", "/api/shares", None, None).await;
    assert_ne!(response.status, StatusCode::UNAUTHORIZED);
}
