//! Integration tests for the coordinated token refresh path

use async_trait::async_trait;
use campus_core::error::SessionError;
use campus_core::{MemorySessionStore, SessionEvent, SessionStore, UserProfile};
use campus_http::client::CampusClient;
use campus_http::client::error::{ClientError, RefreshError};
use futures::future::join_all;
use mockall::mock;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn refresh_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer"
    })
}

/// Client whose store already holds a (stale) token pair
async fn authed_client(server: &MockServer) -> (CampusClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    store
        .store_tokens("stale-access", "refresh-1")
        .await
        .unwrap();
    let client = CampusClient::builder()
        .base_url(server.uri())
        .session_store(store.clone())
        .build()
        .unwrap();
    (client, store)
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .mount(&server)
        .await;

    // Slow refresh keeps the window open long enough for every caller to
    // observe its 401 and enqueue behind the single in-flight attempt.
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(refresh_body("access-2", "refresh-2")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, store) = authed_client(&server).await;

    let calls = (0..3).map(|_| {
        let client = client.clone();
        async move { client.list_sections().await }
    });
    let results = join_all(calls).await;

    for result in results {
        assert!(result.is_ok(), "caller failed: {result:?}");
    }
    assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access-2"));
    assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn unauthorized_request_is_replayed_once_with_new_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .and(header("authorization", "Bearer stale-access"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_body("access-2", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Analyse I",
            "description": null,
            "is_active": true,
            "document_count": 0,
            "created_at": "2025-09-12T08:30:00"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server).await;
    let sections = client.list_sections().await.unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Analyse I");
}

#[tokio::test]
async fn refresh_failure_rejects_every_waiter_and_tears_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_delay(Duration::from_millis(300))
                .set_body_string("Refresh token revoked"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = authed_client(&server).await;
    store
        .store_user(&UserProfile {
            id: 1,
            username: "jdoe".into(),
            email: "jdoe@example.edu".into(),
            full_name: None,
            role: campus_core::UserRole::Student,
            status: campus_core::types::UserStatus::Active,
        })
        .await
        .unwrap();
    let mut events = client.events().subscribe();

    let calls = (0..3).map(|_| {
        let client = client.clone();
        async move { client.list_sections().await }
    });
    let results = join_all(calls).await;

    for result in results {
        match result {
            Err(ClientError::Refresh(RefreshError::Rejected { status: 400, .. })) => {}
            other => panic!("expected refresh rejection, got {other:?}"),
        }
    }

    // Teardown: credentials gone, marker raised, exactly one event
    assert!(store.access_token().await.unwrap().is_none());
    assert!(store.refresh_token().await.unwrap().is_none());
    assert!(store.user().await.unwrap().is_none());
    assert!(store.take_session_expired().await.unwrap());

    let event = events.recv().await.unwrap();
    assert!(matches!(event, SessionEvent::Expired { .. }));
    assert!(matches!(
        events.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn second_rejection_after_replay_does_not_refresh_again() {
    let server = MockServer::start().await;

    // Both the stale and the freshly issued token are rejected; the replay
    // must fail straight through instead of re-entering the refresh path.
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Account disabled"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_body("access-2", "refresh-2")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = authed_client(&server).await;
    match client.me().await {
        Err(ClientError::AuthenticationFailed(_)) => {}
        other => panic!("expected propagated 401, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_refresh_token_tears_down_without_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Not authenticated"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_body("x", "y")))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = CampusClient::builder()
        .base_url(server.uri())
        .session_store(store.clone())
        .build()
        .unwrap();
    let mut events = client.events().subscribe();

    match client.list_sections().await {
        Err(ClientError::Refresh(RefreshError::MissingRefreshToken)) => {}
        other => panic!("expected missing-refresh-token error, got {other:?}"),
    }
    assert!(store.take_session_expired().await.unwrap());
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Expired { .. }
    ));
}

#[tokio::test]
async fn transport_failures_bypass_the_refresh_machinery() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(refresh_body("x", "y")))
        .expect(0)
        .mount(&server)
        .await;

    // Short general timeout; the response never arrives in time.
    let store = Arc::new(MemorySessionStore::new());
    store.store_tokens("stale-access", "refresh-1").await.unwrap();
    let client = CampusClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .session_store(store.clone())
        .build()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    match client.list_sections().await {
        Err(ClientError::Request(error)) => assert!(error.is_timeout() || error.is_request()),
        other => panic!("expected transport error, got {other:?}"),
    }
    // Credentials are untouched by a transport failure
    assert_eq!(store.access_token().await.unwrap().as_deref(), Some("stale-access"));
}

mock! {
    Store {}

    #[async_trait]
    impl SessionStore for Store {
        async fn access_token(&self) -> Result<Option<String>, SessionError>;
        async fn refresh_token(&self) -> Result<Option<String>, SessionError>;
        async fn user(&self) -> Result<Option<UserProfile>, SessionError>;
        async fn store_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError>;
        async fn store_user(&self, user: &UserProfile) -> Result<(), SessionError>;
        async fn clear_credentials(&self) -> Result<(), SessionError>;
        async fn mark_session_expired(&self) -> Result<(), SessionError>;
        async fn take_session_expired(&self) -> Result<bool, SessionError>;
    }
}

#[tokio::test]
async fn store_failure_during_refresh_surfaces_as_refresh_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sections/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Token expired"))
        .mount(&server)
        .await;

    let mut store = MockStore::new();
    store
        .expect_access_token()
        .returning(|| Ok(Some("stale-access".to_string())));
    store
        .expect_refresh_token()
        .returning(|| Err(SessionError::storage("backing store unavailable")));
    store.expect_clear_credentials().returning(|| Ok(()));
    store.expect_mark_session_expired().returning(|| Ok(()));

    let client = CampusClient::builder()
        .base_url(server.uri())
        .session_store(Arc::new(store))
        .build()
        .unwrap();

    match client.list_sections().await {
        Err(ClientError::Refresh(RefreshError::Store(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
}
