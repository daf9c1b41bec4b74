use std::sync::Arc;

use cine_config::BearerToken;
use cine_core::{
    ApiClient, AuthError, AuthSessionManager, AuthState, CoreError,
    FileSessionStore, LoginStep, MemorySessionStore, ProfileService,
    SESSION_ID_KEY, SessionStore,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api(server: &MockServer) -> Arc<ApiClient> {
    Arc::new(
        ApiClient::new(format!("{}/3", server.uri()), BearerToken::new("t"))
            .unwrap(),
    )
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/3/authentication/token/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "expires_at": "2026-10-18 12:00:00 UTC",
            "request_token": "req-abc"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_login_persists_session_to_disk() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/token/validate_with_login"))
        .and(body_json(json!({
            "username": "ada",
            "password": "lovelace",
            "request_token": "req-abc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "request_token": "req-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/session/new"))
        .and(body_json(json!({ "request_token": "req-abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "session_id": "sess-xyz"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/account"))
        .and(query_param("session_id", "sess-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 548,
            "name": "Ada",
            "username": "ada"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileSessionStore::new(
        dir.path().join("nested").join("session.json"),
    ));
    let api = api(&server).await;
    let manager = AuthSessionManager::new(api.clone(), store.clone());
    let mut changes = manager.subscribe();

    let session_id = manager.login("ada", "lovelace").await.unwrap();

    assert_eq!(session_id, "sess-xyz");
    assert!(manager.is_logged_in());
    assert!(!manager.is_loading());
    assert!(changes.has_changed().unwrap());
    assert_eq!(
        *changes.borrow_and_update(),
        AuthState::LoggedIn {
            session_id: "sess-xyz".into()
        }
    );

    // A fresh store over the same file sees the session.
    let reopened = FileSessionStore::new(store.path());
    assert_eq!(
        reopened.get(SESSION_ID_KEY).await.unwrap().as_deref(),
        Some("sess-xyz")
    );

    let profile = ProfileService::new(api, Arc::new(reopened));
    let account = profile.load().await.unwrap();
    assert_eq!(account.display_name(), "Ada");
    assert_eq!(account.masked_id(), "548");
}

#[tokio::test]
async fn validation_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/token/validate_with_login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "status_code": 30,
            "status_message": "Invalid username and/or password: You did not provide a valid login."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/session/new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let manager = AuthSessionManager::new(api(&server).await, store.clone());

    let err = manager.login("ada", "wrong").await.unwrap_err();

    assert!(err.to_string().contains("Invalid username and/or password"));
    assert_eq!(err.step(), Some(LoginStep::ValidateCredentials));
    assert!(!manager.is_logged_in());
    assert!(!manager.is_loading());
    assert_eq!(manager.state(), AuthState::LoggedOut);
    assert!(store.is_empty());
}

#[tokio::test]
async fn session_creation_failure_persists_nothing() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/token/validate_with_login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "request_token": "req-abc"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/3/authentication/session/new"))
        .respond_with(ResponseTemplate::new(500).set_body_string(""))
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let manager = AuthSessionManager::new(api(&server).await, store.clone());

    let err = manager.login("ada", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Something went wrong");
    assert!(matches!(
        err,
        AuthError::Upstream {
            step: LoginStep::CreateSession,
            ..
        }
    ));
    assert!(store.is_empty());
}

#[tokio::test]
async fn profile_without_session_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/account"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let profile = ProfileService::new(
        api(&server).await,
        Arc::new(MemorySessionStore::new()),
    );
    assert!(matches!(
        profile.load().await,
        Err(CoreError::SessionMissing)
    ));
}

#[tokio::test]
async fn restore_is_explicit() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::with_entry(SESSION_ID_KEY, "kept"));
    let manager = AuthSessionManager::new(api(&server).await, store.clone());

    assert!(!manager.is_logged_in());
    assert!(manager.restore().await.unwrap());
    assert_eq!(manager.session_id().as_deref(), Some("kept"));

    manager.logout().await.unwrap();
    assert_eq!(store.get(SESSION_ID_KEY).await.unwrap(), None);
    assert_eq!(manager.state(), AuthState::LoggedOut);
}
