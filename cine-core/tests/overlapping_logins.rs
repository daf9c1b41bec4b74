mod support;

use std::sync::Arc;

use cine_core::{
    AuthSessionManager, AuthState, MemorySessionStore, SESSION_ID_KEY,
    SessionStore,
};
use support::{StubMovieApi, status_error};

fn manager(api: &StubMovieApi) -> (AuthSessionManager, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let manager = AuthSessionManager::new(Arc::new(api.clone()), store.clone());
    (manager, store)
}

/// Yield until `username`'s login is parked at the validate step.
async fn wait_for_validate(api: &StubMovieApi, username: &str) {
    let call = format!("validate_with_login:{username}");
    while !api.calls().contains(&call) {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn loading_spans_the_whole_handshake() {
    let api = StubMovieApi::new();
    let gate = api.gate_login("ada");
    let (manager, _) = manager(&api);
    let mut rx = manager.subscribe();

    let login = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("ada", "pw").await }
    });

    drop(rx.wait_for(AuthState::is_loading).await.unwrap());
    wait_for_validate(&api, "ada").await;
    assert!(manager.is_loading());
    assert!(!manager.is_logged_in());

    gate.send(Ok("tok-a".into())).unwrap();
    let session_id = login.await.unwrap().unwrap();

    assert_eq!(session_id, "sess-tok-a");
    assert!(!manager.is_loading());
    assert_eq!(
        *rx.borrow_and_update(),
        AuthState::LoggedIn {
            session_id: "sess-tok-a".into()
        }
    );
}

#[tokio::test]
async fn later_failure_does_not_undo_earlier_success() {
    let api = StubMovieApi::new();
    let gate_a = api.gate_login("ada");
    let gate_b = api.gate_login("bob");
    let (manager, store) = manager(&api);

    let a = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("ada", "pw").await }
    });
    wait_for_validate(&api, "ada").await;
    let b = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("bob", "bad").await }
    });
    wait_for_validate(&api, "bob").await;

    gate_a.send(Ok("tok-a".into())).unwrap();
    a.await.unwrap().unwrap();
    assert!(manager.is_logged_in());
    assert!(manager.is_loading());

    gate_b
        .send(Err(status_error(401, "Invalid username and/or password")))
        .unwrap();
    assert!(b.await.unwrap().is_err());

    assert!(manager.is_logged_in());
    assert!(!manager.is_loading());
    assert_eq!(manager.session_id().as_deref(), Some("sess-tok-a"));
    assert_eq!(
        store.get(SESSION_ID_KEY).await.unwrap().as_deref(),
        Some("sess-tok-a")
    );
}

#[tokio::test]
async fn earlier_failure_keeps_loading_until_last_attempt_settles() {
    let api = StubMovieApi::new();
    let gate_a = api.gate_login("ada");
    let gate_b = api.gate_login("bob");
    let (manager, _) = manager(&api);

    let a = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("ada", "pw").await }
    });
    let b = tokio::spawn({
        let manager = manager.clone();
        async move { manager.login("bob", "pw").await }
    });
    wait_for_validate(&api, "ada").await;
    wait_for_validate(&api, "bob").await;

    gate_a.send(Err(status_error(503, "Service offline"))).unwrap();
    assert!(a.await.unwrap().is_err());
    assert!(manager.is_loading());
    assert!(!manager.is_logged_in());

    gate_b.send(Ok("tok-b".into())).unwrap();
    b.await.unwrap().unwrap();
    assert!(!manager.is_loading());
    assert_eq!(manager.session_id().as_deref(), Some("sess-tok-b"));
}
