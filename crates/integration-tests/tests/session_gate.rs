//! Session gate lifecycle against the mock store.
//!
//! Walks the full arc: login persists the session and broadcasts the event;
//! a fresh process sees the stored token as unverified; verification either
//! authenticates or clears everything with exactly one logout notification.

use alkhair_admin::backend::StoreClient;
use alkhair_admin::config::BackendConfig;
use alkhair_admin::session::{GateState, SessionContext, SessionEvent, SessionStore};
use alkhair_integration_tests::{
    MockStore, OPERATOR_NAME, VALID_EMAIL, VALID_PASSWORD,
};
use tokio::sync::broadcast::error::TryRecvError;

fn client_for(store: &MockStore) -> StoreClient {
    StoreClient::new(&BackendConfig {
        base_url: store.base_url(),
    })
}

fn context_at(path: &std::path::Path) -> SessionContext {
    SessionContext::new(SessionStore::new(path.to_path_buf()))
}

#[tokio::test]
async fn login_persists_session_and_broadcasts() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let ctx = context_at(&path);
    let mut events = ctx.subscribe();

    let operator = ctx
        .login(&client, VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("valid credentials log in");
    assert_eq!(operator.name, OPERATOR_NAME);
    assert!(path.exists(), "session file written");
    assert!(matches!(ctx.entry_state(), GateState::Authenticated(_)));

    match events.try_recv() {
        Ok(SessionEvent::LoggedIn(op)) => assert_eq!(op.name, OPERATOR_NAME),
        other => panic!("expected LoggedIn, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_login_leaves_state_untouched() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let ctx = context_at(&path);
    let mut events = ctx.subscribe();

    ctx.login(&client, VALID_EMAIL, "nope")
        .await
        .expect_err("bad password rejected");
    assert!(!path.exists());
    assert_eq!(ctx.entry_state(), GateState::Anonymous);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn restart_verifies_stored_token_and_authenticates() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    context_at(&path)
        .login(&client, VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("login");

    // A new context over the same file models a process restart.
    let restarted = context_at(&path);
    assert_eq!(restarted.entry_state(), GateState::Verifying);

    let gate = restarted.verify(&client).await;
    match gate {
        GateState::Authenticated(operator) => assert_eq!(operator.name, OPERATOR_NAME),
        other => panic!("expected Authenticated, got {other:?}"),
    }
    assert!(restarted.token().is_some());
}

#[tokio::test]
async fn failed_verify_clears_everything_with_one_logout() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    context_at(&path)
        .login(&client, VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("login");
    store.reject_verify();

    let restarted = context_at(&path);
    let mut events = restarted.subscribe();

    let gate = restarted.verify(&client).await;
    assert_eq!(gate, GateState::Invalid);
    assert!(!path.exists(), "token and identity removed together");
    assert!(restarted.token().is_none());
    assert!(restarted.current().is_none());

    // Exactly one logout notification.
    assert_eq!(events.try_recv(), Ok(SessionEvent::LoggedOut));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn logout_clears_session_and_broadcasts() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let ctx = context_at(&path);
    ctx.login(&client, VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("login");
    let mut events = ctx.subscribe();

    ctx.logout();
    assert!(!path.exists());
    assert!(ctx.current().is_none());
    assert_eq!(ctx.entry_state(), GateState::Anonymous);
    assert_eq!(events.try_recv(), Ok(SessionEvent::LoggedOut));
}
