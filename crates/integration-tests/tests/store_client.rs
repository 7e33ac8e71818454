//! StoreClient wire contract against the mock store.
//!
//! The interesting part is the envelope handling: domain failures arrive in
//! 200-level envelopes and must surface with the server's message verbatim,
//! while credential failures map to the unauthorized variant regardless of
//! body shape.

use alkhair_admin::backend::StoreClient;
use alkhair_admin::config::BackendConfig;
use alkhair_core::{ProjectDraft, ProjectId, StoreError};
use alkhair_integration_tests::{
    MockStore, OPERATOR_NAME, VALID_EMAIL, VALID_PASSWORD, VALID_TOKEN,
};
use secrecy::SecretString;

fn client_for(store: &MockStore) -> StoreClient {
    StoreClient::new(&BackendConfig {
        base_url: store.base_url(),
    })
}

#[tokio::test]
async fn list_requires_a_valid_bearer_token() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);

    let err = client
        .list(&SecretString::from("wrong-token"))
        .await
        .expect_err("bad token must be rejected");
    assert!(matches!(err, StoreError::Unauthorized(_)));

    let projects = client
        .list(&SecretString::from(VALID_TOKEN))
        .await
        .expect("valid token lists");
    assert!(projects.is_empty());
}

#[tokio::test]
async fn domain_rejection_in_200_envelope_carries_message_verbatim() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);

    // Bypass the writer's validation to hit the server-side rejection.
    let draft = ProjectDraft {
        name: String::new(),
        description: "x".to_owned(),
        image: String::new(),
    };
    let err = client
        .create(&SecretString::from(VALID_TOKEN), &draft)
        .await
        .expect_err("server rejects blank name");

    match err {
        StoreError::Rejected(message) => assert_eq!(message, "Name is required"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_removes_the_remote_record() {
    let store = MockStore::spawn().await;
    store.seed_project("p1", "Warehouse", "...", "");
    let client = client_for(&store);
    let token = SecretString::from(VALID_TOKEN);

    client
        .delete(&token, &ProjectId::new("p1"))
        .await
        .expect("delete succeeds");
    assert_eq!(store.project_count(), 0);

    let err = client
        .delete(&token, &ProjectId::new("p1"))
        .await
        .expect_err("second delete finds nothing");
    match err {
        StoreError::Rejected(message) => assert_eq!(message, "Project not found"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn login_exchanges_credentials_for_token_and_identity() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);

    let (token, operator) = client
        .login(VALID_EMAIL, VALID_PASSWORD)
        .await
        .expect("valid credentials log in");
    assert_eq!(token, VALID_TOKEN);
    assert_eq!(operator.name, OPERATOR_NAME);

    let err = client
        .login(VALID_EMAIL, "nope")
        .await
        .expect_err("bad password is rejected");
    match err {
        StoreError::Rejected(message) => assert_eq!(message, "Invalid email or password"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}
