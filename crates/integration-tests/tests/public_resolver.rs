//! Public resolver behavior against the mock store.

use alkhair_core::ProjectId;
use alkhair_integration_tests::MockStore;
use alkhair_site::backend::{PublicClient, ResolveError};
use alkhair_site::config::BackendConfig;

fn client_for(base_url: String) -> PublicClient {
    PublicClient::new(&BackendConfig { base_url })
}

#[tokio::test]
async fn resolve_finds_a_listed_project() {
    let store = MockStore::spawn().await;
    store.seed_project("p1", "Warehouse", "Steel frame build", "https://x/1.png");
    let client = client_for(store.base_url());

    let project = client
        .resolve_by_id(&ProjectId::new("p1"))
        .await
        .expect("listed project resolves");
    assert_eq!(project.name, "Warehouse");
    assert_eq!(project.image.as_deref(), Some("https://x/1.png"));
}

#[tokio::test]
async fn resolve_miss_is_not_found_not_an_error() {
    let store = MockStore::spawn().await;
    store.seed_project("p1", "Warehouse", "...", "");
    let client = client_for(store.base_url());

    let err = client
        .resolve_by_id(&ProjectId::new("missing"))
        .await
        .expect_err("unknown id misses");
    assert!(matches!(err, ResolveError::NotFound));
}

#[tokio::test]
async fn public_list_is_served_from_cache_within_ttl() {
    let store = MockStore::spawn().await;
    store.seed_project("p1", "Warehouse", "...", "");
    let client = client_for(store.base_url());

    let first = client.list_public().await.expect("first fetch");
    let second = client.list_public().await.expect("cached fetch");
    assert_eq!(first.len(), second.len());
    assert_eq!(store.counters().public_list, 1, "second call hits the cache");
}

#[tokio::test]
async fn unreachable_backend_is_a_store_error() {
    // Grab a free port, then close it again so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = client_for(format!("http://{addr}"));
    let err = client
        .resolve_by_id(&ProjectId::new("p1"))
        .await
        .expect_err("nothing is listening");
    assert!(matches!(
        err,
        ResolveError::Store(alkhair_core::StoreError::Network(_))
    ));
}
