//! Two-phase write flow against the mock store.
//!
//! Covers the ordering contract (upload strictly before the metadata
//! write), the abort-on-upload-failure path, client-side validation with
//! zero network calls, and image preservation on updates.

use alkhair_admin::backend::StoreClient;
use alkhair_admin::backend::writer::{
    ImageFile, ProjectSubmission, ProjectWriter, UploadOutcome, WriterError,
};
use alkhair_admin::config::BackendConfig;
use alkhair_admin::projects::ProjectList;
use alkhair_core::ProjectId;
use alkhair_integration_tests::{MockStore, VALID_TOKEN};
use secrecy::SecretString;

fn client_for(store: &MockStore) -> StoreClient {
    StoreClient::new(&BackendConfig {
        base_url: store.base_url(),
    })
}

fn token() -> SecretString {
    SecretString::from(VALID_TOKEN)
}

fn submission(name: &str, description: &str, image: Option<ImageFile>) -> ProjectSubmission {
    ProjectSubmission {
        name: name.to_owned(),
        description: description.to_owned(),
        image,
    }
}

fn png(filename: &str) -> ImageFile {
    ImageFile {
        filename: filename.to_owned(),
        content_type: "image/png".to_owned(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

#[tokio::test]
async fn create_with_image_uploads_then_writes() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let token = token();
    let writer = ProjectWriter::new(&client, &token);

    let (outcome, project) = writer
        .create(submission("Warehouse", "Steel frame build", Some(png("site.png"))))
        .await
        .expect("create should succeed");

    assert_eq!(
        outcome,
        UploadOutcome::Uploaded("https://cdn.mock/site.png".to_owned())
    );
    assert_eq!(project.image.as_deref(), Some("https://cdn.mock/site.png"));

    let counters = store.counters();
    assert_eq!(counters.upload, 1);
    assert_eq!(counters.create, 1);
}

#[tokio::test]
async fn failed_upload_aborts_before_any_metadata_write() {
    let store = MockStore::spawn().await;
    store.fail_uploads();
    let client = client_for(&store);
    let token = token();
    let writer = ProjectWriter::new(&client, &token);

    let err = writer
        .create(submission("Warehouse", "Steel frame build", Some(png("site.png"))))
        .await
        .expect_err("upload failure must abort the write");

    assert!(matches!(err, WriterError::Upload(_)));

    let counters = store.counters();
    assert_eq!(counters.upload, 1);
    assert_eq!(counters.create, 0, "no metadata write after a failed upload");
    assert_eq!(store.project_count(), 0);
}

#[tokio::test]
async fn blank_name_fails_validation_with_zero_network_calls() {
    let store = MockStore::spawn().await;
    let client = client_for(&store);
    let token = token();
    let writer = ProjectWriter::new(&client, &token);

    let err = writer
        .create(submission("", "x", Some(png("site.png"))))
        .await
        .expect_err("blank name must fail validation");

    assert!(matches!(err, WriterError::Validation(_)));

    let counters = store.counters();
    assert_eq!(counters.upload, 0);
    assert_eq!(counters.create, 0);
}

#[tokio::test]
async fn update_without_new_image_preserves_url_byte_identical() {
    let store = MockStore::spawn().await;
    store.seed_project("p1", "Warehouse", "Steel frame build", "https://x/1.png");
    let client = client_for(&store);
    let token = token();

    let mut list = ProjectList::new();
    list.complete_refresh(client.list(&token).await);
    let existing = list
        .get(&ProjectId::new("p1"))
        .expect("seeded project listed")
        .clone();

    let writer = ProjectWriter::new(&client, &token);
    let (outcome, updated) = writer
        .update(&existing, submission("Warehouse", "Phase two underway", None))
        .await
        .expect("update should succeed");

    assert_eq!(outcome, UploadOutcome::Kept("https://x/1.png".to_owned()));
    assert_eq!(updated.image.as_deref(), Some("https://x/1.png"));
    assert_eq!(store.counters().upload, 0, "no re-upload without a new file");

    // Through the view-model apply, the URL is still byte-identical.
    list.apply_update(updated);
    assert_eq!(
        list.get(&ProjectId::new("p1")).unwrap().image.as_deref(),
        Some("https://x/1.png")
    );
}
