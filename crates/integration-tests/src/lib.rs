//! Integration test harness for the Al-Khair binaries.
//!
//! Provides [`MockStore`], an in-process stand-in for the remote backend
//! store API. It serves the real wire contract - envelope shapes, `_id` and
//! `createdAt` field names, bearer auth, the multipart upload endpoint - on
//! an ephemeral local port, and counts every call per endpoint so tests can
//! assert how many network requests an operation made (including zero).
//!
//! The mock stays at the wire level on purpose: records are JSON values, not
//! `alkhair_core` types, so a drift between the clients and the backend
//! contract shows up as a test failure rather than being masked by shared
//! serialization code.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

/// The one token the mock accepts as a valid bearer credential.
pub const VALID_TOKEN: &str = "tok-valid";

/// Credentials the mock's login endpoint accepts.
pub const VALID_EMAIL: &str = "admin@alkhair.example";
pub const VALID_PASSWORD: &str = "correct-horse";

/// Operator name returned by login and verify.
pub const OPERATOR_NAME: &str = "Amina";

/// Per-endpoint request counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Counters {
    pub list: usize,
    pub public_list: usize,
    pub create: usize,
    pub update: usize,
    pub delete: usize,
    pub upload: usize,
    pub login: usize,
    pub verify: usize,
}

struct MockState {
    /// Wire-level project records, newest first.
    projects: Vec<Value>,
    counters: Counters,
    fail_upload: bool,
    reject_verify: bool,
    next_id: usize,
}

/// In-process mock of the Remote Project Store.
pub struct MockStore {
    addr: SocketAddr,
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    /// Bind an ephemeral port and start serving the mock API.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind; tests have nothing useful to do
    /// with that failure.
    pub async fn spawn() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            projects: Vec::new(),
            counters: Counters::default(),
            fail_upload: false,
            reject_verify: false,
            next_id: 1,
        }));

        let app = Router::new()
            .route("/projects/public", get(list_public))
            .route("/projects", get(list).post(create))
            .route("/projects/{id}", axum::routing::put(update).delete(delete_project))
            .route("/upload", post(upload))
            .route("/auth/login", post(login))
            .route("/auth/verify", get(verify))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock store");
        let addr = listener.local_addr().expect("mock store local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Base URL for pointing a client at this mock.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Snapshot of the per-endpoint call counters.
    #[must_use]
    pub fn counters(&self) -> Counters {
        self.lock().counters
    }

    /// Number of stored project records.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.lock().projects.len()
    }

    /// The stored record with the given id, if any.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<Value> {
        self.lock()
            .projects
            .iter()
            .find(|p| p["_id"] == id)
            .cloned()
    }

    /// Seed a project record directly, bypassing the HTTP surface.
    pub fn seed_project(&self, id: &str, name: &str, description: &str, image: &str) {
        self.lock().projects.push(json!({
            "_id": id,
            "name": name,
            "description": description,
            "image": image,
            "createdAt": "2024-01-01T00:00:00Z",
        }));
    }

    /// Make the next upload calls answer `success: false`.
    pub fn fail_uploads(&self) {
        self.lock().fail_upload = true;
    }

    /// Make verify reject even the valid token.
    pub fn reject_verify(&self) {
        self.lock().reject_verify = true;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn lock(state: &Arc<Mutex<MockState>>) -> MutexGuard<'_, MockState> {
    state
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {VALID_TOKEN}"))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Invalid token" })),
    )
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_public(State(state): State<Arc<Mutex<MockState>>>) -> Json<Value> {
    let mut state = lock(&state);
    state.counters.public_list += 1;
    Json(json!({ "success": true, "projects": state.projects }))
}

async fn list(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = lock(&state);
    state.counters.list += 1;
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "success": true, "projects": state.projects })),
    )
}

async fn create(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = lock(&state);
    state.counters.create += 1;
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let name = body["name"].as_str().unwrap_or_default();
    if name.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({ "success": false, "message": "Name is required" })),
        );
    }

    let id = format!("p{}", state.next_id);
    state.next_id += 1;
    let project = json!({
        "_id": id,
        "name": name,
        "description": body["description"],
        "image": body["image"],
        "createdAt": chrono::Utc::now().to_rfc3339(),
    });
    state.projects.insert(0, project.clone());

    (
        StatusCode::OK,
        Json(json!({ "success": true, "project": project })),
    )
}

async fn update(
    State(state): State<Arc<Mutex<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = lock(&state);
    state.counters.update += 1;
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let Some(record) = state.projects.iter_mut().find(|p| p["_id"] == *id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Project not found" })),
        );
    };
    record["name"] = body["name"].clone();
    record["description"] = body["description"].clone();
    record["image"] = body["image"].clone();
    let project = record.clone();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "project": project })),
    )
}

async fn delete_project(
    State(state): State<Arc<Mutex<MockState>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = lock(&state);
    state.counters.delete += 1;
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let before = state.projects.len();
    state.projects.retain(|p| p["_id"] != *id);
    if state.projects.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Project not found" })),
        );
    }

    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn upload(
    State(state): State<Arc<Mutex<MockState>>>,
    mut multipart: Multipart,
) -> Json<Value> {
    {
        let mut state = lock(&state);
        state.counters.upload += 1;
        if state.fail_upload {
            return Json(json!({ "success": false, "message": "Upload failed" }));
        }
    }

    let mut filename = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            filename = field.file_name().map(ToOwned::to_owned);
            let _ = field.bytes().await;
        }
    }

    match filename {
        Some(name) => Json(json!({
            "success": true,
            "imageUrl": format!("https://cdn.mock/{name}"),
        })),
        None => Json(json!({ "success": false, "message": "No image field" })),
    }
}

async fn login(State(state): State<Arc<Mutex<MockState>>>, Json(body): Json<Value>) -> Json<Value> {
    let mut state = lock(&state);
    state.counters.login += 1;

    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        Json(json!({
            "success": true,
            "token": VALID_TOKEN,
            "admin": { "name": OPERATOR_NAME, "email": VALID_EMAIL },
        }))
    } else {
        // Domain failure in a 200 envelope, as the real backend does.
        Json(json!({ "success": false, "message": "Invalid email or password" }))
    }
}

async fn verify(
    State(state): State<Arc<Mutex<MockState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = lock(&state);
    state.counters.verify += 1;
    if state.reject_verify || !bearer_ok(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "admin": { "name": OPERATOR_NAME, "email": VALID_EMAIL },
        })),
    )
}
