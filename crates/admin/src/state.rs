//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::StoreClient;
use crate::config::AdminConfig;
use crate::projects::ProjectList;
use crate::session::{SessionContext, SessionStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the backend client, the operator
/// session context, and the panel's owned project list.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: StoreClient,
    session: SessionContext,
    projects: RwLock<ProjectList>,
}

impl AppState {
    /// Create a new application state, loading any persisted session.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let store = StoreClient::new(&config.backend);
        let session = SessionContext::new(SessionStore::new(config.session_file.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                session,
                projects: RwLock::new(ProjectList::new()),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the backend store client.
    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }

    /// Get a reference to the session context.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Get a reference to the panel's project list.
    ///
    /// Lock discipline: fetch from the backend first, then lock briefly to
    /// apply - never hold the guard across an await.
    #[must_use]
    pub fn projects(&self) -> &RwLock<ProjectList> {
        &self.inner.projects
    }
}
