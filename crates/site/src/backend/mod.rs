//! Unauthenticated, cached client for the public listing endpoint.
//!
//! The public API exposes only `GET /projects/public` - there is no
//! single-item lookup. A detail page therefore resolves its project by
//! fetching the full public list and scanning for the id. The list sits
//! behind a short-TTL `moka` cache so bursts of visitor traffic do not fan
//! out into backend calls.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use alkhair_core::{Project, ProjectId, ProjectsEnvelope, StoreError};

use crate::config::BackendConfig;

/// TTL for the cached public project list.
const PUBLIC_LIST_TTL: Duration = Duration::from_secs(60);

/// Failure shape for public project resolution.
///
/// "Not found" is a domain-level outcome distinct from a store failure;
/// the detail view renders each differently and neither is retried.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("project not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only client for the public scope of the backend store.
///
/// Cheaply cloneable via `Arc`. No credentials anywhere - this client can
/// only see what any visitor can see.
#[derive(Clone)]
pub struct PublicClient {
    inner: Arc<PublicClientInner>,
}

struct PublicClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<String, Arc<Vec<Project>>>,
}

impl PublicClient {
    /// Create a new public backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(PUBLIC_LIST_TTL)
            .build();

        Self {
            inner: Arc::new(PublicClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    /// Fetch the public project list, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    /// Failures are never cached.
    #[instrument(skip(self))]
    pub async fn list_public(&self) -> Result<Arc<Vec<Project>>, StoreError> {
        let cache_key = "projects:public".to_owned();

        if let Some(projects) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for public project list");
            return Ok(projects);
        }

        let response = self
            .inner
            .http
            .get(format!("{}/projects/public", self.inner.base_url))
            .send()
            .await
            .map_err(StoreError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(StoreError::network)?;
        let envelope = match serde_json::from_str::<ProjectsEnvelope>(&body) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => return Err(StoreError::Invalid(err.to_string())),
            Err(_) => {
                return Err(StoreError::rejected(
                    status.as_u16(),
                    format!("HTTP {status}"),
                ));
            }
        };
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| alkhair_core::GENERIC_REJECTION.to_owned());
            return Err(StoreError::rejected(status.as_u16(), message));
        }

        let projects = Arc::new(envelope.projects);
        self.inner.cache.insert(cache_key, Arc::clone(&projects)).await;
        Ok(projects)
    }

    /// Resolve one project by id with a linear scan over the public list.
    ///
    /// The public API has no single-item endpoint, so the scan is the
    /// contract, not a shortcut.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when no listed project carries the id;
    /// [`ResolveError::Store`] when the list itself could not be fetched.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn resolve_by_id(&self, id: &ProjectId) -> Result<Project, ResolveError> {
        let projects = self.list_public().await?;
        projects
            .iter()
            .find(|project| &project.id == id)
            .cloned()
            .ok_or(ResolveError::NotFound)
    }
}
