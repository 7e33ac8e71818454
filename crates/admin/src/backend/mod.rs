//! Authenticated client for the backend store API.
//!
//! This module wraps the remote HTTP backend that owns all persistence:
//! project CRUD, the image upload endpoint, and the auth endpoints. Every
//! operation issues exactly one request and maps the response envelope into
//! `Result<_, StoreError>` - no retries, failures surface to the caller
//! immediately.

pub mod writer;

use std::sync::Arc;

use reqwest::multipart;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::instrument;

use alkhair_core::{
    AckEnvelope, LoginEnvelope, Operator, Project, ProjectDraft, ProjectEnvelope, ProjectId,
    ProjectsEnvelope, StoreError, UploadEnvelope, VerifyEnvelope,
};

use crate::config::BackendConfig;

/// Client for the backend store API, authenticated scope.
///
/// Cheaply cloneable via `Arc`. Operations that touch project data or verify
/// a token require the operator's bearer credential; `login` and
/// `upload_image` do not (the upload endpoint is open, as in the backend's
/// contract).
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a new backend store client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(StoreClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// List all projects, authenticated scope.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    #[instrument(skip(self, token))]
    pub async fn list(&self, token: &SecretString) -> Result<Vec<Project>, StoreError> {
        let response = self
            .inner
            .http
            .get(self.url("/projects"))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(StoreError::network)?;

        let (status, envelope) = read_envelope::<ProjectsEnvelope>(response).await?;
        if !envelope.success {
            return Err(StoreError::rejected(status, rejection(envelope.message)));
        }
        Ok(envelope.projects)
    }

    /// Create a project from an already-validated draft.
    ///
    /// Returns the server's canonical record, with the store-assigned id and
    /// creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    #[instrument(skip(self, token, draft), fields(name = %draft.name))]
    pub async fn create(
        &self,
        token: &SecretString,
        draft: &ProjectDraft,
    ) -> Result<Project, StoreError> {
        let response = self
            .inner
            .http
            .post(self.url("/projects"))
            .bearer_auth(token.expose_secret())
            .json(draft)
            .send()
            .await
            .map_err(StoreError::network)?;

        read_project_envelope(response).await
    }

    /// Update a project, id pinned. The draft is the full metadata payload;
    /// the backend merges it into the existing record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    #[instrument(skip(self, token, draft), fields(id = %id))]
    pub async fn update(
        &self,
        token: &SecretString,
        id: &ProjectId,
        draft: &ProjectDraft,
    ) -> Result<Project, StoreError> {
        let response = self
            .inner
            .http
            .put(self.url(&format!("/projects/{id}")))
            .bearer_auth(token.expose_secret())
            .json(draft)
            .send()
            .await
            .map_err(StoreError::network)?;

        read_project_envelope(response).await
    }

    /// Delete a project from the remote store.
    ///
    /// Callers must have obtained explicit operator confirmation before
    /// issuing this call; see [`crate::projects::ProjectList::request_delete`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete(
        &self,
        token: &SecretString,
        id: &ProjectId,
    ) -> Result<(), StoreError> {
        let response = self
            .inner
            .http
            .delete(self.url(&format!("/projects/{id}")))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(StoreError::network)?;

        let (status, envelope) = read_envelope::<AckEnvelope>(response).await?;
        if !envelope.success {
            return Err(StoreError::rejected(status, envelope.rejection()));
        }
        Ok(())
    }

    /// Upload an image file, returning the durable URL the backend assigned.
    ///
    /// Multipart form with a single `image` field. This is phase one of the
    /// two-phase write; see [`writer`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on network failure or envelope rejection.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(content_type)
            .map_err(StoreError::network)?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .inner
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(StoreError::network)?;

        let (status, envelope) = read_envelope::<UploadEnvelope>(response).await?;
        if !envelope.success {
            return Err(StoreError::rejected(status, rejection(envelope.message)));
        }
        envelope
            .image_url
            .ok_or_else(|| StoreError::Invalid("upload succeeded without imageUrl".to_owned()))
    }

    /// Exchange email/password credentials for a session token and identity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] with the backend's message on bad
    /// credentials, [`StoreError::Network`] when the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, Operator), StoreError> {
        let response = self
            .inner
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(StoreError::network)?;

        let (status, envelope) = read_envelope::<LoginEnvelope>(response).await?;
        if !envelope.success {
            return Err(StoreError::rejected(status, rejection(envelope.message)));
        }
        match (envelope.token, envelope.admin) {
            (Some(token), Some(admin)) => Ok((token, admin)),
            _ => Err(StoreError::Invalid(
                "login succeeded without token or admin".to_owned(),
            )),
        }
    }

    /// Verify a stored token and fetch the operator identity behind it.
    ///
    /// # Errors
    ///
    /// Any failure here means the token is not usable; the session gate
    /// treats every error the same way (clear and re-login).
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &SecretString) -> Result<Operator, StoreError> {
        let response = self
            .inner
            .http
            .get(self.url("/auth/verify"))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(StoreError::network)?;

        let (status, envelope) = read_envelope::<VerifyEnvelope>(response).await?;
        if !envelope.success {
            return Err(StoreError::rejected(status, rejection(envelope.message)));
        }
        envelope
            .admin
            .ok_or_else(|| StoreError::Invalid("verify succeeded without admin".to_owned()))
    }
}

/// Read and deserialize a response envelope.
///
/// The backend encodes domain failures in the envelope's `success` flag, so
/// the body is parsed regardless of HTTP status; a non-success status with an
/// unparseable body becomes a rejection carrying the status line.
async fn read_envelope<E: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<(u16, E), StoreError> {
    let status = response.status();
    let body = response.text().await.map_err(StoreError::network)?;

    match serde_json::from_str::<E>(&body) {
        Ok(envelope) => Ok((status.as_u16(), envelope)),
        Err(err) if status.is_success() => Err(StoreError::Invalid(err.to_string())),
        Err(_) => Err(StoreError::rejected(status.as_u16(), format!("HTTP {status}"))),
    }
}

async fn read_project_envelope(response: reqwest::Response) -> Result<Project, StoreError> {
    let (status, envelope) = read_envelope::<ProjectEnvelope>(response).await?;
    if !envelope.success {
        return Err(StoreError::rejected(status, rejection(envelope.message)));
    }
    envelope
        .project
        .ok_or_else(|| StoreError::Invalid("write succeeded without project".to_owned()))
}

fn rejection(message: Option<String>) -> String {
    message.unwrap_or_else(|| alkhair_core::GENERIC_REJECTION.to_owned())
}
