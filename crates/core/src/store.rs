//! Wire types and error taxonomy for the backend store API.
//!
//! Every backend response shares the envelope `{ success, message?, ... }`.
//! Callers must branch on `success`, not the HTTP status alone: the backend
//! encodes some domain failures inside 200-level envelopes. The typed
//! envelopes below carry the payload field each endpoint adds.

use serde::Deserialize;

use crate::types::{Operator, Project};

/// Uniform failure shape for backend store operations.
///
/// Every client call is a single attempt - no retries anywhere - and failures
/// are surfaced to the caller immediately. All variants are recovered at the
/// view boundary and rendered as a visible message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The request could not complete (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with `success: false`; the server-provided
    /// message is carried verbatim for display.
    #[error("{0}")]
    Rejected(String),

    /// The backend signalled an invalid credential (401/403). The session
    /// gate reacts to this by clearing the stored session.
    #[error("{0}")]
    Unauthorized(String),

    /// The envelope claimed success but the expected payload was missing or
    /// unparseable.
    #[error("invalid response from store: {0}")]
    Invalid(String),
}

impl StoreError {
    /// Wrap a transport-level failure.
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    /// Classify an envelope rejection by HTTP status: credential failures
    /// become [`StoreError::Unauthorized`], everything else
    /// [`StoreError::Rejected`].
    #[must_use]
    pub fn rejected(status: u16, message: String) -> Self {
        if status == 401 || status == 403 {
            Self::Unauthorized(message)
        } else {
            Self::Rejected(message)
        }
    }
}

/// Fallback text when the backend rejects without a message.
pub const GENERIC_REJECTION: &str = "Request failed";

/// Envelope for `GET /projects` and `GET /projects/public`.
#[derive(Debug, Deserialize)]
pub struct ProjectsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Envelope for `POST /projects` and `PUT /projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProjectEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub project: Option<Project>,
}

/// Envelope for `DELETE /projects/{id}` and other payload-free responses.
#[derive(Debug, Deserialize)]
pub struct AckEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for `POST /upload`.
#[derive(Debug, Deserialize)]
pub struct UploadEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// Envelope for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub admin: Option<Operator>,
}

/// Envelope for `GET /auth/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub admin: Option<Operator>,
}

impl AckEnvelope {
    /// The rejection message, or the generic fallback.
    #[must_use]
    pub fn rejection(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| GENERIC_REJECTION.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_classification() {
        assert!(matches!(
            StoreError::rejected(401, "Invalid token".into()),
            StoreError::Unauthorized(_)
        ));
        assert!(matches!(
            StoreError::rejected(200, "Name is required".into()),
            StoreError::Rejected(msg) if msg == "Name is required"
        ));
    }

    #[test]
    fn test_projects_envelope_defaults() {
        // A failure envelope omits the projects field entirely.
        let env: ProjectsEnvelope =
            serde_json::from_str(r#"{"success":false,"message":"nope"}"#).unwrap();
        assert!(!env.success);
        assert!(env.projects.is_empty());
        assert_eq!(env.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_upload_envelope_field_name() {
        let env: UploadEnvelope =
            serde_json::from_str(r#"{"success":true,"imageUrl":"https://x/1.png"}"#).unwrap();
        assert_eq!(env.image_url.as_deref(), Some("https://x/1.png"));
    }
}
