//! Two-phase project writes: upload the image, then write the metadata.
//!
//! A form submission carries name, description, and optionally a local image
//! file. The backend has no combined endpoint, so an image-bearing write is
//! two requests: `POST /upload` first, then the metadata `POST`/`PUT` with
//! the resolved URL. The phases never reorder, and a failed upload aborts the
//! whole operation before any metadata write.
//!
//! A metadata failure after a successful upload leaves the uploaded asset
//! orphaned on the backend; there is no compensating delete. The
//! [`UploadOutcome`] in the result keeps that phase visible to callers.

use secrecy::SecretString;
use tracing::instrument;

use alkhair_core::{Project, ProjectDraft, StoreError, ValidationError};

use super::StoreClient;

/// A project form submission, before any network activity.
#[derive(Debug, Clone)]
pub struct ProjectSubmission {
    pub name: String,
    pub description: String,
    /// A newly selected local image file, if the operator picked one.
    pub image: Option<ImageFile>,
}

/// Raw image file from a multipart form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What happened in the upload phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// A new file was uploaded; the metadata write used this URL.
    Uploaded(String),
    /// No new file; the previously stored URL was carried through verbatim.
    Kept(String),
    /// No new file and no prior image; the project has no image.
    None,
}

/// Failure shape for the two-phase write.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Client-side validation failed; zero network calls were made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The upload phase failed; the metadata write was never attempted.
    #[error("image upload failed: {0}")]
    Upload(StoreError),

    /// The metadata write failed. If an upload happened first, its asset is
    /// now orphaned on the backend.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates the two-phase write against a [`StoreClient`].
pub struct ProjectWriter<'a> {
    client: &'a StoreClient,
    token: &'a SecretString,
}

impl<'a> ProjectWriter<'a> {
    #[must_use]
    pub const fn new(client: &'a StoreClient, token: &'a SecretString) -> Self {
        Self { client, token }
    }

    /// Create a project from a form submission.
    ///
    /// # Errors
    ///
    /// [`WriterError::Validation`] before any network call for blank required
    /// fields; [`WriterError::Upload`] if the image upload fails;
    /// [`WriterError::Store`] if the metadata write fails.
    #[instrument(skip(self, submission), fields(name = %submission.name))]
    pub async fn create(
        &self,
        submission: ProjectSubmission,
    ) -> Result<(UploadOutcome, Project), WriterError> {
        let (outcome, draft) = self.prepare(submission, None).await?;
        let project = self.client.create(self.token, &draft).await?;
        Ok((outcome, project))
    }

    /// Update an existing project from a form submission.
    ///
    /// When the submission has no new image file, the existing image URL is
    /// carried through byte-identical - no re-upload, no clearing.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ProjectWriter::create`].
    #[instrument(skip(self, existing, submission), fields(id = %existing.id))]
    pub async fn update(
        &self,
        existing: &Project,
        submission: ProjectSubmission,
    ) -> Result<(UploadOutcome, Project), WriterError> {
        let (outcome, draft) = self.prepare(submission, Some(existing)).await?;
        let project = self
            .client
            .update(self.token, &existing.id, &draft)
            .await?;
        Ok((outcome, project))
    }

    /// Phases 1-2: validate, then resolve the effective image URL, uploading
    /// a new file first when one is present.
    async fn prepare(
        &self,
        submission: ProjectSubmission,
        existing: Option<&Project>,
    ) -> Result<(UploadOutcome, ProjectDraft), WriterError> {
        let mut draft = ProjectDraft {
            name: submission.name,
            description: submission.description,
            image: String::new(),
        };
        draft.validate()?;

        let outcome = match submission.image {
            Some(file) => {
                let url = self
                    .client
                    .upload_image(&file.filename, &file.content_type, file.bytes)
                    .await
                    .map_err(WriterError::Upload)?;
                UploadOutcome::Uploaded(url)
            }
            None => match existing.and_then(|p| p.image.clone()) {
                Some(url) if !url.is_empty() => UploadOutcome::Kept(url),
                _ => UploadOutcome::None,
            },
        };

        draft.image = match &outcome {
            UploadOutcome::Uploaded(url) | UploadOutcome::Kept(url) => url.clone(),
            UploadOutcome::None => String::new(),
        };

        Ok((outcome, draft))
    }
}
