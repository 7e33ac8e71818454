//! Project management route handlers.
//!
//! The list page refreshes the in-memory collection wholesale from the
//! backend; create/update/delete apply their result locally on success
//! instead of refetching. Store failures surface as banners; an
//! `Unauthorized` answer invalidates the session and redirects to login.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use alkhair_core::{Project, ProjectId, StoreError};

use crate::backend::writer::{ImageFile, ProjectSubmission, ProjectWriter, WriterError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireOperator;
use crate::projects::ListStatus;
use crate::state::AppState;

/// Character budget for list-display descriptions.
const EXCERPT_LENGTH: usize = 120;

// =============================================================================
// View and form types
// =============================================================================

/// Project display data for templates.
#[derive(Clone)]
pub struct ProjectView {
    pub id: String,
    pub name: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub created_label: String,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            excerpt: excerpt(&project.description, EXCERPT_LENGTH),
            image: project.image_url().map(ToOwned::to_owned),
            created_label: project.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Query parameters for banner display.
#[derive(Debug, Deserialize)]
pub struct BannerQuery {
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Delete confirmation form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// Must be `"true"`; anything else cancels the delete.
    #[serde(default)]
    pub confirmed: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Project listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "projects/index.html")]
pub struct ProjectsIndexTemplate {
    pub projects: Vec<ProjectView>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

/// Add/edit form template. `existing` is `None` for the add form.
#[derive(Template, WebTemplate)]
#[template(path = "projects/form.html")]
pub struct ProjectFormTemplate {
    pub action: String,
    pub heading: &'static str,
    pub name: String,
    pub description: String,
    pub current_image: Option<String>,
    pub error: Option<String>,
}

impl ProjectFormTemplate {
    fn add() -> Self {
        Self {
            action: "/projects/new".to_owned(),
            heading: "Add New Project",
            name: String::new(),
            description: String::new(),
            current_image: None,
            error: None,
        }
    }

    fn edit(project: &Project) -> Self {
        Self {
            action: format!("/projects/{}/edit", project.id),
            heading: "Edit Project",
            name: project.name.clone(),
            description: project.description.clone(),
            current_image: project.image_url().map(ToOwned::to_owned),
            error: None,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the project list, refreshing it from the backend.
pub async fn index(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    Query(banner): Query<BannerQuery>,
) -> Result<Response, AppError> {
    let Some(token) = state.session().token() else {
        return Ok(Redirect::to("/login").into_response());
    };

    state.projects().write().await.begin_refresh();
    let result = state.store().list(&token).await;
    if let Err(err) = &result {
        if let Some(redirect) = invalidated(&state, err) {
            return Ok(redirect.into_response());
        }
    }
    state.projects().write().await.complete_refresh(result);

    let list = state.projects().read().await;
    let error = match list.status() {
        ListStatus::Error(message) => Some(message.clone()),
        _ => banner.error.clone(),
    };

    Ok(ProjectsIndexTemplate {
        projects: list.projects().map(ProjectView::from).collect(),
        error,
        notice: banner.notice,
    }
    .into_response())
}

/// Display the add-project form.
pub async fn new_form(RequireOperator(_operator): RequireOperator) -> impl IntoResponse {
    ProjectFormTemplate::add()
}

/// Create a project from a multipart form submission.
pub async fn create(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(token) = state.session().token() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let submission = read_submission(multipart).await?;

    let writer = ProjectWriter::new(state.store(), &token);
    match writer.create(submission.clone()).await {
        Ok((_outcome, project)) => {
            state.projects().write().await.apply_create(project);
            Ok(Redirect::to("/projects?notice=Project%20created").into_response())
        }
        Err(err) => Ok(write_failure(&state, ProjectFormTemplate::add(), &submission, err)),
    }
}

/// Display the edit form for a project.
pub async fn edit_form(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = ProjectId::new(id);
    match find_project(&state, &id).await? {
        Some(project) => Ok(ProjectFormTemplate::edit(&project).into_response()),
        None => Err(AppError::NotFound(format!("project {id}"))),
    }
}

/// Update a project from a multipart form submission.
pub async fn update(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(token) = state.session().token() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let id = ProjectId::new(id);
    let Some(existing) = find_project(&state, &id).await? else {
        return Err(AppError::NotFound(format!("project {id}")));
    };
    let submission = read_submission(multipart).await?;

    let writer = ProjectWriter::new(state.store(), &token);
    match writer.update(&existing, submission.clone()).await {
        Ok((_outcome, project)) => {
            state.projects().write().await.apply_update(project);
            Ok(Redirect::to("/projects?notice=Project%20updated").into_response())
        }
        Err(err) => Ok(write_failure(
            &state,
            ProjectFormTemplate::edit(&existing),
            &submission,
            err,
        )),
    }
}

/// Delete a project. The form must carry `confirmed=true`; anything else is
/// treated as a cancel and leaves all state untouched.
pub async fn delete(
    RequireOperator(_operator): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Form(form): axum::Form<DeleteForm>,
) -> Result<Response, AppError> {
    let Some(token) = state.session().token() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let id = ProjectId::new(id);

    let Some(pending) = state.projects().read().await.request_delete(&id) else {
        return Ok(redirect_with_error("This project no longer exists").into_response());
    };

    if form.confirmed != "true" {
        pending.cancel();
        return Ok(Redirect::to("/projects?notice=Deletion%20cancelled").into_response());
    }

    let id = pending.confirm();
    match state.store().delete(&token, &id).await {
        Ok(()) => {
            state.projects().write().await.apply_delete(&id);
            Ok(Redirect::to("/projects?notice=Project%20deleted").into_response())
        }
        Err(err) => {
            if let Some(redirect) = invalidated(&state, &err) {
                return Ok(redirect.into_response());
            }
            Ok(redirect_with_error(&err.to_string()).into_response())
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse the project form: text fields plus an optional image file. An image
/// field with no filename or no bytes means the operator picked nothing.
async fn read_submission(mut multipart: Multipart) -> Result<ProjectSubmission, AppError> {
    let mut name = String::new();
    let mut description = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_owned();
        match field_name.as_str() {
            "name" => name = field.text().await?,
            "description" => description = field.text().await?,
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await?;
                if !filename.is_empty() && !bytes.is_empty() {
                    image = Some(ImageFile {
                        filename,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(ProjectSubmission {
        name,
        description,
        image,
    })
}

/// Look up a project in the panel's collection, refreshing once on a miss
/// (the panel may have been restarted since the list was last fetched).
async fn find_project(state: &AppState, id: &ProjectId) -> Result<Option<Project>, AppError> {
    if let Some(project) = state.projects().read().await.get(id) {
        return Ok(Some(project.clone()));
    }

    let Some(token) = state.session().token() else {
        return Ok(None);
    };
    let result = state.store().list(&token).await;
    if let Err(err) = &result {
        if let Some(_redirect) = invalidated(state, err) {
            return Ok(None);
        }
    }
    state.projects().write().await.complete_refresh(result);

    Ok(state.projects().read().await.get(id).cloned())
}

/// Re-render a form after a failed write, preserving the operator's input.
fn write_failure(
    state: &AppState,
    mut template: ProjectFormTemplate,
    submission: &ProjectSubmission,
    err: WriterError,
) -> Response {
    if let WriterError::Upload(store_err) | WriterError::Store(store_err) = &err {
        if let Some(redirect) = invalidated(state, store_err) {
            return redirect.into_response();
        }
    }

    template.name = submission.name.clone();
    template.description = submission.description.clone();
    template.error = Some(err.to_string());
    template.into_response()
}

/// On an invalid-credential signal, clear the session and head to login.
fn invalidated(state: &AppState, err: &StoreError) -> Option<Redirect> {
    if matches!(err, StoreError::Unauthorized(_)) {
        state.session().invalidate();
        Some(Redirect::to("/login"))
    } else {
        None
    }
}

fn redirect_with_error(message: &str) -> Redirect {
    Redirect::to(&format!("/projects?error={}", urlencoding::encode(message)))
}

/// Truncate a description for list display on a character boundary.
fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("short", 120), "short");
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let text = "م".repeat(200);
        let cut = excerpt(&text, 120);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 123);
    }
}
