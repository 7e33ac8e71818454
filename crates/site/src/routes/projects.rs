//! Project detail route handler.
//!
//! Resolution goes through [`PublicClient::resolve_by_id`]: a scan over the
//! public list, because the backend exposes no single-item public endpoint.
//! A missing project renders a dedicated not-found page; a store failure
//! surfaces through [`AppError`]. Neither is retried.
//!
//! [`PublicClient::resolve_by_id`]: crate::backend::PublicClient::resolve_by_id

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use alkhair_core::{Project, ProjectId};

use crate::backend::ResolveError;
use crate::error::AppError;
use crate::filters;
use crate::i18n::{Lang, LangQuery};
use crate::state::AppState;

/// Project detail page template. Shows the full, untruncated description.
#[derive(Template, WebTemplate)]
#[template(path = "project.html")]
pub struct ProjectTemplate {
    pub lang: Lang,
    pub toggle_href: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub created_label: String,
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub lang: Lang,
    pub toggle_href: String,
}

/// Display a single project.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Response, AppError> {
    let lang = Lang::from_code(query.lang.as_deref());
    let id = ProjectId::new(id);

    match state.public().resolve_by_id(&id).await {
        Ok(project) => Ok(detail(lang, &project, &id).into_response()),
        Err(ResolveError::NotFound) => Ok((
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                lang,
                toggle_href: toggle_href(lang, &format!("/projects/{id}")),
            },
        )
            .into_response()),
        Err(ResolveError::Store(err)) => Err(AppError::Store(err)),
    }
}

/// Fallback handler for unknown paths.
pub async fn not_found(Query(query): Query<LangQuery>) -> Response {
    let lang = Lang::from_code(query.lang.as_deref());
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            lang,
            toggle_href: format!("/?lang={}", lang.toggle().code()),
        },
    )
        .into_response()
}

fn detail(lang: Lang, project: &Project, id: &ProjectId) -> ProjectTemplate {
    ProjectTemplate {
        lang,
        toggle_href: toggle_href(lang, &format!("/projects/{id}")),
        name: project.name.clone(),
        description: project.description.clone(),
        image: project.image_url().map(ToOwned::to_owned),
        created_label: project.created_at.format("%b %-d, %Y").to_string(),
    }
}

fn toggle_href(lang: Lang, path: &str) -> String {
    format!("{path}?lang={}", lang.toggle().code())
}
