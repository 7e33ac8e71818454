//! Home page route handler.
//!
//! One page carries the whole marketing surface: hero, services, about,
//! the public project grid, and contact. The grid shows six projects at a
//! time; "load more" reloads the page with a larger `count`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use alkhair_core::Project;

use crate::filters;
use crate::i18n::Lang;
use crate::state::AppState;

/// How many more projects each "load more" reveals.
const DISPLAY_STEP: usize = 6;

/// Character budget for grid-card descriptions; the full text lives on the
/// detail page.
const EXCERPT_LENGTH: usize = 120;

/// Project display data for the grid.
#[derive(Clone)]
pub struct ProjectCard {
    pub id: String,
    pub name: String,
    pub excerpt: String,
    pub image: Option<String>,
}

impl ProjectCard {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            excerpt: excerpt(&project.description, EXCERPT_LENGTH),
            image: project.image_url().map(ToOwned::to_owned),
        }
    }
}

/// Query parameters for the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub lang: Option<String>,
    pub count: Option<usize>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub lang: Lang,
    pub toggle_href: String,
    pub projects: Vec<ProjectCard>,
    pub error: bool,
    pub load_more_href: Option<String>,
}

/// Display the home page.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> impl IntoResponse {
    let lang = Lang::from_code(query.lang.as_deref());
    let shown = query.count.unwrap_or(DISPLAY_STEP).max(DISPLAY_STEP);

    let (projects, error, load_more_href) = match state.public().list_public().await {
        Ok(all) => {
            let cards: Vec<ProjectCard> = all
                .iter()
                .take(shown)
                .map(ProjectCard::from_project)
                .collect();
            let more = (cards.len() < all.len()).then(|| {
                format!(
                    "/?lang={}&count={}#projects",
                    lang.code(),
                    shown + DISPLAY_STEP
                )
            });
            (cards, false, more)
        }
        Err(err) => {
            // The visitor still gets the marketing page; only the grid
            // degrades into a banner.
            tracing::warn!(%err, "public project list unavailable");
            (Vec::new(), true, None)
        }
    };

    HomeTemplate {
        lang,
        toggle_href: format!("/?lang={}", lang.toggle().code()),
        projects,
        error,
        load_more_href,
    }
}

/// Truncate a description for grid display on a character boundary.
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
    fn test_excerpt_handles_arabic_text() {
        let text = "مشروع ".repeat(40);
        let cut = excerpt(&text, 120);
        assert!(cut.chars().count() <= 123);
        assert!(cut.ends_with("..."));
    }
}
