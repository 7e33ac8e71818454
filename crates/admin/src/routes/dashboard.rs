//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::filters;
use crate::middleware::RequireOperator;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub operator_name: String,
    pub project_count: usize,
}

/// Display the dashboard.
pub async fn index(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let project_count = state.projects().read().await.len();

    DashboardTemplate {
        operator_name: operator.name,
        project_count,
    }
}
