//! Login and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Display the login page.
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Response {
    // Already-authenticated operators go straight to the dashboard.
    if state.session().current().is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        error: query.error,
        email: String::new(),
    }
    .into_response()
}

/// Handle a login submission.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state
        .session()
        .login(state.store(), &form.email, &form.password)
        .await
    {
        Ok(operator) => {
            tracing::info!(operator = %operator.name, "operator logged in");
            Redirect::to("/").into_response()
        }
        Err(err) => LoginTemplate {
            error: Some(err.to_string()),
            email: form.email,
        }
        .into_response(),
    }
}

/// Handle a logout action.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session().logout();
    Redirect::to("/login")
}
