//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Dashboard (requires operator)
//! GET  /health                  - Health check
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! POST /logout                  - Logout action
//!
//! # Projects (all require operator)
//! GET  /projects                - Project list
//! GET  /projects/new            - Add-project form
//! POST /projects/new            - Create (multipart: name, description, image)
//! GET  /projects/{id}/edit      - Edit form
//! POST /projects/{id}/edit      - Update (multipart, image optional)
//! POST /projects/{id}/delete    - Delete (requires confirmed field)
//! ```

pub mod auth;
pub mod dashboard;
pub mod projects;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/projects", get(projects::index))
        .route("/projects/new", get(projects::new_form).post(projects::create))
        .route(
            "/projects/{id}/edit",
            get(projects::edit_form).post(projects::update),
        )
        .route("/projects/{id}/delete", post(projects::delete))
}
