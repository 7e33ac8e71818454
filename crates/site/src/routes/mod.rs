//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Home page (marketing sections + project grid)
//! GET  /projects/{id}   - Project detail page
//! GET  /health          - Health check
//! ```
//!
//! Every page takes `?lang=en|ar`; the default is English.

pub mod home;
pub mod projects;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the site router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/projects/{id}", get(projects::show))
        .fallback(projects::not_found)
}
