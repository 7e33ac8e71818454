//! Authentication extractor for protected admin routes.
//!
//! Runs the session gate on every protected view entry: anonymous and
//! invalid sessions are redirected to the login page, unverified stored
//! sessions are verified against the backend first.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use alkhair_core::Operator;

use crate::session::GateState;
use crate::state::AppState;

/// Extractor that requires an authenticated operator.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireOperator(operator): RequireOperator,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", operator.name)
/// }
/// ```
pub struct RequireOperator(pub Operator);

/// Rejection: every ungated state lands on the login page.
pub struct RedirectToLogin;

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = RedirectToLogin;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.session();

        let gate = match session.entry_state() {
            GateState::Verifying => session.verify(state.store()).await,
            other => other,
        };

        match gate {
            GateState::Authenticated(operator) => Ok(Self(operator)),
            GateState::Anonymous | GateState::Verifying | GateState::Invalid => {
                Err(RedirectToLogin)
            }
        }
    }
}
