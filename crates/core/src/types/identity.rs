//! Operator identity returned by the auth endpoints.

use serde::{Deserialize, Serialize};

/// Display metadata about an authenticated admin operator.
///
/// Returned by login and verify; persisted alongside the session token and
/// cleared together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator's display name.
    pub name: String,
    /// Operator's email, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
