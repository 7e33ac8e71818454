//! Newtype ID for type-safe project references.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a [`Project`](super::Project).
///
/// Assigned by the backend store on creation and never reused. The value is
/// an opaque string (the store's document id); this wrapper prevents mixing
/// project ids with other string-typed values.
///
/// # Example
///
/// ```
/// use alkhair_core::ProjectId;
///
/// let id = ProjectId::new("66b2f1c9d4e5a01234567890");
/// assert_eq!(id.as_str(), "66b2f1c9d4e5a01234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_transparent() {
        let id = ProjectId::new("p1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p1\"");

        let back: ProjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_round_trip() {
        let id = ProjectId::from("abc123");
        assert_eq!(id.to_string(), "abc123");
    }
}
