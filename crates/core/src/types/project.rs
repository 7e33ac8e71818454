//! Project entity and write-side draft.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ProjectId;

/// A portfolio project as stored by the backend.
///
/// The wire format follows the backend's document shape: the id travels as
/// `_id` and the creation timestamp as `createdAt`. `created_at` is assigned
/// by the store and never mutated; it is used only for display ordering and
/// formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned unique identifier, immutable.
    #[serde(rename = "_id")]
    pub id: ProjectId,
    /// Non-empty display name.
    pub name: String,
    /// Free text, unbounded; truncated for list display.
    pub description: String,
    /// URL of a previously uploaded asset. Absent or empty means no image.
    #[serde(default)]
    pub image: Option<String>,
    /// Store-assigned creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// The image URL, if one is set and non-empty.
    ///
    /// The backend stores an empty string for projects created without an
    /// image, so both `None` and `""` mean "no image to render".
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }
}

/// Metadata payload for creating or updating a project.
///
/// `image` is an already-resolved URL - never a raw file. Resolving a local
/// file into a URL (the upload step) is the two-phase writer's job; the
/// repository client only ever ships this flat structure. An empty `image`
/// means "no image" on create and is never sent for an update that keeps the
/// existing image (the prior URL is carried verbatim instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl ProjectDraft {
    /// Check the client-side required fields.
    ///
    /// Must pass before any network call is made: the backend also validates,
    /// but a blank name or description never leaves the process.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank
    /// required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "description" });
        }
        Ok(())
    }
}

/// Client-side validation failure, raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is empty or whitespace-only.
    #[error("{field} is required")]
    MissingField {
        /// Name of the blank field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, description: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.to_owned(),
            description: description.to_owned(),
            image: String::new(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert!(draft("Warehouse", "Steel frame warehouse").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert_eq!(
            draft("  ", "x").validate(),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        assert_eq!(
            draft("Warehouse", "").validate(),
            Err(ValidationError::MissingField { field: "description" })
        );
    }

    #[test]
    fn test_project_wire_format() {
        let json = r#"{
            "_id": "p1",
            "name": "Warehouse",
            "description": "...",
            "image": "https://x/1.png",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, ProjectId::new("p1"));
        assert_eq!(project.image_url(), Some("https://x/1.png"));

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["_id"], "p1");
        assert_eq!(back["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_missing_or_empty_image_renders_as_none() {
        let json = r#"{"_id":"p2","name":"n","description":"d","createdAt":"2024-01-01T00:00:00Z"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.image_url(), None);

        let empty = Project {
            image: Some(String::new()),
            ..project
        };
        assert_eq!(empty.image_url(), None);
    }
}
