//! Core types for the Al-Khair web platform.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the public site and the admin panel.

pub mod id;
pub mod identity;
pub mod project;

pub use id::ProjectId;
pub use identity::Operator;
pub use project::{Project, ProjectDraft, ValidationError};
