//! Al-Khair Core - Shared types library.
//!
//! This crate provides common types used across the Al-Khair web components:
//! - `site` - Public bilingual marketing site
//! - `admin` - Internal administration panel
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Persistence
//! is owned entirely by the remote backend API; both binaries talk to it over
//! HTTP and share the wire types defined here.
//!
//! # Modules
//!
//! - [`types`] - Domain types: projects, identifiers, operator identity
//! - [`store`] - Wire envelopes and the error taxonomy for the backend API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::*;
pub use types::*;
