//! Al-Khair Admin library.
//!
//! This crate provides the admin panel functionality as a library, allowing
//! it to be tested and reused. The binary in `main.rs` wires it to a socket.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - All persistence lives in the remote backend API; this process keeps only
//!   an in-memory project list and a session file on disk
//! - [`backend::StoreClient`] - authenticated client for the backend store
//! - [`backend::writer`] - the upload-then-write flow for image-bearing edits
//! - [`projects::ProjectList`] - owned in-memory collection for the panel
//! - [`session::SessionContext`] - operator session state, gate, and events

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod projects;
pub mod routes;
pub mod session;
pub mod state;
