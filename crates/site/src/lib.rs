//! Al-Khair Site library.
//!
//! The public, unauthenticated face of the Al-Khair projects portfolio:
//! a bilingual (English/Arabic) marketing site rendered server-side.
//!
//! # Architecture
//!
//! - Axum web framework with Askama server-side templates
//! - [`backend::PublicClient`] - cached read-only client for the public
//!   listing endpoint of the backend store
//! - [`i18n`] - static string tables swapped per request via `?lang=`
//!
//! The site never authenticates and never writes; all content management
//! happens in the separate admin binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod routes;
pub mod state;
