//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::PublicClient;
use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The site is read-only, so the state is just
/// configuration plus the cached public backend client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    public: PublicClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let public = PublicClient::new(&config.backend);

        Self {
            inner: Arc::new(AppStateInner { config, public }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the public backend client.
    #[must_use]
    pub fn public(&self) -> &PublicClient {
        &self.inner.public
    }
}
