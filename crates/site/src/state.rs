//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, BackendClient};
use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// Cheap to clone: configuration and the backend client sit behind one
/// `Arc` and never change after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create the application state and the backend HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, ApiError> {
        let backend = BackendClient::new(&config.api)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, backend }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the waitlist backend client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }
}
