//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    services::catalog::{CatalogClient, CatalogError},
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogClient,
}

impl AppState {
    /// Build the application state, constructing the catalog client from
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client fails to build.
    pub fn new(config: AdminConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(config.catalog())?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        })
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
