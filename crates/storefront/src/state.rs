//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogRepository;
use crate::config::StorefrontConfig;
use crate::cosmic::{CosmicClient, CosmicError};
use crate::middleware::PageCache;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog repository and the page cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogRepository<CosmicClient>,
    page_cache: PageCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Cosmic client cannot be built from the
    /// configuration.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CosmicError> {
        let catalog = CatalogRepository::new(CosmicClient::new(&config.cosmic)?);
        let page_cache = PageCache::new(config.revalidate);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                catalog,
                page_cache,
            }),
        })
    }

    /// Get a reference to the catalog repository.
    #[must_use]
    pub fn catalog(&self) -> &CatalogRepository<CosmicClient> {
        &self.inner.catalog
    }

    /// Get a handle to the page cache.
    #[must_use]
    pub fn page_cache(&self) -> &PageCache {
        &self.inner.page_cache
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::CosmicConfig;

    fn config(revalidate: Duration) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            revalidate,
            cosmic: CosmicConfig::new("coastal-surf", "key"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_page_cache_follows_revalidate_window() {
        let state = AppState::new(&config(Duration::from_secs(60))).unwrap();
        assert!(state.page_cache().is_enabled());

        let state = AppState::new(&config(Duration::ZERO)).unwrap();
        assert!(!state.page_cache().is_enabled());
    }

    #[test]
    fn test_clones_share_state() {
        let state = AppState::new(&config(Duration::ZERO)).unwrap();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.inner, &clone.inner));
    }
}
