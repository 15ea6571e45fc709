//! Application state shared across handlers.

use std::sync::Arc;

use craftpage_backend::{BackendClient, BackendError, Order};
use craftpage_core::content::{ContentRow, ContentSet};
use moka::future::Cache;
use tracing::instrument;

use crate::config::SiteConfig;
use crate::content::LandingContent;

/// Cache key for the landing copy; the page has exactly one entry.
const LANDING_KEY: &str = "landing";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the backend client, and the landing copy cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    backend: BackendClient,
    landing: Option<Cache<&'static str, Arc<LandingContent>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend)?;
        let landing = (!config.content_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1)
                .time_to_live(config.content_cache_ttl)
                .build()
        });

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                landing,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the backend client (anon key).
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Landing copy, from the cache when fresh.
    ///
    /// A failed fetch is logged and answered with the built-in copy; it is
    /// not cached, so the next request tries the backend again.
    pub async fn landing_content(&self) -> Arc<LandingContent> {
        let fetched = match &self.inner.landing {
            Some(cache) => cache
                .try_get_with(LANDING_KEY, self.fetch_landing())
                .await
                .map_err(|e| e.to_string()),
            None => self.fetch_landing().await.map_err(|e| e.to_string()),
        };

        fetched.unwrap_or_else(|error| {
            tracing::error!(%error, "Failed to load site content, using built-in copy");
            Arc::new(LandingContent::fallback())
        })
    }

    #[instrument(skip(self))]
    async fn fetch_landing(&self) -> Result<Arc<LandingContent>, BackendError> {
        let rows: Vec<ContentRow> = self
            .backend()
            .from("site_content")
            .select("*")
            .order("section", Order::Asc)
            .fetch()
            .await?;
        let stored: ContentSet = rows.into_iter().collect();
        tracing::debug!(documents = stored.known_len(), "Loaded site content");
        Ok(Arc::new(LandingContent::resolve(&stored)))
    }
}
