//! Caching layer for segment searches.
//!
//! Split analyses of the same or overlapping journeys ask for the same
//! segments over and over (the origin leg of every split point is shared by
//! riders with the same card). Successful searches are cached per exact
//! query; failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::Journey;
use crate::split::{JourneySearchProvider, ProviderError, SegmentQuery};

/// Cached search result.
type SearchEntry = Arc<Vec<Journey>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 2000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Journey search provider with caching.
///
/// Wraps any provider and memoises successful results per `SegmentQuery`.
pub struct CachedProvider<P> {
    inner: P,
    searches: MokaCache<SegmentQuery, SearchEntry>,
}

impl<P> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, searches }
    }

}

impl<P: JourneySearchProvider> JourneySearchProvider for CachedProvider<P> {
    async fn search(&self, query: &SegmentQuery) -> Result<Vec<Journey>, ProviderError> {
        if let Some(cached) = self.searches.get(query).await {
            debug!(from = %query.from, to = %query.to, "segment search served from cache");
            return Ok(cached.as_ref().clone());
        }

        let journeys = self.inner.search(query).await?;

        self.searches
            .insert(query.clone(), Arc::new(journeys.clone()))
            .await;

        Ok(journeys)
    }
}
