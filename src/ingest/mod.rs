//! Cache-first ingestion orchestration.
//!
//! One linear pass per call: validate the configuration, consult the cache
//! when enabled, fall back to a full fetch-and-transform, repopulate the
//! cache on success. Only configuration and fetch failures terminate a
//! call; cache faults are absorbed as warnings because the cache is an
//! optimization, not a source of truth.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::app::Result;
use crate::config::Config;
use crate::domain::Post;
use crate::fetcher::{FeedFetcher, HttpFetcher};
use crate::store::JsonCache;
use crate::transform::Transformer;

pub struct Ingestor {
    fetcher: Arc<dyn FeedFetcher + Send + Sync>,
    transformer: Transformer,
    cache: JsonCache,
}

impl Ingestor {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    /// Wire in a different fetcher, e.g. a scripted one in tests.
    pub fn with_fetcher(fetcher: Arc<dyn FeedFetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            transformer: Transformer::new(),
            cache: JsonCache::new(),
        }
    }

    /// Produce the user's full post batch.
    ///
    /// A non-empty cached batch is returned as-is, regardless of age. An
    /// empty cached batch is indistinguishable from a miss and falls
    /// through to a fetch, so a feed that legitimately has zero items is
    /// re-fetched on every run.
    pub async fn get_posts(&self, config: &Config) -> Result<Vec<Post>> {
        config.validate()?;

        let cache_file = config.cache.file_for(&config.username);

        if config.cache.enabled {
            debug!(path = %cache_file.display(), "checking cache for posts");
            let cached = self.cache.read(&cache_file);
            if !cached.is_empty() {
                return Ok(cached);
            }
        }

        let items = self.fetcher.fetch(&config.username).await?;
        let posts: Vec<Post> = items
            .into_iter()
            .map(|item| self.transformer.transform(item))
            .collect();

        if config.cache.enabled {
            if let Err(err) = self.cache.write(&cache_file, &posts) {
                warn!(%err, "failed to write posts cache");
            }
        }

        Ok(posts)
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new()
    }
}
