//! Digest Service
//!
//! Serves the category digest and the flat essay digest, reusing a computed
//! result for the configured TTL.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use digest_core::{CategoryConfig, DailyDigest, DigestResult, SelectedArticle};
use digest_feeds::FeedFetcher;

use crate::config::PipelineConfig;
use crate::orchestrator::{CategoryOrchestrator, OrchestrationPolicy};

/// Longest reuse of a computed digest (one week)
pub const MAX_CACHE_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Cache entry with expiration
struct CacheEntry<T> {
    data: T,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() > at)
    }
}

type Cache<T> = RwLock<Option<CacheEntry<T>>>;

/// Digest service backed by a `CategoryOrchestrator`
pub struct DigestService {
    orchestrator: CategoryOrchestrator,
    categories: Vec<CategoryConfig>,
    essay_feeds: Vec<String>,
    cache_ttl: Duration,
    /// Last category digest
    digest_cache: Cache<DailyDigest>,
    /// Last essay digest
    essay_cache: Cache<Vec<SelectedArticle>>,
}

impl DigestService {
    /// Create a new DigestService
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        categories: Vec<CategoryConfig>,
        essay_feeds: Vec<String>,
        config: PipelineConfig,
    ) -> Self {
        info!(
            "Initializing DigestService ({} categories, {} essay feeds, cache TTL {}s)",
            categories.len(),
            essay_feeds.len(),
            config.cache_ttl_secs
        );
        Self {
            orchestrator: CategoryOrchestrator::new(fetcher, &config),
            categories,
            essay_feeds,
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            digest_cache: RwLock::new(None),
            essay_cache: RwLock::new(None),
        }
    }

    pub fn orchestration_policy(&self) -> OrchestrationPolicy {
        self.orchestrator.policy()
    }

    pub fn categories(&self) -> &[CategoryConfig] {
        &self.categories
    }

    /// Category-keyed digest, from cache when fresh
    #[instrument(skip(self))]
    pub async fn daily_digest(&self) -> DigestResult<DailyDigest> {
        self.cached(&self.digest_cache, "digest", || {
            self.orchestrator.run_all(&self.categories, Utc::now())
        })
        .await
    }

    /// Flat essay digest, from cache when fresh
    #[instrument(skip(self))]
    pub async fn daily_essays(&self) -> DigestResult<Vec<SelectedArticle>> {
        self.cached(&self.essay_cache, "essays", || {
            self.orchestrator.run_flat(&self.essay_feeds, Utc::now())
        })
        .await
    }

    /// Serve from `cache` when fresh, otherwise rebuild once
    ///
    /// The rebuild runs under the write lock, so requests arriving while a
    /// digest is being built wait for it instead of starting their own.
    async fn cached<T, F, Fut>(&self, cache: &Cache<T>, label: &str, build: F) -> DigestResult<T>
    where
        T: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DigestResult<T>>,
    {
        if self.cache_ttl.is_zero() {
            return build().await;
        }

        {
            let cache = cache.read().await;
            if let Some(entry) = cache.as_ref().filter(|entry| !entry.is_expired()) {
                debug!("Using cached {}", label);
                return Ok(entry.data.clone());
            }
        }

        let mut cache = cache.write().await;
        // Another request may have rebuilt while we waited for the lock
        if let Some(entry) = cache.as_ref().filter(|entry| !entry.is_expired()) {
            debug!("Using {} rebuilt by a concurrent request", label);
            return Ok(entry.data.clone());
        }

        let data = build().await?;
        *cache = Some(CacheEntry::new(data.clone(), self.cache_ttl));
        Ok(data)
    }

    /// Drop cached results so the next request recomputes
    pub async fn invalidate(&self) {
        *self.digest_cache.write().await = None;
        *self.essay_cache.write().await = None;
        info!("Digest cache cleared");
    }
}
