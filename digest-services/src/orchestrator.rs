//! Category Orchestrator
//!
//! Drives fetch → score → select for every category of a run, either
//! concurrently and independently, or one category at a time with a shared
//! set of already-used URLs.

use std::collections::HashSet;
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::FutureExt;
use tracing::{debug, info, instrument, warn};

use digest_core::{
    CategoryConfig, CategoryDigest, DailyDigest, DigestError, DigestResult, RawArticle,
    SelectedArticle,
};
use digest_feeds::FeedFetcher;

use crate::config::PipelineConfig;
use crate::scorer::{ArticleScorer, ScoringContext};
use crate::selector::{select, SelectionPolicy};

/// URLs already claimed by an earlier category in the same run
pub type UsedUrls = HashSet<String>;

/// How categories of one run relate to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrchestrationPolicy {
    /// All categories concurrently, no cross-category dedup
    #[default]
    Parallel,
    /// Categories in catalog order, an article is used by at most one category
    Sequential,
}

impl fmt::Display for OrchestrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestrationPolicy::Parallel => write!(f, "parallel"),
            OrchestrationPolicy::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for OrchestrationPolicy {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parallel" => Ok(OrchestrationPolicy::Parallel),
            "sequential" => Ok(OrchestrationPolicy::Sequential),
            other => Err(DigestError::config(format!(
                "unknown orchestration policy '{}' (expected 'parallel' or 'sequential')",
                other
            ))),
        }
    }
}

/// Fetch → score → select for one pool of feeds
#[derive(Clone)]
struct Pipeline {
    fetcher: Arc<dyn FeedFetcher>,
    scorer: Arc<ArticleScorer>,
    selection: SelectionPolicy,
    items_per_feed: usize,
}

impl Pipeline {
    /// Fetch every feed concurrently and concatenate in feed order
    async fn collect_pool(&self, feed_urls: &[String]) -> Vec<RawArticle> {
        let fetches = feed_urls.iter().map(|url| async move {
            let result = self.fetcher.fetch(url).await;
            (url, result)
        });

        let mut pool = Vec::new();
        for (url, result) in join_all(fetches).await {
            match result {
                Ok(items) => {
                    debug!("Fetched {} items from {}", items.len(), url);
                    pool.extend(items.into_iter().take(self.items_per_feed));
                }
                Err(e) => {
                    warn!("Failed to fetch feed {}: {}", url, e);
                }
            }
        }
        pool
    }

    async fn run(
        &self,
        feed_urls: &[String],
        keywords: &[String],
        used: Option<&UsedUrls>,
        now: DateTime<Utc>,
    ) -> Vec<SelectedArticle> {
        let mut pool = self.collect_pool(feed_urls).await;

        if let Some(used) = used {
            let before = pool.len();
            pool.retain(|article| !used.contains(&article.url));
            if pool.len() < before {
                debug!(
                    "Dropped {} articles already used by earlier categories",
                    before - pool.len()
                );
            }
        }

        let ctx = ScoringContext::new(keywords);
        let scored = self.scorer.score_all(pool, &ctx, now);
        select(scored, &self.selection)
    }
}

/// Runs the digest pipeline over a set of categories
pub struct CategoryOrchestrator {
    policy: OrchestrationPolicy,
    categories: Pipeline,
    essays: Pipeline,
}

impl CategoryOrchestrator {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, config: &PipelineConfig) -> Self {
        info!(
            "Initializing CategoryOrchestrator (policy: {}, fetcher: {}, items per feed: {})",
            config.orchestration,
            fetcher.fetcher_type(),
            config.items_per_feed
        );
        Self {
            policy: config.orchestration,
            categories: Pipeline {
                fetcher: Arc::clone(&fetcher),
                scorer: Arc::new(ArticleScorer::new(config.category_scoring.clone())),
                selection: config.category_selection.clone(),
                items_per_feed: config.items_per_feed,
            },
            essays: Pipeline {
                fetcher,
                scorer: Arc::new(ArticleScorer::new(config.essay_scoring.clone())),
                selection: config.essay_selection.clone(),
                items_per_feed: config.items_per_feed,
            },
        }
    }

    /// The active orchestration policy
    pub fn policy(&self) -> OrchestrationPolicy {
        self.policy
    }

    /// Run every category under the configured policy
    ///
    /// The sequential policy starts from an empty used-URL set for this run.
    #[instrument(skip(self, categories), fields(policy = %self.policy, categories = categories.len()))]
    pub async fn run_all(
        &self,
        categories: &[CategoryConfig],
        now: DateTime<Utc>,
    ) -> DigestResult<DailyDigest> {
        validate_categories(categories)?;

        let digest = match self.policy {
            OrchestrationPolicy::Parallel => self.run_parallel(categories, now).await?,
            OrchestrationPolicy::Sequential => {
                let mut used = UsedUrls::new();
                self.run_sequential(categories, &mut used, now).await?
            }
        };

        info!(
            "Digest built: {} categories, {} articles",
            digest.len(),
            digest.values().map(|c| c.articles.len()).sum::<usize>()
        );
        Ok(digest)
    }

    /// Every category as its own task; a failed feed only empties its own slot
    async fn run_parallel(
        &self,
        categories: &[CategoryConfig],
        now: DateTime<Utc>,
    ) -> DigestResult<DailyDigest> {
        let handles: Vec<_> = categories
            .iter()
            .map(|category| {
                let pipeline = self.categories.clone();
                let feed_urls = category.feed_urls.clone();
                let keywords = category.keywords.clone();
                tokio::spawn(async move { pipeline.run(&feed_urls, &keywords, None, now).await })
            })
            .collect();

        let mut digest = DailyDigest::new();
        for (category, result) in categories.iter().zip(join_all(handles).await) {
            let articles = result.map_err(|e| DigestError::pipeline(&category.key, e.to_string()))?;
            debug!("Category {} selected {} articles", category.key, articles.len());
            digest.insert(category.key.clone(), CategoryDigest::new(category, articles));
        }
        Ok(digest)
    }

    /// Categories one after another, threading `used` through the run
    ///
    /// URLs selected for a category are appended to `used` and are not
    /// eligible for any later category.
    pub async fn run_sequential(
        &self,
        categories: &[CategoryConfig],
        used: &mut UsedUrls,
        now: DateTime<Utc>,
    ) -> DigestResult<DailyDigest> {
        validate_categories(categories)?;

        let mut digest = DailyDigest::new();
        for category in categories {
            let articles = AssertUnwindSafe(self.categories.run(
                &category.feed_urls,
                &category.keywords,
                Some(&*used),
                now,
            ))
            .catch_unwind()
            .await
            .map_err(|panic| DigestError::pipeline(&category.key, panic_message(panic)))?;
            used.extend(articles.iter().map(|a| a.url.clone()));
            debug!(
                "Category {} selected {} articles ({} URLs used so far)",
                category.key,
                articles.len(),
                used.len()
            );
            digest.insert(category.key.clone(), CategoryDigest::new(category, articles));
        }
        Ok(digest)
    }

    /// Flat essay list pooled from `feed_urls`
    #[instrument(skip(self, feed_urls), fields(feeds = feed_urls.len()))]
    pub async fn run_flat(
        &self,
        feed_urls: &[String],
        now: DateTime<Utc>,
    ) -> DigestResult<Vec<SelectedArticle>> {
        for url in feed_urls {
            validate_feed_url("essays", url)?;
        }

        let articles = AssertUnwindSafe(self.essays.run(feed_urls, &[], None, now))
            .catch_unwind()
            .await
            .map_err(|panic| DigestError::pipeline("essays", panic_message(panic)))?;
        info!("Essay digest built: {} articles", articles.len());
        Ok(articles)
    }
}

/// Text of a caught panic payload
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("pipeline panicked: {}", detail)
}

fn validate_categories(categories: &[CategoryConfig]) -> DigestResult<()> {
    let mut keys = HashSet::new();
    for category in categories {
        if !keys.insert(category.key.as_str()) {
            return Err(DigestError::config(format!(
                "duplicate category key '{}'",
                category.key
            )));
        }
        for url in &category.feed_urls {
            validate_feed_url(&category.key, url)?;
        }
    }
    Ok(())
}

fn validate_feed_url(owner: &str, feed_url: &str) -> DigestResult<()> {
    match url::Url::parse(feed_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(DigestError::config(format!(
            "feed '{}' in {} has unsupported scheme '{}'",
            feed_url,
            owner,
            parsed.scheme()
        ))),
        Err(e) => Err(DigestError::config(format!(
            "feed '{}' in {} is not a valid URL: {}",
            feed_url, owner, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(key: &str, feeds: &[&str]) -> CategoryConfig {
        CategoryConfig::new(key, key, "", feeds, &[])
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "parallel".parse::<OrchestrationPolicy>().unwrap(),
            OrchestrationPolicy::Parallel
        );
        assert_eq!(
            " Sequential ".parse::<OrchestrationPolicy>().unwrap(),
            OrchestrationPolicy::Sequential
        );
        assert!("both".parse::<OrchestrationPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for policy in [OrchestrationPolicy::Parallel, OrchestrationPolicy::Sequential] {
            assert_eq!(policy.to_string().parse::<OrchestrationPolicy>().unwrap(), policy);
        }
        assert_eq!(OrchestrationPolicy::default(), OrchestrationPolicy::Parallel);
    }

    #[test]
    fn test_validate_categories() {
        let ok = vec![
            category("a", &["https://example.com/a.xml"]),
            category("b", &["http://example.com/b.xml"]),
        ];
        assert!(validate_categories(&ok).is_ok());

        let duplicate = vec![category("a", &[]), category("a", &[])];
        assert!(matches!(
            validate_categories(&duplicate),
            Err(DigestError::Config(_))
        ));

        let bad_url = vec![category("a", &["not a url"])];
        assert!(validate_categories(&bad_url).is_err());

        let bad_scheme = vec![category("a", &["ftp://example.com/feed"])];
        assert!(validate_categories(&bad_scheme).is_err());
    }
}
