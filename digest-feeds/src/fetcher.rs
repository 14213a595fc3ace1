//! The feed fetching seam

use async_trait::async_trait;

use digest_core::RawArticle;

use crate::error::FeedError;

/// Source of raw articles for a feed URL
///
/// Implementations return the feed's items in feed order. Callers treat an
/// error as "zero articles from this feed".
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch and parse one feed
    async fn fetch(&self, url: &str) -> Result<Vec<RawArticle>, FeedError>;

    /// Fetcher name (for logging)
    fn fetcher_type(&self) -> &'static str;
}
