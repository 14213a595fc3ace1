//! Article data structures flowing through the fetch → score → select pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score returned for articles that must never be selected.
///
/// Anything at or below this value is treated as excluded by the selector.
pub const EXCLUDED_SCORE: i64 = -1000;

/// An article as returned by a feed fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Article title
    pub title: String,
    /// Article URL (identity of the article)
    pub url: String,
    /// Publication date, `None` when the feed gave nothing parsable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Feed the article was fetched from
    pub source_id: String,
    /// Plain-text excerpt, possibly empty
    #[serde(default)]
    pub snippet: String,
}

impl RawArticle {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        published_at: Option<DateTime<Utc>>,
        source_id: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            published_at,
            source_id: source_id.into(),
            snippet: snippet.into(),
        }
    }

    /// Age in hours relative to `now`, `None` if the publication date is unknown.
    ///
    /// Future timestamps count as zero hours old.
    pub fn age_hours(&self, now: DateTime<Utc>) -> Option<f64> {
        let published_at = self.published_at?;
        let millis = (now - published_at).num_milliseconds().max(0);
        Some(millis as f64 / 3_600_000.0)
    }
}

/// A raw article paired with its quality score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub article: RawArticle,
    pub score: i64,
}

impl ScoredArticle {
    pub fn new(article: RawArticle, score: i64) -> Self {
        Self { article, score }
    }

    /// Whether the scorer rejected this article outright
    pub fn is_excluded(&self) -> bool {
        self.score <= EXCLUDED_SCORE
    }
}

/// An entry of a final selection, as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedArticle {
    pub title: String,
    pub url: String,
    /// Only present in category-keyed digests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl From<&RawArticle> for SelectedArticle {
    fn from(article: &RawArticle) -> Self {
        Self {
            title: article.title.clone(),
            url: article.url.clone(),
            featured: None,
        }
    }
}
