//! RSS Feed Client for the daily digest
//!
//! Fetches and parses RSS/Atom feeds into `RawArticle`s.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use reqwest::Client;
use tracing::debug;

use digest_core::RawArticle;

use crate::error::FeedError;
use crate::fetcher::FeedFetcher;

/// Per-feed timeout; a feed that does not answer in time counts as failed
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "DailyDigest/1.0";

/// RSS/Atom feed client
pub struct RssFetcher {
    client: Client,
}

impl RssFetcher {
    /// Create a new RSS client with the default per-feed timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_FEED_TIMEOUT)
    }

    /// Create with a custom per-feed timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for RssFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedFetcher for RssFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawArticle>, FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::ApiError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", url),
            });
        }

        let content = response
            .bytes()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        let articles = parse_feed(&content, url)?;
        debug!("Parsed {} items from {}", articles.len(), url);
        Ok(articles)
    }

    fn fetcher_type(&self) -> &'static str {
        "rss"
    }
}

/// Parse an RSS or Atom document, tagging every article with `feed_url`
pub fn parse_feed(content: &[u8], feed_url: &str) -> Result<Vec<RawArticle>, FeedError> {
    // Try parsing as RSS first, then Atom
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Ok(parse_rss_channel(&channel, feed_url));
    }

    if let Ok(atom_feed) = atom_syndication::Feed::read_from(content) {
        return Ok(parse_atom_feed(&atom_feed, feed_url));
    }

    Err(FeedError::ParseError(format!(
        "Failed to parse feed: {}",
        feed_url
    )))
}

/// Parse RSS channel into RawArticles
fn parse_rss_channel(channel: &rss::Channel, feed_url: &str) -> Vec<RawArticle> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim().to_string();
            let url = item.link()?.trim().to_string();
            if title.is_empty() || url.is_empty() {
                return None;
            }

            // pubDate, then dc:date (RDF feeds), then a date embedded in the URL
            let published_at = item
                .pub_date()
                .and_then(parse_date)
                .or_else(|| {
                    item.dublin_core_ext()
                        .and_then(|dc| dc.dates().first())
                        .and_then(|d| parse_date(d))
                })
                .or_else(|| extract_date_from_url(&url));

            let snippet = item
                .description()
                .filter(|d| !d.trim().is_empty())
                .or_else(|| item.content())
                .map(strip_html)
                .unwrap_or_default();

            Some(RawArticle {
                title,
                url,
                published_at,
                source_id: feed_url.to_string(),
                snippet,
            })
        })
        .collect()
}

/// Parse Atom feed into RawArticles
fn parse_atom_feed(atom_feed: &atom_syndication::Feed, feed_url: &str) -> Vec<RawArticle> {
    atom_feed
        .entries()
        .iter()
        .filter_map(|entry| {
            let title = entry.title().as_str().trim().to_string();
            let url = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href().trim().to_string())
                .unwrap_or_default();

            if title.is_empty() || url.is_empty() {
                return None;
            }

            let published_at = entry
                .published()
                .or_else(|| Some(entry.updated()))
                .map(|d| d.with_timezone(&Utc));

            let summary_html = entry.summary().map(|s| s.as_str()).unwrap_or_default();
            let content_html = entry.content().and_then(|c| c.value()).unwrap_or_default();

            let snippet = if !summary_html.trim().is_empty() {
                strip_html(summary_html)
            } else {
                strip_html(content_html)
            };

            Some(RawArticle {
                title,
                url,
                published_at,
                source_id: feed_url.to_string(),
                snippet,
            })
        })
        .collect()
}

/// Parse RFC 2822 (RSS) or RFC 3339 (ISO) timestamps
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#\d+|[a-zA-Z]+);").expect("valid entity regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// /2025/12/09/ or /2025/12/9/
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d{4})/(\d{1,2})/(\d{1,2})/").expect("valid slash date regex"));
/// /2025-12-09/ or -2025-12-09-
static DASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/-](\d{4})-(\d{2})-(\d{2})[/-]").expect("valid dash date regex"));

/// Plain text of an HTML fragment, entities decoded, whitespace collapsed
fn strip_html(html: &str) -> String {
    let text = TAG.replace_all(html, " ");
    let text = ENTITY.replace_all(&text, |caps: &regex::Captures| {
        match &caps[1] {
            "nbsp" => " ".to_string(),
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            numeric if numeric.starts_with('#') => numeric[1..]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_default(),
            _ => caps[0].to_string(),
        }
    });
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Noon UTC of a date embedded in the URL path
fn extract_date_from_url(url: &str) -> Option<DateTime<Utc>> {
    [&*SLASH_DATE, &*DASH_DATE]
        .into_iter()
        .find_map(|pattern| {
            let caps = pattern.captures(url)?;
            NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            )
        })
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .map(|noon| DateTime::from_naive_utc_and_offset(noon, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED_URL: &str = "https://example.com/feed";

    #[test]
    fn test_strip_html() {
        let html = "<p>Hello <b>world</b></p>";
        assert_eq!(strip_html(html), "Hello world");
    }

    #[test]
    fn test_strip_html_decodes_once() {
        assert_eq!(strip_html("&amp;lt;b&amp;gt;"), "&lt;b&gt;");
        assert_eq!(strip_html("It&#8217;s &quot;fine&quot;"), "It\u{2019}s \"fine\"");
        assert_eq!(strip_html("&unknown; stays"), "&unknown; stays");
    }

    #[test]
    fn test_strip_html_entities_and_whitespace() {
        let html = "<p>Arts&nbsp;&amp;\n   Culture</p>";
        assert_eq!(strip_html(html), "Arts & Culture");
    }

    #[test]
    fn test_parse_rss() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <link>https://example.com</link>
    <description>Example feed</description>
    <item>
      <title>Why Cities Are Rethinking Their Streets</title>
      <link>https://example.com/streets</link>
      <pubDate>Tue, 10 Jun 2025 08:00:00 +0000</pubDate>
      <description>&lt;p&gt;A long &lt;b&gt;look&lt;/b&gt; at streets.&lt;/p&gt;</description>
    </item>
    <item>
      <title>No date here</title>
      <link>https://example.com/undated</link>
    </item>
    <item>
      <link>https://example.com/untitled</link>
    </item>
  </channel>
</rss>"#;

        let articles = parse_feed(xml.as_bytes(), FEED_URL).unwrap();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Why Cities Are Rethinking Their Streets");
        assert_eq!(first.url, "https://example.com/streets");
        assert_eq!(first.source_id, FEED_URL);
        assert_eq!(first.snippet, "A long look at streets.");
        assert_eq!(
            first.published_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 10, 8, 0, 0).unwrap())
        );

        let second = &articles[1];
        assert_eq!(second.published_at, None);
        assert_eq!(second.snippet, "");
    }

    #[test]
    fn test_parse_atom() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example:feed</id>
  <updated>2025-06-10T12:00:00Z</updated>
  <entry>
    <title>The Future of Reading</title>
    <id>urn:example:1</id>
    <updated>2025-06-10T12:00:00Z</updated>
    <published>2025-06-09T09:30:00Z</published>
    <link rel="alternate" href="https://example.com/reading"/>
    <summary>An essay on books.</summary>
  </entry>
</feed>"#;

        let articles = parse_feed(xml.as_bytes(), FEED_URL).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "The Future of Reading");
        assert_eq!(articles[0].url, "https://example.com/reading");
        assert_eq!(articles[0].snippet, "An essay on books.");
        assert_eq!(
            articles[0].published_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 9, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_garbage_fails() {
        let result = parse_feed(b"<html><body>not a feed</body></html>", FEED_URL);
        assert!(matches!(result, Err(FeedError::ParseError(_))));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_date("Thu, 02 Jan 2025 03:04:05 GMT"), Some(expected));
        assert_eq!(parse_date("2025-01-02T03:04:05Z"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_extract_date_from_url() {
        let date = extract_date_from_url("https://example.com/2025/3/7/story").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap());

        let dashed = extract_date_from_url("https://example.com/news/2024-11-30/story").unwrap();
        assert_eq!(dashed, Utc.with_ymd_and_hms(2024, 11, 30, 12, 0, 0).unwrap());

        assert!(extract_date_from_url("https://example.com/story").is_none());
    }

    #[test]
    fn test_extract_date_skips_impossible_slash_date() {
        // /2025/13/40/ matches the slash shape but is not a date
        let date = extract_date_from_url("https://example.com/2025/13/40/2024-02-29-leap/").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    }
}
