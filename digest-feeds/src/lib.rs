//! Feed clients for the daily digest
//!
//! This crate provides:
//! - The `FeedFetcher` seam the pipeline pulls raw articles through
//! - `RssFetcher`: RSS/Atom over HTTP
//! - The static category catalog (feeds, names, gradients, keywords)

pub mod catalog;
pub mod error;
pub mod fetcher;
pub mod rss_client;

pub use catalog::{default_categories, essay_feeds};
pub use error::FeedError;
pub use fetcher::FeedFetcher;
pub use rss_client::{parse_feed, RssFetcher, DEFAULT_FEED_TIMEOUT};
