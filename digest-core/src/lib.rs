//! Core types for the daily article digest
//!
//! This crate defines the shared data structures used across the digest,
//! including raw feed articles, scored articles, selections and the
//! per-category configuration.

pub mod article;
pub mod category;
pub mod error;

pub use article::{RawArticle, ScoredArticle, SelectedArticle, EXCLUDED_SCORE};
pub use category::{CategoryConfig, CategoryDigest, DailyDigest};
pub use error::{DigestError, DigestResult};
