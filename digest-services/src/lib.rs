//! Business logic services for the daily article digest
//!
//! This crate provides the scoring-and-selection pipeline and the
//! orchestration that drives it across categories.

pub mod config;
pub mod digest_service;
pub mod orchestrator;
pub mod scorer;
pub mod scoring_policy;
pub mod selector;

pub use config::PipelineConfig;
pub use digest_service::{DigestService, MAX_CACHE_TTL_SECS};
pub use orchestrator::{CategoryOrchestrator, OrchestrationPolicy, UsedUrls};
pub use scorer::{ArticleScorer, ScoreBreakdown, ScoringContext};
pub use scoring_policy::{
    ExclusionRules, MatchMode, MatchScope, RecencyBand, RelevanceRule, ScoringPolicy, ScoringPreset,
    TermGroup, TitleRules,
};
pub use selector::{select, SelectionPolicy};
