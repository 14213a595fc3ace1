//! Pipeline configuration

use crate::orchestrator::OrchestrationPolicy;
use crate::scoring_policy::ScoringPolicy;
use crate::selector::SelectionPolicy;

/// Configuration for the digest pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How categories are run relative to each other
    pub orchestration: OrchestrationPolicy,
    /// Maximum items taken from each feed, in feed order
    pub items_per_feed: usize,
    /// Scoring for category digests
    pub category_scoring: ScoringPolicy,
    /// Selection for category digests
    pub category_selection: SelectionPolicy,
    /// Scoring for the flat essay digest
    pub essay_scoring: ScoringPolicy,
    /// Selection for the flat essay digest
    pub essay_selection: SelectionPolicy,
    /// How long a computed digest is reused (in seconds, 0 disables)
    pub cache_ttl_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            orchestration: OrchestrationPolicy::Parallel,
            items_per_feed: 10,
            category_scoring: ScoringPolicy::category_aware(),
            category_selection: SelectionPolicy::default(),
            essay_scoring: ScoringPolicy::essay_focused(),
            essay_selection: SelectionPolicy::essays(),
            cache_ttl_secs: 3600, // matches the Cache-Control max-age
        }
    }
}

impl PipelineConfig {
    /// Set the maximum article count for both digests
    pub fn with_max_articles(mut self, max_count: usize) -> Self {
        self.category_selection.max_count = max_count;
        self.essay_selection.max_count = max_count;
        self
    }
}
