//! Source-diverse top-N selection over a scored pool

use std::collections::HashSet;

use digest_core::{ScoredArticle, SelectedArticle};

/// Configuration for `select`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Maximum number of articles returned
    pub max_count: usize,
    /// Accepted count after which a source may repeat in the first pass
    pub relaxation_point: usize,
    /// Also drop articles scoring zero or below
    pub drop_non_positive: bool,
    /// Flag the top entry as featured (category-keyed output)
    pub mark_featured: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_count: 9,
            relaxation_point: 6,
            drop_non_positive: false,
            mark_featured: true,
        }
    }
}

impl SelectionPolicy {
    /// Flat essay lists: positive scores only, no featured flag
    pub fn essays() -> Self {
        Self {
            max_count: 9,
            relaxation_point: 5,
            drop_non_positive: true,
            mark_featured: false,
        }
    }
}

/// Pick up to `max_count` articles, best first, preferring distinct sources
///
/// Ties keep pool order. No URL appears twice in the result.
pub fn select(scored: Vec<ScoredArticle>, policy: &SelectionPolicy) -> Vec<SelectedArticle> {
    let mut pool: Vec<ScoredArticle> = scored
        .into_iter()
        .filter(|a| !a.is_excluded())
        .filter(|a| !policy.drop_non_positive || a.score > 0)
        .collect();

    // sort_by is stable
    pool.sort_by(|a, b| b.score.cmp(&a.score));

    let max = policy.max_count;
    let mut accepted: Vec<&ScoredArticle> = Vec::with_capacity(max.min(pool.len()));
    let mut used_urls: HashSet<&str> = HashSet::new();
    let mut used_sources: HashSet<&str> = HashSet::new();

    // First pass: distinct sources until the relaxation point
    for candidate in &pool {
        if accepted.len() >= max {
            break;
        }
        let url = candidate.article.url.as_str();
        let source = candidate.article.source_id.as_str();
        if used_urls.contains(url) {
            continue;
        }
        if !used_sources.contains(source) || accepted.len() >= policy.relaxation_point {
            accepted.push(candidate);
            used_urls.insert(url);
            used_sources.insert(source);
        }
    }

    // Second pass: fill remaining slots with the best leftovers
    if accepted.len() < max {
        for candidate in &pool {
            if accepted.len() >= max {
                break;
            }
            if used_urls.insert(candidate.article.url.as_str()) {
                accepted.push(candidate);
            }
        }
    }

    accepted
        .into_iter()
        .take(max)
        .enumerate()
        .map(|(rank, candidate)| SelectedArticle {
            featured: policy.mark_featured.then_some(rank == 0),
            ..SelectedArticle::from(&candidate.article)
        })
        .collect()
}
