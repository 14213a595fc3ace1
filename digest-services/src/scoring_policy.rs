//! Tunable point tables for the article scorer
//!
//! Every band, weight and vocabulary the scorer uses lives here so that a
//! deployment can tune them without touching the algorithm.

use std::fmt;
use std::str::FromStr;

use digest_core::DigestError;

/// How hits within a term group turn into points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `weight` per distinct term present, capped at `cap`
    PerHit,
    /// flat `weight` if any term is present
    AnyHit,
}

/// Which text a term group is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    Title,
    TitleAndSnippet,
}

/// A vocabulary with its point rule
#[derive(Debug, Clone, PartialEq)]
pub struct TermGroup {
    terms: Vec<String>,
    pub weight: i64,
    pub cap: i64,
    pub mode: MatchMode,
    pub scope: MatchScope,
}

impl TermGroup {
    pub fn new(terms: &[&str], weight: i64, cap: i64, mode: MatchMode, scope: MatchScope) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
            weight,
            cap,
            mode,
            scope,
        }
    }

    /// Lowercased vocabulary
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of distinct terms contained in `haystack` (already lowercased)
    pub fn hits(&self, haystack: &str) -> usize {
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .count()
    }

    /// Points for a given hit count
    pub fn points_for(&self, hits: usize) -> i64 {
        if hits == 0 {
            return 0;
        }
        match self.mode {
            MatchMode::PerHit => (hits as i64 * self.weight).min(self.cap),
            MatchMode::AnyHit => self.weight,
        }
    }
}

/// Articles younger than `max_age_hours` earn `points`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyBand {
    pub max_age_hours: f64,
    pub points: i64,
}

impl RecencyBand {
    pub const fn new(max_age_hours: f64, points: i64) -> Self {
        Self {
            max_age_hours,
            points,
        }
    }
}

/// Early rejection of titles that are not worth reading
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionRules {
    /// Substrings that reject a title outright
    pub markers: Vec<String>,
    /// Reject titles containing `!`
    pub reject_exclamation: bool,
    /// Titles shorter than this many characters are rejected
    pub min_title_chars: usize,
}

/// Points for category keywords found in the article
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceRule {
    pub weight: i64,
    pub cap: i64,
}

/// Title quality heuristics
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRules {
    /// Inclusive character band a title should fall within
    pub ideal_min_chars: usize,
    pub ideal_max_chars: usize,
    pub ideal_length_points: i64,
    pub clickbait: Vec<String>,
    /// Subtracted once if any clickbait phrase is present
    pub clickbait_penalty: i64,
    pub analytical: TermGroup,
    pub colon_bonus: i64,
    pub question_bonus: i64,
}

/// Complete set of scoring tables
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub exclusion: Option<ExclusionRules>,
    /// Checked in order; the first band the age falls under wins
    pub recency: Vec<RecencyBand>,
    pub essay: Option<TermGroup>,
    pub long_form: Option<TermGroup>,
    pub relevance: Option<RelevanceRule>,
    pub title: TitleRules,
    pub depth: Option<TermGroup>,
}

const CLICKBAIT: &[&str] = &[
    "shocking",
    "unbelievable",
    "you won't believe",
    "this one trick",
    "hate him",
    "breaking",
    "jaw-dropping",
    "mind-blowing",
];

const ESSAY_VOCABULARY: &[&str] = &[
    "essay",
    "reflection",
    "meditation",
    "exploration",
    "perspective",
    "understanding",
    "contemplat",
];

const LONG_FORM_PHRASES: &[&str] = &[
    "deep dive",
    "comprehensive",
    "understanding",
    "in-depth",
    "long read",
    "complete guide",
];

const ANALYTICAL_WORDS: &[&str] = &[
    "how", "why", "rethinking", "analysis", "exploring", "behind", "future of",
];

const DEPTH_VOCABULARY: &[&str] = &[
    "revolution",
    "transformation",
    "evolution",
    "crisis",
    "future of",
    "reimagining",
    "unprecedented",
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn standard_recency() -> Vec<RecencyBand> {
    vec![
        RecencyBand::new(24.0, 30),
        RecencyBand::new(72.0, 25),
        RecencyBand::new(168.0, 20),
        RecencyBand::new(336.0, 15),
        RecencyBand::new(720.0, 10),
    ]
}

fn standard_title() -> TitleRules {
    TitleRules {
        ideal_min_chars: 40,
        ideal_max_chars: 150,
        ideal_length_points: 10,
        clickbait: strings(CLICKBAIT),
        clickbait_penalty: 15,
        analytical: TermGroup::new(ANALYTICAL_WORDS, 5, 15, MatchMode::PerHit, MatchScope::Title),
        colon_bonus: 5,
        question_bonus: 5,
    }
}

impl ScoringPolicy {
    /// Policy for category digests: recency, indicators and keyword relevance
    pub fn category_aware() -> Self {
        Self {
            exclusion: None,
            recency: standard_recency(),
            essay: Some(TermGroup::new(
                ESSAY_VOCABULARY,
                5,
                15,
                MatchMode::PerHit,
                MatchScope::TitleAndSnippet,
            )),
            long_form: Some(TermGroup::new(
                LONG_FORM_PHRASES,
                5,
                10,
                MatchMode::PerHit,
                MatchScope::TitleAndSnippet,
            )),
            relevance: Some(RelevanceRule { weight: 5, cap: 20 }),
            title: standard_title(),
            depth: Some(TermGroup::new(
                DEPTH_VOCABULARY,
                10,
                10,
                MatchMode::AnyHit,
                MatchScope::TitleAndSnippet,
            )),
        }
    }

    /// Policy for the flat essay digest: rejects listicles and news flashes
    pub fn essay_focused() -> Self {
        Self {
            exclusion: Some(ExclusionRules {
                markers: strings(&[
                    "gift guide",
                    "gift ideas",
                    "roundup",
                    "round-up",
                    "top 10",
                    "best of",
                    "sponsored",
                    "newsletter",
                    "podcast",
                    "video",
                ]),
                reject_exclamation: true,
                min_title_chars: 25,
            }),
            recency: standard_recency(),
            essay: Some(TermGroup::new(
                ESSAY_VOCABULARY,
                8,
                24,
                MatchMode::PerHit,
                MatchScope::TitleAndSnippet,
            )),
            long_form: Some(TermGroup::new(
                LONG_FORM_PHRASES,
                5,
                10,
                MatchMode::PerHit,
                MatchScope::TitleAndSnippet,
            )),
            relevance: None,
            title: standard_title(),
            depth: Some(TermGroup::new(
                DEPTH_VOCABULARY,
                10,
                10,
                MatchMode::AnyHit,
                MatchScope::TitleAndSnippet,
            )),
        }
    }

    /// Title-only point table with wide recency bands
    pub fn classic() -> Self {
        Self {
            exclusion: None,
            recency: vec![
                RecencyBand::new(24.0, 40),
                RecencyBand::new(48.0, 30),
                RecencyBand::new(72.0, 20),
                RecencyBand::new(168.0, 10),
            ],
            essay: None,
            long_form: Some(TermGroup::new(
                &["deep dive", "comprehensive", "complete guide", "everything you need"],
                5,
                5,
                MatchMode::AnyHit,
                MatchScope::Title,
            )),
            relevance: None,
            title: TitleRules {
                ideal_min_chars: 50,
                ideal_max_chars: 120,
                ideal_length_points: 10,
                clickbait: strings(&[
                    "shocking",
                    "unbelievable",
                    "you won't believe",
                    "this one trick",
                    "hate him",
                ]),
                clickbait_penalty: 15,
                analytical: TermGroup::new(
                    &[
                        "how",
                        "why",
                        "understanding",
                        "perspective",
                        "analysis",
                        "exploring",
                        "behind",
                        "future of",
                    ],
                    5,
                    15,
                    MatchMode::PerHit,
                    MatchScope::Title,
                ),
                colon_bonus: 0,
                question_bonus: 5,
            },
            depth: Some(TermGroup::new(
                &[
                    "revolution",
                    "transformation",
                    "evolution",
                    "rethinking",
                    "reimagining",
                    "unprecedented",
                ],
                10,
                10,
                MatchMode::AnyHit,
                MatchScope::Title,
            )),
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::category_aware()
    }
}

/// Named scoring presets, selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringPreset {
    #[default]
    CategoryAware,
    EssayFocused,
    Classic,
}

impl ScoringPreset {
    pub fn policy(self) -> ScoringPolicy {
        match self {
            ScoringPreset::CategoryAware => ScoringPolicy::category_aware(),
            ScoringPreset::EssayFocused => ScoringPolicy::essay_focused(),
            ScoringPreset::Classic => ScoringPolicy::classic(),
        }
    }
}

impl fmt::Display for ScoringPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPreset::CategoryAware => write!(f, "category_aware"),
            ScoringPreset::EssayFocused => write!(f, "essay_focused"),
            ScoringPreset::Classic => write!(f, "classic"),
        }
    }
}

impl FromStr for ScoringPreset {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "category_aware" => Ok(ScoringPreset::CategoryAware),
            "essay_focused" => Ok(ScoringPreset::EssayFocused),
            "classic" => Ok(ScoringPreset::Classic),
            other => Err(DigestError::config(format!(
                "unknown scoring preset '{}' (expected 'category_aware', 'essay_focused' or 'classic')",
                other
            ))),
        }
    }
}
