//! Heuristic article quality scorer
//!
//! Additive point model over recency, essay/long-form indicators, category
//! relevance, title quality and depth. Matching is lowercase substring
//! containment, so overlapping vocabularies count in each group they hit.

use chrono::{DateTime, Utc};

use digest_core::{RawArticle, ScoredArticle, EXCLUDED_SCORE};

use crate::scoring_policy::{MatchScope, ScoringPolicy, TermGroup};

/// Per-category inputs to scoring
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringContext<'a> {
    pub keywords: &'a [String],
}

impl<'a> ScoringContext<'a> {
    pub fn new(keywords: &'a [String]) -> Self {
        Self { keywords }
    }

    /// Context without category keywords
    pub fn none() -> Self {
        Self { keywords: &[] }
    }
}

/// Points earned by each component of a non-excluded article
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub recency: i64,
    pub indicators: i64,
    pub relevance: i64,
    pub title: i64,
    pub depth: i64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i64 {
        self.recency + self.indicators + self.relevance + self.title + self.depth
    }
}

/// Lowercased views of an article used for matching
struct ArticleText {
    title: String,
    full: String,
}

impl ArticleText {
    fn new(article: &RawArticle) -> Self {
        let title = article.title.to_lowercase();
        let full = if article.snippet.is_empty() {
            title.clone()
        } else {
            format!("{} {}", title, article.snippet.to_lowercase())
        };
        Self { title, full }
    }

    fn scoped(&self, scope: MatchScope) -> &str {
        match scope {
            MatchScope::Title => &self.title,
            MatchScope::TitleAndSnippet => &self.full,
        }
    }

    fn group_points(&self, group: &TermGroup) -> i64 {
        group.points_for(group.hits(self.scoped(group.scope)))
    }
}

/// Scores raw articles under a `ScoringPolicy`
#[derive(Debug, Clone, Default)]
pub struct ArticleScorer {
    policy: ScoringPolicy,
}

impl ArticleScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Total score, or `EXCLUDED_SCORE` when the exclusion rules reject the title
    pub fn score(&self, article: &RawArticle, ctx: &ScoringContext<'_>, now: DateTime<Utc>) -> i64 {
        self.breakdown(article, ctx, now)
            .map(|b| b.total())
            .unwrap_or(EXCLUDED_SCORE)
    }

    /// Score a whole pool, preserving its order
    pub fn score_all(
        &self,
        articles: Vec<RawArticle>,
        ctx: &ScoringContext<'_>,
        now: DateTime<Utc>,
    ) -> Vec<ScoredArticle> {
        articles
            .into_iter()
            .map(|article| {
                let score = self.score(&article, ctx, now);
                ScoredArticle::new(article, score)
            })
            .collect()
    }

    /// Component points, `None` if the article is excluded
    pub fn breakdown(
        &self,
        article: &RawArticle,
        ctx: &ScoringContext<'_>,
        now: DateTime<Utc>,
    ) -> Option<ScoreBreakdown> {
        let text = ArticleText::new(article);

        if self.is_excluded(article, &text) {
            return None;
        }

        Some(ScoreBreakdown {
            recency: self.recency_points(article, now),
            indicators: self.indicator_points(&text),
            relevance: self.relevance_points(&text, ctx),
            title: self.title_points(article, &text),
            depth: self
                .policy
                .depth
                .as_ref()
                .map_or(0, |group| text.group_points(group)),
        })
    }

    fn is_excluded(&self, article: &RawArticle, text: &ArticleText) -> bool {
        let Some(rules) = &self.policy.exclusion else {
            return false;
        };

        rules.markers.iter().any(|m| text.title.contains(m.as_str()))
            || (rules.reject_exclamation && article.title.contains('!'))
            || article.title.chars().count() < rules.min_title_chars
    }

    fn recency_points(&self, article: &RawArticle, now: DateTime<Utc>) -> i64 {
        let Some(age) = article.age_hours(now) else {
            return 0;
        };

        self.policy
            .recency
            .iter()
            .find(|band| age < band.max_age_hours)
            .map_or(0, |band| band.points)
    }

    fn indicator_points(&self, text: &ArticleText) -> i64 {
        [&self.policy.essay, &self.policy.long_form]
            .into_iter()
            .flatten()
            .map(|group| text.group_points(group))
            .sum()
    }

    fn relevance_points(&self, text: &ArticleText, ctx: &ScoringContext<'_>) -> i64 {
        let Some(rule) = self.policy.relevance else {
            return 0;
        };

        let hits = ctx
            .keywords
            .iter()
            .filter(|k| !k.is_empty() && text.full.contains(k.to_lowercase().as_str()))
            .count() as i64;

        (hits * rule.weight).min(rule.cap)
    }

    fn title_points(&self, article: &RawArticle, text: &ArticleText) -> i64 {
        let rules = &self.policy.title;
        let mut points = 0;

        let len = article.title.chars().count();
        if len >= rules.ideal_min_chars && len <= rules.ideal_max_chars {
            points += rules.ideal_length_points;
        }

        if rules.clickbait.iter().any(|c| text.title.contains(c.as_str())) {
            points -= rules.clickbait_penalty;
        }

        points += text.group_points(&rules.analytical);

        if article.title.contains(':') {
            points += rules.colon_bonus;
        }
        if article.title.contains('?') {
            points += rules.question_bonus;
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn article(title: &str, age_hours: Option<i64>, snippet: &str) -> RawArticle {
        RawArticle::new(
            title,
            format!("https://example.com/{}", title.len()),
            age_hours.map(|h| now() - Duration::hours(h)),
            "https://example.com/feed",
            snippet,
        )
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_score_deterministic() {
        let scorer = ArticleScorer::default();
        let kw = keywords(&["technology"]);
        let ctx = ScoringContext::new(&kw);
        let a = article("How Technology Is Reshaping Democracy: A Reflection", Some(10), "");

        assert_eq!(scorer.score(&a, &ctx, now()), scorer.score(&a, &ctx, now()));
    }

    #[test]
    fn test_reflection_example_passes_and_gift_ideas_excluded() {
        let scorer = ArticleScorer::new(ScoringPolicy::essay_focused());
        let ctx = ScoringContext::none();

        let essay = article("How Technology Is Reshaping Democracy: A Reflection", Some(10), "");
        let gifts = article("5 Gift Ideas for Book Lovers This Holiday Season", Some(10), "");

        assert!(scorer.score(&essay, &ctx, now()) > 0);
        assert_eq!(scorer.score(&gifts, &ctx, now()), EXCLUDED_SCORE);
    }

    #[test]
    fn test_exclusion_dominates() {
        let scorer = ArticleScorer::new(ScoringPolicy::essay_focused());
        let ctx = ScoringContext::none();
        // Packed with positive signals but carries a marker
        let a = article(
            "Podcast: why the future of understanding is a comprehensive essay revolution?",
            Some(1),
            "deep dive reflection meditation exploration perspective",
        );
        assert_eq!(scorer.score(&a, &ctx, now()), EXCLUDED_SCORE);
        assert!(scorer.breakdown(&a, &ctx, now()).is_none());
    }

    #[test]
    fn test_exclusion_exclamation_and_short_title() {
        let scorer = ArticleScorer::new(ScoringPolicy::essay_focused());
        let ctx = ScoringContext::none();

        let shouty = article("The long history of the garden city movement!", Some(1), "");
        let short = article("Markets slide", Some(1), "");
        assert_eq!(scorer.score(&shouty, &ctx, now()), EXCLUDED_SCORE);
        assert_eq!(scorer.score(&short, &ctx, now()), EXCLUDED_SCORE);
    }

    #[test]
    fn test_exclusion_case_insensitive() {
        let scorer = ArticleScorer::new(ScoringPolicy::essay_focused());
        let a = article("The Weekly NEWSLETTER on the state of modern poetry", Some(1), "");
        assert_eq!(scorer.score(&a, &ScoringContext::none(), now()), EXCLUDED_SCORE);
    }

    #[test]
    fn test_recency_bands() {
        let scorer = ArticleScorer::default();
        let ctx = ScoringContext::none();
        let cases = [
            (Some(1), 30),
            (Some(30), 25),
            (Some(100), 20),
            (Some(200), 15),
            (Some(500), 10),
            (Some(1000), 0),
            (None, 0),
        ];
        for (age, expected) in cases {
            let a = article("zz", age, "");
            let breakdown = scorer.breakdown(&a, &ctx, now()).unwrap();
            assert_eq!(breakdown.recency, expected, "age {:?}", age);
        }
    }

    #[test]
    fn test_classic_recency_bands() {
        let scorer = ArticleScorer::new(ScoringPolicy::classic());
        let ctx = ScoringContext::none();
        let cases = [(10, 40), (30, 30), (60, 20), (100, 10), (200, 0)];
        for (age, expected) in cases {
            let a = article("zz", Some(age), "");
            assert_eq!(scorer.breakdown(&a, &ctx, now()).unwrap().recency, expected);
        }
    }

    #[test]
    fn test_future_date_counts_as_fresh() {
        let scorer = ArticleScorer::default();
        let a = article("zz", Some(-5), "");
        let breakdown = scorer.breakdown(&a, &ScoringContext::none(), now()).unwrap();
        assert_eq!(breakdown.recency, 30);
    }

    #[test]
    fn test_indicators_use_snippet_and_double_count() {
        let scorer = ArticleScorer::default();
        let ctx = ScoringContext::none();

        // "understanding" sits in both the essay and long-form vocabularies
        let a = article("zz", None, "Toward an understanding of tides");
        let breakdown = scorer.breakdown(&a, &ctx, now()).unwrap();
        assert_eq!(breakdown.indicators, 10);

        let plain = article("zz", None, "");
        assert_eq!(scorer.breakdown(&plain, &ctx, now()).unwrap().indicators, 0);
    }

    #[test]
    fn test_indicator_caps() {
        let scorer = ArticleScorer::default();
        let a = article(
            "zz",
            None,
            "essay reflection meditation exploration perspective deep dive comprehensive in-depth",
        );
        let breakdown = scorer.breakdown(&a, &ScoringContext::none(), now()).unwrap();
        // essay capped at 15, long-form capped at 10
        assert_eq!(breakdown.indicators, 25);
    }

    #[test]
    fn test_relevance_uses_keywords_and_caps() {
        let scorer = ArticleScorer::default();
        let kw = keywords(&["museum", "gallery", "painting", "artist", "sculpture"]);
        let ctx = ScoringContext::new(&kw);

        let one = article("zz", None, "A new museum opens");
        assert_eq!(scorer.breakdown(&one, &ctx, now()).unwrap().relevance, 5);

        let many = article(
            "zz",
            None,
            "museum gallery painting artist sculpture",
        );
        assert_eq!(scorer.breakdown(&many, &ctx, now()).unwrap().relevance, 20);

        let no_ctx = scorer.breakdown(&many, &ScoringContext::none(), now()).unwrap();
        assert_eq!(no_ctx.relevance, 0);
    }

    #[test]
    fn test_relevance_disabled_by_policy() {
        let scorer = ArticleScorer::new(ScoringPolicy::classic());
        let kw = keywords(&["museum"]);
        let a = article("zz", None, "museum");
        let breakdown = scorer.breakdown(&a, &ScoringContext::new(&kw), now()).unwrap();
        assert_eq!(breakdown.relevance, 0);
    }

    #[test]
    fn test_title_points() {
        let scorer = ArticleScorer::default();
        let ctx = ScoringContext::none();

        // 40..=150 chars, colon, question mark, "why"
        let good = article("Why do we keep building cities for cars: a look at the data?", None, "");
        let breakdown = scorer.breakdown(&good, &ctx, now()).unwrap();
        assert_eq!(breakdown.title, 10 + 5 + 5 + 5);

        let clickbait = article("Shocking", None, "");
        assert_eq!(scorer.breakdown(&clickbait, &ctx, now()).unwrap().title, -15);
    }

    #[test]
    fn test_analytical_words_capped() {
        let scorer = ArticleScorer::default();
        let a = article("how why rethinking analysis exploring", None, "");
        assert_eq!(
            scorer.breakdown(&a, &ScoringContext::none(), now()).unwrap().title,
            15
        );
    }

    #[test]
    fn test_depth_flat_bonus() {
        let scorer = ArticleScorer::default();
        let ctx = ScoringContext::none();
        let one = article("zz", None, "a quiet revolution");
        let two = article("zz", None, "revolution and crisis");
        assert_eq!(scorer.breakdown(&one, &ctx, now()).unwrap().depth, 10);
        assert_eq!(scorer.breakdown(&two, &ctx, now()).unwrap().depth, 10);
    }

    #[test]
    fn test_classic_total() {
        let scorer = ArticleScorer::new(ScoringPolicy::classic());
        // 58 chars, 5h old, "how" + "future of", "?", depth "revolution"
        let a = article(
            "How the revolution will shape the future of work, and you?",
            Some(5),
            "",
        );
        assert_eq!(a.title.chars().count(), 58);
        // recency 40 + length 10 + analytical 10 + question 5 + depth 10
        assert_eq!(scorer.score(&a, &ScoringContext::none(), now()), 75);
    }

    #[test]
    fn test_no_total_clamp() {
        let scorer = ArticleScorer::default();
        let kw = keywords(&["city", "street", "transit", "housing"]);
        let a = article(
            "Why rethinking how we build: the future of the city street?",
            Some(1),
            "An essay and reflection: a comprehensive deep dive into transit and housing crisis",
        );
        let breakdown = scorer.breakdown(&a, &ScoringContext::new(&kw), now()).unwrap();
        assert_eq!(breakdown.total(), scorer.score(&a, &ScoringContext::new(&kw), now()));
        assert!(breakdown.total() > 100);
    }

    #[test]
    fn test_score_all_preserves_order() {
        let scorer = ArticleScorer::default();
        let pool = vec![article("first", Some(1), ""), article("second one", Some(900), "")];
        let scored = scorer.score_all(pool, &ScoringContext::none(), now());
        assert_eq!(scored[0].article.title, "first");
        assert_eq!(scored[1].article.title, "second one");
        assert!(scored[0].score > scored[1].score);
    }
}
