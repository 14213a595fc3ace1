//! Category configuration and the per-category digest payload

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::SelectedArticle;

/// A topical bucket with its own feeds and relevance vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Stable identifier used as the JSON key (e.g., "technology")
    pub key: String,
    /// Human-readable name (e.g., "Arts & Culture")
    pub display_name: String,
    /// Feed URLs, fetched and concatenated in this order
    pub feed_urls: Vec<String>,
    /// Terms used for category relevance scoring
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Presentation value passed through untouched
    pub gradient: String,
}

impl CategoryConfig {
    pub fn new(
        key: &str,
        display_name: &str,
        gradient: &str,
        feed_urls: &[&str],
        keywords: &[&str],
    ) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            gradient: gradient.to_string(),
            feed_urls: feed_urls.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Digest for one category, serialized as `{name, gradient, articles}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDigest {
    pub name: String,
    pub gradient: String,
    pub articles: Vec<SelectedArticle>,
}

impl CategoryDigest {
    pub fn new(category: &CategoryConfig, articles: Vec<SelectedArticle>) -> Self {
        Self {
            name: category.display_name.clone(),
            gradient: category.gradient.clone(),
            articles,
        }
    }
}

/// Category key → digest, kept in catalog order
pub type DailyDigest = IndexMap<String, CategoryDigest>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_digest_json_shape() {
        let category = CategoryConfig::new(
            "science",
            "Science",
            "linear-gradient(135deg, #01579b 0%, #4fc3f7 100%)",
            &["https://example.com/feed"],
            &["research"],
        );
        let digest = CategoryDigest::new(
            &category,
            vec![SelectedArticle {
                title: "A".to_string(),
                url: "https://example.com/a".to_string(),
                featured: Some(true),
            }],
        );

        let mut daily = DailyDigest::new();
        daily.insert(category.key.clone(), digest);

        let json = serde_json::to_value(&daily).unwrap();
        assert_eq!(json["science"]["name"], "Science");
        assert_eq!(json["science"]["articles"][0]["featured"], true);
        assert!(json["science"]["gradient"]
            .as_str()
            .unwrap()
            .starts_with("linear-gradient"));
    }

    #[test]
    fn test_daily_digest_keeps_insertion_order() {
        let mut daily = DailyDigest::new();
        for key in ["zeta", "alpha", "mid"] {
            daily.insert(
                key.to_string(),
                CategoryDigest {
                    name: key.to_string(),
                    gradient: String::new(),
                    articles: vec![],
                },
            );
        }

        let text = serde_json::to_string(&daily).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        let mid = text.find("\"mid\"").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }
}
