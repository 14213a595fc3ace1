//! Static catalog of digest categories and essay feeds

use digest_core::CategoryConfig;

/// Curated categories, in display order
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new(
            "artsculture",
            "Arts & Culture",
            "linear-gradient(135deg, #b71c1c 0%, #ff6b6b 100%)",
            &[
                "https://www.theguardian.com/artanddesign/rss",
                "https://hyperallergic.com/feed/",
            ],
            &[
                "art", "artist", "museum", "gallery", "exhibition", "culture", "painting",
                "film", "music", "design",
            ],
        ),
        CategoryConfig::new(
            "literature",
            "Literature",
            "linear-gradient(135deg, #e65100 0%, #ffb74d 100%)",
            &[
                "https://lithub.com/feed/",
                "https://www.theguardian.com/books/rss",
            ],
            &[
                "book", "novel", "poet", "poetry", "fiction", "writer", "author", "literary",
                "reading",
            ],
        ),
        CategoryConfig::new(
            "philosophy",
            "Philosophy",
            "linear-gradient(135deg, #f57f17 0%, #fff176 100%)",
            &["https://aeon.co/feed.rss", "https://dailynous.com/feed/"],
            &[
                "philosoph", "ethic", "moral", "mind", "conscious", "meaning", "truth",
                "knowledge", "reason",
            ],
        ),
        CategoryConfig::new(
            "politics",
            "Politics",
            "linear-gradient(135deg, #1b5e20 0%, #81c784 100%)",
            &[
                "https://www.theguardian.com/politics/rss",
                "https://foreignpolicy.com/feed/",
            ],
            &[
                "politic", "election", "government", "democracy", "policy", "parliament",
                "congress", "vote", "diplomac",
            ],
        ),
        CategoryConfig::new(
            "science",
            "Science",
            "linear-gradient(135deg, #01579b 0%, #4fc3f7 100%)",
            &[
                "https://www.sciencedaily.com/rss/all.xml",
                "https://www.theguardian.com/science/rss",
            ],
            &[
                "science", "research", "study", "scientist", "physics", "biology", "climate",
                "space", "discover",
            ],
        ),
        CategoryConfig::new(
            "society",
            "Society",
            "linear-gradient(135deg, #4a148c 0%, #9c27b0 100%)",
            &[
                "https://www.theguardian.com/society/rss",
                "https://www.theatlantic.com/feed/channel/health/",
            ],
            &[
                "society", "community", "health", "inequality", "family", "education",
                "housing", "social",
            ],
        ),
        CategoryConfig::new(
            "sports",
            "Sports",
            "linear-gradient(135deg, #880e4f 0%, #f06292 100%)",
            &[
                "https://www.theguardian.com/sport/rss",
                "https://www.theatlantic.com/feed/channel/health/",
            ],
            &[
                "sport", "football", "athlete", "olympic", "league", "tennis", "cricket",
                "game", "coach",
            ],
        ),
        CategoryConfig::new(
            "technology",
            "Technology",
            "linear-gradient(135deg, #1a237e 0%, #5c6bc0 100%)",
            &["https://techcrunch.com/feed/", "https://www.theverge.com/rss/index.xml"],
            &[
                "technology", "tech", "artificial intelligence", "software", "internet",
                "digital", "computer", "algorithm", "data",
            ],
        ),
        CategoryConfig::new(
            "theology",
            "Theology",
            "linear-gradient(135deg, #880e4f 0%, #ec407a 100%)",
            &[
                "https://www.christianitytoday.com/ct.rss",
                "https://religionnews.com/feed/",
            ],
            &[
                "faith", "church", "religio", "god", "theolog", "spiritual", "christian",
                "belief", "prayer",
            ],
        ),
    ]
}

/// Long-form and essay feeds pooled into the flat essay digest
pub fn essay_feeds() -> Vec<String> {
    [
        "https://aeon.co/feed.rss",
        "https://psyche.co/feed",
        "https://lithub.com/feed/",
        "https://www.theatlantic.com/feed/channel/ideas/",
        "https://www.noemamag.com/feed/",
        "https://thepointmag.com/feed/",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
