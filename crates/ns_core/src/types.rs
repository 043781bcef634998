use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display defaults for absent article fields.
pub const NO_TITLE: &str = "No title available";
pub const NO_AUTHOR: &str = "No author available";
pub const NO_LINK: &str = "#";
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One article as returned by the search collaborator. Every field may be
/// absent; display code substitutes the documented defaults instead of
/// failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or(NO_AUTHOR)
    }

    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or(NO_LINK)
    }

    pub fn content_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }
}

/// Sentiment polarity class, derived from a scorer's compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Positive iff compound > 0, Negative iff compound < 0, Neutral at
    /// exactly 0 (the scorer's baseline for no signal).
    pub fn from_compound(compound: f64) -> Self {
        if compound > 0.0 {
            SentimentLabel::Positive
        } else if compound < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Polarity scores for one text. Only `compound` drives labeling; the
/// component ratios are kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl PolarityScores {
    pub fn neutral_baseline() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledArticle {
    pub article: Article,
    pub label: SentimentLabel,
}

/// The labeled article collection produced by one search. Replaced wholesale
/// on each new search, never merged with a prior result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub query: String,
    pub articles: Vec<LabeledArticle>,
}

impl ResultSet {
    pub fn new(query: impl Into<String>, articles: Vec<LabeledArticle>) -> Self {
        Self {
            query: query.into(),
            articles,
        }
    }

    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Aggregate sentiment counts over one result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Share of a class in percent. Zero for an empty set, so percentage
    /// displays never divide by zero.
    pub fn percent(&self, label: SentimentLabel) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        };
        count as f64 * 100.0 / total as f64
    }
}

/// One row of the flat analytics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub title: String,
    pub author: String,
    pub link: String,
    pub sentiment: SentimentLabel,
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_compound() {
        assert_eq!(SentimentLabel::from_compound(0.5), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_compound(-0.2), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_compound(0.0), SentimentLabel::Neutral);
    }

    #[test]
    fn test_article_display_defaults() {
        let article = Article::default();
        assert_eq!(article.display_title(), NO_TITLE);
        assert_eq!(article.display_author(), NO_AUTHOR);
        assert_eq!(article.link(), NO_LINK);
        assert_eq!(article.content_text(), "");
        assert_eq!(article.source_name(), UNKNOWN_SOURCE);
    }

    #[test]
    fn test_counts_percent_empty_is_zero() {
        let counts = SentimentCounts::default();
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.percent(SentimentLabel::Positive), 0.0);
        assert_eq!(counts.percent(SentimentLabel::Neutral), 0.0);
    }

    #[test]
    fn test_counts_percent() {
        let counts = SentimentCounts {
            positive: 1,
            negative: 1,
            neutral: 2,
        };
        assert_eq!(counts.percent(SentimentLabel::Neutral), 50.0);
        assert_eq!(counts.percent(SentimentLabel::Positive), 25.0);
    }
}
