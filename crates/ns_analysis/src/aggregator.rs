use std::collections::BTreeMap;
use std::sync::Arc;

use ns_core::{
    Article, LabeledArticle, ResultSet, SearchProvider, SentimentCounts, SentimentLabel,
    SentimentScorer, TableRow,
};
use tracing::warn;

/// Result of one fetch-and-label pass. The notice is always user-visible
/// text: the found-article count on success, the failure description
/// (including any upstream status code) on a degraded fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub results: ResultSet,
    pub notice: String,
}

/// Turns a raw keyword into a labeled, aggregated result set by driving the
/// search and sentiment collaborators. The single aggregation contract:
/// labeling lives here and nowhere else.
pub struct ResultAggregator {
    provider: Arc<dyn SearchProvider>,
    scorer: Arc<dyn SentimentScorer>,
}

impl ResultAggregator {
    pub fn new(provider: Arc<dyn SearchProvider>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { provider, scorer }
    }

    /// Fetch articles for the keyword and label each one. An upstream
    /// failure degrades to an empty result set plus a notice; it is never
    /// fatal. A scorer failure on one article labels that article Neutral
    /// and continues with the rest.
    pub async fn fetch_and_label(&self, query: &str) -> FetchOutcome {
        let articles = match self.provider.search(query).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("search for {:?} via {} failed: {}", query, self.provider.name(), e);
                return FetchOutcome {
                    results: ResultSet::empty(query),
                    notice: format!("Search failed: {}", e),
                };
            }
        };

        let labeled: Vec<LabeledArticle> = articles
            .into_iter()
            .map(|article| {
                let label = self.label_article(&article);
                LabeledArticle { article, label }
            })
            .collect();

        let notice = format!("Found {} articles", labeled.len());
        FetchOutcome {
            results: ResultSet::new(query, labeled),
            notice,
        }
    }

    fn label_article(&self, article: &Article) -> SentimentLabel {
        match self.scorer.polarity(article.content_text()) {
            Ok(scores) => SentimentLabel::from_compound(scores.compound),
            Err(e) => {
                warn!(
                    "sentiment scoring failed for {:?}, labeling Neutral: {}",
                    article.display_title(),
                    e
                );
                SentimentLabel::Neutral
            }
        }
    }

    /// Exact partition of the result set by label;
    /// positive + negative + neutral always equals the set length.
    pub fn aggregate_counts(&self, results: &ResultSet) -> SentimentCounts {
        let mut counts = SentimentCounts::default();
        for labeled in &results.articles {
            match labeled.label {
                SentimentLabel::Positive => counts.positive += 1,
                SentimentLabel::Negative => counts.negative += 1,
                SentimentLabel::Neutral => counts.neutral += 1,
            }
        }
        counts
    }

    /// Article counts per source name; a missing source counts under
    /// "Unknown". Counts sum to the set length.
    pub fn group_by_source(&self, results: &ResultSet) -> BTreeMap<String, usize> {
        let mut groups = BTreeMap::new();
        for labeled in &results.articles {
            *groups
                .entry(labeled.article.source_name().to_string())
                .or_insert(0) += 1;
        }
        groups
    }

    /// Flat analytics table in article order, with display defaults
    /// substituted for absent fields.
    pub fn to_table(&self, results: &ResultSet) -> Vec<TableRow> {
        results
            .articles
            .iter()
            .map(|labeled| TableRow {
                title: labeled.article.display_title().to_string(),
                author: labeled.article.display_author().to_string(),
                link: labeled.article.link().to_string(),
                sentiment: labeled.label,
                summary: None,
            })
            .collect()
    }
}
