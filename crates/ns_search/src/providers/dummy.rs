use async_trait::async_trait;
use ns_core::{Article, Result, SearchProvider};

/// In-process provider serving canned articles, for offline runs and tests.
#[derive(Debug, Default, Clone)]
pub struct DummyProvider {
    articles: Vec<Article>,
}

impl DummyProvider {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// A small fixed corpus mentioning the keyword in each title.
    pub fn sample() -> Self {
        let mk = |title: &str, content: &str, source: &str| Article {
            title: Some(title.to_string()),
            author: Some("Staff Writer".to_string()),
            url: Some(format!(
                "http://news.example/{}",
                title.to_lowercase().replace(' ', "-")
            )),
            content: Some(content.to_string()),
            source: Some(source.to_string()),
            published_at: None,
        };

        Self::new(vec![
            mk(
                "Breakthrough hailed as a success",
                "Researchers celebrate a breakthrough success with strong gains in the field.",
                "Example Times",
            ),
            mk(
                "Markets fall amid fear of crisis",
                "Stocks crash in the worst decline of the year amid growing fear of crisis.",
                "Example Wire",
            ),
            mk(
                "Committee schedules hearing",
                "The committee met to schedule the next round of hearings.",
                "Example Times",
            ),
        ])
    }
}

#[async_trait]
impl SearchProvider for DummyProvider {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn search(&self, _keyword: &str) -> Result<Vec<Article>> {
        Ok(self.articles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_returns_articles() {
        let provider = DummyProvider::sample();
        let articles = provider.search("anything").await.unwrap();
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| a.content.is_some()));
    }
}
