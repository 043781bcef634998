use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ns_core::{Article, Error, Result, SearchProvider};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://newsapi.org";

// The upstream call is the only network hop in the pipeline; keep it bounded
// so a stalled endpoint degrades into the empty-result path.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    source: Option<NewsApiSource>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<NewsApiArticle> for Article {
    fn from(raw: NewsApiArticle) -> Self {
        Article {
            title: raw.title,
            author: raw.author,
            url: raw.url,
            content: raw.content,
            source: raw.source.and_then(|s| s.name),
            // an unparsable timestamp maps to None, never an error
            published_at: raw
                .published_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// NewsAPI-shaped search client: GET `{base}/v2/everything` with the raw
/// keyword as `q` and the credential as `apiKey`.
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsApiProvider {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("ns/0.1.0")
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

impl fmt::Debug for NewsApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SearchProvider for NewsApiProvider {
    fn name(&self) -> &str {
        "newsapi"
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Article>> {
        let url = format!(
            "{}/v2/everything?q={}&apiKey={}",
            self.base_url,
            urlencoding::encode(keyword),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Search(format!(
                "news search returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: NewsApiResponse = response.json().await?;
        debug!("news search for {:?} returned {} articles", keyword, body.articles.len());
        Ok(body.articles.into_iter().map(Article::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_missing_fields_deserializes() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "title": "Summit ends",
                    "author": "Ann Author",
                    "url": "http://example.com/a",
                    "content": "Nations agreed.",
                    "source": {"name": "Example Times"},
                    "publishedAt": "2024-03-01T12:00:00Z"
                },
                {}
            ]
        }"#;

        let body: NewsApiResponse = serde_json::from_str(json).unwrap();
        let articles: Vec<Article> = body.articles.into_iter().map(Article::from).collect();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].display_title(), "Summit ends");
        assert_eq!(articles[0].source_name(), "Example Times");
        assert!(articles[0].published_at.is_some());

        assert_eq!(articles[1].display_title(), "No title available");
        assert_eq!(articles[1].source_name(), "Unknown");
        assert!(articles[1].published_at.is_none());
    }

    #[test]
    fn test_unparsable_timestamp_maps_to_none() {
        let raw = NewsApiArticle {
            title: None,
            author: None,
            url: None,
            content: None,
            source: None,
            published_at: Some("yesterday-ish".to_string()),
        };
        assert!(Article::from(raw).published_at.is_none());
    }

    #[test]
    fn test_provider_redacts_key_in_debug() {
        let provider = NewsApiProvider::new("secret", None).unwrap();
        let printed = format!("{:?}", provider);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
