use async_trait::async_trait;

use crate::types::{Article, PolarityScores};
use crate::Result;

/// External news search. Implementations query a remote endpoint with the
/// raw keyword; a non-success upstream response is an `Error::Search`
/// carrying the status code.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Fetch articles matching the keyword
    async fn search(&self, keyword: &str) -> Result<Vec<Article>>;
}

/// Lexicon-based sentiment scorer. Pure computation, so the trait is
/// synchronous.
pub trait SentimentScorer: Send + Sync {
    /// Polarity scores for a text; an empty text scores a zero compound
    fn polarity(&self, text: &str) -> Result<PolarityScores>;
}

/// Text translation collaborator. Invoked synchronously per request, never
/// retried automatically.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Text-to-speech collaborator.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Speech-to-text collaborator, feeding voice search.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, audio: &[u8]) -> Result<String>;
}
