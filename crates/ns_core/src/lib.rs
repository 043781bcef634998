pub mod collaborators;
pub mod error;
pub mod types;

pub use collaborators::{
    SearchProvider, SentimentScorer, SpeechRecognizer, SpeechSynthesizer, Translator,
};
pub use error::Error;
pub use types::{
    Article, LabeledArticle, PolarityScores, ResultSet, SentimentCounts, SentimentLabel, TableRow,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::collaborators::{SearchProvider, SentimentScorer};
    pub use crate::types::{Article, LabeledArticle, ResultSet, SentimentCounts, SentimentLabel};
    pub use crate::{Error, Result};
}
