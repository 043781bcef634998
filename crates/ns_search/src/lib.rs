pub mod providers;
pub mod speech;
pub mod translate;

pub use providers::{DummyProvider, NewsApiProvider};
pub use speech::{HttpSpeechRecognizer, HttpSpeechSynthesizer};
pub use translate::{EchoTranslator, HttpTranslator};

pub mod prelude {
    pub use crate::providers::{DummyProvider, NewsApiProvider};
    pub use crate::translate::HttpTranslator;
    pub use ns_core::{Article, Error, Result, SearchProvider};
}
