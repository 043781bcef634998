use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ns_core::{Error, Result, Translator};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// LibreTranslate-shaped translation client. Invoked per request; failures
/// surface as an `Error::Translation` and are never retried here.
pub struct HttpTranslator {
    client: Client,
    base_url: String,
}

impl HttpTranslator {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl fmt::Debug for HttpTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTranslator")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target_lang,
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Translation(format!(
                "translation service returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: TranslateResponse = response.json().await?;
        Ok(body.translated_text)
    }
}

/// Pass-through translator for offline runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoTranslator;

#[async_trait]
impl Translator for EchoTranslator {
    async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_translator_passes_through() {
        let translated = EchoTranslator.translate("hola", "en").await.unwrap();
        assert_eq!(translated, "hola");
    }

    #[test]
    fn test_translate_response_shape() {
        let body: TranslateResponse =
            serde_json::from_str(r#"{"translatedText": "hello"}"#).unwrap();
        assert_eq!(body.translated_text, "hello");
    }
}
