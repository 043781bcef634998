use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ns_core::{Error, Result, SpeechRecognizer, SpeechSynthesizer};
use reqwest::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct RecognitionResponse {
    text: String,
}

/// Text-to-speech client: POST the text, get audio bytes back.
pub struct HttpSpeechSynthesizer {
    client: Client,
    base_url: String,
}

impl HttpSpeechSynthesizer {
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

impl fmt::Debug for HttpSpeechSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSpeechSynthesizer")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(format!("{}/synthesize", self.base_url))
            .body(text.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Speech(format!(
                "speech synthesis returned HTTP {}",
                status.as_u16()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Speech-to-text client feeding voice search: POST audio bytes, get the
/// recognized text back.
pub struct HttpSpeechRecognizer {
    client: Client,
    base_url: String,
}

impl HttpSpeechRecognizer {
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

impl fmt::Debug for HttpSpeechRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSpeechRecognizer")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SpeechRecognizer for HttpSpeechRecognizer {
    async fn recognize(&self, audio: &[u8]) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/recognize", self.base_url))
            .body(audio.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Speech(format!(
                "speech recognition returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: RecognitionResponse = response.json().await?;
        Ok(body.text)
    }
}
