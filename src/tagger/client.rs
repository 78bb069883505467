use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{TagError, Tagger};
use crate::models::Token;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "es_core_news_sm";

/// Configuration for the HTTP tagging service
#[derive(Debug, Clone)]
pub struct TaggerConfig {
    /// Endpoint accepting `{"text", "model"}` and returning tagged tokens
    pub endpoint: String,
    /// Name of the morphological model to run
    pub model: String,
}

impl TaggerConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("PERSONA_TAGGER_URL")
            .context("PERSONA_TAGGER_URL environment variable not set")?;
        let model =
            std::env::var("PERSONA_TAGGER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self { endpoint, model })
    }

    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// Tagger backed by a morphological model served over HTTP
pub struct HttpTagger {
    client: Client,
    config: TaggerConfig,
}

impl HttpTagger {
    pub fn new(config: TaggerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

impl Tagger for HttpTagger {
    async fn tag(&self, text: &str) -> Result<Vec<Token>, TagError> {
        let request = TagRequest {
            text,
            model: &self.config.model,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TagError::Status { status, body });
        }

        let response: TagResponse = response.json().await?;
        debug!("Tagger returned {} tokens", response.tokens.len());

        Ok(response.into_tokens())
    }
}

#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagResponse {
    tokens: Vec<TaggedWord>,
}

/// One token of the tagging service's response
#[derive(Debug, Deserialize)]
struct TaggedWord {
    text: String,
    tag: String,
    #[serde(default)]
    morph: String,
}

impl TagResponse {
    fn into_tokens(self) -> Vec<Token> {
        self.tokens
            .iter()
            .map(|w| Token::from_triple(&w.text, &w.tag, &w.morph))
            .collect()
    }
}
