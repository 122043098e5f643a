//! Prose insights about a duration from an external text-generation service.
//!
//! The service is optional. Every failure (no key, network error, empty
//! answer) is turned into a fixed placeholder by [`insight_or_fallback`], so
//! the rest of the report is never held back by it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::InsightConfig;

pub const MISSING_KEY_MESSAGE: &str = "Please provide an API Key to unlock AI insights.";
pub const EMPTY_MESSAGE: &str = "No insight generated.";
pub const UNAVAILABLE_MESSAGE: &str = "Could not generate insight at this moment.";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("insight service unavailable: {0}")]
    Unavailable(String),

    #[error("insight response unparseable: {0}")]
    ResponseParse(String),

    #[error("insight service returned no text")]
    Empty,
}

/// Something that can describe a duration in prose.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Produce prose about a duration such as `"7 days, 3 hours"`.
    async fn insight(&self, duration_text: &str) -> Result<String, InsightError>;
}

/// Ask `provider` for an insight, substituting a placeholder on any failure.
pub async fn insight_or_fallback(provider: &dyn InsightProvider, duration_text: &str) -> String {
    match provider.insight(duration_text).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(InsightError::Empty) => EMPTY_MESSAGE.to_string(),
        Err(InsightError::MissingApiKey) => {
            debug!(provider = provider.name(), "no API key, skipping insight");
            MISSING_KEY_MESSAGE.to_string()
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "insight request failed");
            UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

/// The instruction sent along with the duration.
pub fn build_prompt(duration_text: &str) -> String {
    format!(
        "I have a duration of time: \"{duration_text}\". \
         Give me 3 fascinating, unique, or historical facts about what can be achieved, \
         what naturally occurs, or what has happened in history during a timespan of exactly \
         this length. Keep it brief, engaging, and format it as a markdown list."
    )
}

/// Google Gemini `generateContent` client.
pub struct GeminiInsight {
    client: reqwest::Client,
    config: InsightConfig,
}

impl GeminiInsight {
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InsightError::Unavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl InsightProvider for GeminiInsight {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn insight(&self, duration_text: &str) -> Result<String, InsightError> {
        let api_key = self.config.api_key().ok_or(InsightError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(duration_text),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let url = self.endpoint();
        debug!("Sending insight request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InsightError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Unavailable(format!(
                "service returned {}: {}",
                status, body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InsightError::ResponseParse(e.to_string()))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(InsightError::Empty);
        }
        Ok(text)
    }
}

/// Provider that always answers with the same text.
#[cfg(test)]
pub struct StaticInsight {
    text: String,
}

#[cfg(test)]
impl StaticInsight {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
#[async_trait]
impl InsightProvider for StaticInsight {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn insight(&self, _duration_text: &str) -> Result<String, InsightError> {
        Ok(self.text.clone())
    }
}
