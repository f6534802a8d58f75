//! Remote verse text source.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while fetching verse text.
///
/// These never reach callers of the provider: the engine turns them into
/// placeholder text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {status} for '{key}'")]
    Status { key: String, status: u16 },

    #[error("response for '{key}' has no verse text")]
    MissingText { key: String },

    #[error("{0}")]
    Other(String),
}

/// Fetches canonical text for a canonical key.
///
/// Implementations own their timeout policy; the engine never cancels a
/// fetch.
#[async_trait]
pub trait RemoteTextSource: Send + Sync {
    /// Human-readable source name used in placeholder text.
    fn name(&self) -> &str;

    async fn fetch(&self, key: &str) -> Result<String, FetchError>;
}

/// Configuration for [`BibleApiSource`].
#[derive(Debug, Clone)]
pub struct BibleApiConfig {
    pub name: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BibleApiConfig {
    fn default() -> Self {
        Self {
            name: "bible-api".to_string(),
            base_url: "https://bible-api.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerseResponse {
    text: Option<String>,
}

/// Source backed by the bible-api.com JSON API.
pub struct BibleApiSource {
    config: BibleApiConfig,
    client: reqwest::Client,
}

impl BibleApiSource {
    pub fn new(config: BibleApiConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// URL for a canonical key.
    pub fn url_for(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(key)
        )
    }
}

#[async_trait]
impl RemoteTextSource for BibleApiSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn fetch(&self, key: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.url_for(key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                key: key.to_string(),
                status: status.as_u16(),
            });
        }

        let body: VerseResponse = response.json().await?;
        let text = body.text.ok_or_else(|| FetchError::MissingText {
            key: key.to_string(),
        })?;

        Ok(flatten_lines(&text))
    }
}

/// The API separates verses with newlines; readers want one run of text.
fn flatten_lines(text: &str) -> String {
    text.replace('\n', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_reference() {
        let source = BibleApiSource::new(BibleApiConfig {
            base_url: "https://bible-api.com/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(source.url_for("john 11:35"), "https://bible-api.com/john%2011%3A35");
    }

    #[test]
    fn test_flatten_lines() {
        assert_eq!(flatten_lines("Jesus wept.\n"), "Jesus wept.");
        assert_eq!(flatten_lines("a\nb\n"), "ab");
    }

    #[test]
    fn test_response_without_text() {
        let body: VerseResponse = serde_json::from_str(r#"{"error": "not found"}"#).unwrap();
        assert!(body.text.is_none());
    }
}
