//! HTTP implementation of the store client
//!
//! Talks to the recall service's REST API with reqwest. Failures never
//! escape as raw transport errors from the dispatcher; callers map them
//! to protocol-level internal errors.

use super::StoreClient;
use crate::config::Settings;
use crate::error::{EngramError, Result};
use crate::types::{MemoryRecord, RecordMetadata};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request timeout for store calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the remote recall service
pub struct RecallClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    content: &'a str,
    subject: &'a str,
    metadata: &'a RecordMetadata,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    subject: &'a str,
    limit: usize,
}

/// Search and list responses wrap records in a `results` array
#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Vec<MemoryRecord>,
}

impl RecallClient {
    /// Create a new recall client from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        if settings.api_key.is_empty() {
            return Err(EngramError::Config(config::ConfigError::Message(
                "ENGRAM_API_KEY not set".to_string(),
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the response status, surfacing the body on failure
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(EngramError::Store(format!(
            "recall service returned {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl StoreClient for RecallClient {
    async fn add(
        &self,
        content: &str,
        subject: &str,
        metadata: &RecordMetadata,
    ) -> Result<MemoryRecord> {
        debug!("Storing record for subject {}", subject);

        let response = self
            .client
            .post(self.endpoint("/v1/memories"))
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&AddRequest {
                content,
                subject,
                metadata,
            })
            .send()
            .await?;

        let response = Self::check(response).await?;
        response
            .json::<MemoryRecord>()
            .await
            .map_err(|e| EngramError::Store(format!("failed to parse add response: {}", e)))
    }

    async fn search(&self, query: &str, subject: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
        debug!("Searching records for subject {}", subject);

        let response = self
            .client
            .post(self.endpoint("/v1/memories/search"))
            .header("Authorization", format!("Token {}", self.api_key))
            .json(&SearchRequest {
                query,
                subject,
                limit,
            })
            .send()
            .await?;

        let response = Self::check(response).await?;
        let envelope = response
            .json::<ResultsEnvelope>()
            .await
            .map_err(|e| EngramError::Store(format!("failed to parse search response: {}", e)))?;

        Ok(envelope.results)
    }

    async fn list(&self, subject: &str) -> Result<Vec<MemoryRecord>> {
        debug!("Listing records for subject {}", subject);

        let response = self
            .client
            .get(self.endpoint("/v1/memories"))
            .query(&[("subject", subject)])
            .header("Authorization", format!("Token {}", self.api_key))
            .send()
            .await?;

        let response = Self::check(response).await?;
        let envelope = response
            .json::<ResultsEnvelope>()
            .await
            .map_err(|e| EngramError::Store(format!("failed to parse list response: {}", e)))?;

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key(api_key: &str) -> Settings {
        Settings {
            api_key: api_key.to_string(),
            base_url: "https://recall.test/".to_string(),
            subject: "tester".to_string(),
            client: "Engram".to_string(),
            project_type: "memory_bridge".to_string(),
            device: "mcp_server".to_string(),
        }
    }

    #[test]
    fn test_rejects_missing_api_key() {
        let result = RecallClient::new(&settings_with_key(""));
        assert!(matches!(result, Err(EngramError::Config(_))));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = RecallClient::new(&settings_with_key("key-1")).unwrap();
        assert_eq!(
            client.endpoint("/v1/memories"),
            "https://recall.test/v1/memories"
        );
    }

    #[test]
    fn test_results_envelope_tolerates_empty_body() {
        let envelope: ResultsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.results.is_empty());
    }
}
