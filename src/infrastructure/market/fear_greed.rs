//! alternative.me Fear & Greed index client.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use super::error_from_response;
use crate::domain::traits::{FeedError, SentimentFeed};
use crate::domain::types::SentimentReading;

const FEED: &str = "fear_greed";

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
    #[serde(default)]
    metadata: Option<FngMetadata>,
}

/// The API sends every number as a string
#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FngMetadata {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FearGreedClient {
    base_url: String,
    client: Client,
}

impl FearGreedClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl SentimentFeed for FearGreedClient {
    async fn current(&self) -> Result<SentimentReading, FeedError> {
        let url = format!("{}/fng/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .send()
            .await
            .map_err(|e| FeedError::new(FEED, format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(FEED, response).await);
        }

        let body: FngResponse = response
            .json()
            .await
            .map_err(|e| FeedError::new(FEED, format!("Failed to parse response: {}", e)))?;

        if let Some(error) = body.metadata.and_then(|m| m.error) {
            return Err(FeedError::new(FEED, error));
        }

        let entry = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::new(FEED, "No index value in response"))?;

        let value = entry
            .value
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|v| *v <= 100)
            .ok_or_else(|| FeedError::new(FEED, format!("Invalid index value '{}'", entry.value)))?;

        let updated_at = entry
            .timestamp
            .as_deref()
            .and_then(|ts| ts.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Ok(SentimentReading {
            value,
            classification: entry.value_classification,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_current_reading() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/fng/").query_param("limit", "1");
                then.status(200).json_body(json!({
                    "name": "Fear and Greed Index",
                    "data": [{
                        "value": "40",
                        "value_classification": "Fear",
                        "timestamp": "1760745600",
                        "time_until_update": "3600"
                    }],
                    "metadata": {"error": null}
                }));
            })
            .await;

        let reading = FearGreedClient::new(Client::new(), &server.base_url())
            .current()
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(reading.value, 40);
        assert_eq!(reading.classification, "Fear");
        assert_eq!(reading.updated_at.unwrap().timestamp(), 1_760_745_600);
    }

    #[tokio::test]
    async fn test_metadata_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/fng/");
                then.status(200)
                    .json_body(json!({"data": [], "metadata": {"error": "Rate limited"}}));
            })
            .await;

        let err = FearGreedClient::new(Client::new(), &server.base_url())
            .current()
            .await
            .unwrap_err();
        assert_eq!(err.message, "Rate limited");
    }

    #[tokio::test]
    async fn test_empty_data_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/fng/");
                then.status(200).json_body(json!({"data": []}));
            })
            .await;

        let err = FearGreedClient::new(Client::new(), &server.base_url())
            .current()
            .await
            .unwrap_err();
        assert!(err.message.contains("No index value"));
    }
}
