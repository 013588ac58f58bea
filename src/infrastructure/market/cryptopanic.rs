//! CryptoPanic news client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use super::error_from_response;
use crate::domain::traits::{FeedError, NewsFeed};
use crate::domain::types::Headline;

const FEED: &str = "cryptopanic";

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    results: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    source: Option<PostSource>,
}

#[derive(Debug, Deserialize)]
struct PostSource {
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CryptoPanicClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl CryptoPanicClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }
}

#[async_trait]
impl NewsFeed for CryptoPanicClient {
    async fn headlines(&self, limit: usize) -> Result<Vec<Headline>, FeedError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FeedError::new(FEED, "No news API key configured"))?;

        let url = format!("{}/posts/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("auth_token", api_key), ("public", "true"), ("kind", "news")])
            .send()
            .await
            // The request URL carries the key, keep it out of the message
            .map_err(|e| {
                FeedError::new(FEED, format!("HTTP request failed: {}", e).replace(api_key, "***"))
            })?;

        if !response.status().is_success() {
            return Err(error_from_response(FEED, response).await);
        }

        let body: PostsResponse = response
            .json()
            .await
            .map_err(|e| FeedError::new(FEED, format!("Failed to parse response: {}", e)))?;

        let headlines = body
            .results
            .into_iter()
            .filter(|post| !post.title.trim().is_empty())
            .take(limit)
            .map(|post| Headline {
                title: post.title.trim().to_string(),
                url: post.url.unwrap_or_default(),
                source: post.source.and_then(|s| s.title),
                published_at: post.published_at.as_deref().and_then(parse_timestamp),
            })
            .collect();

        Ok(headlines)
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
