//! # Domain Traits
//!
//! Abstract interfaces for the chat transport and the three market-data feeds.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use std::fmt;

use crate::domain::types::{Headline, SentimentReading, Ticker};

/// Abstract interface for a Chat Provider (e.g., Telegram, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown message to the chat, returning its message ID
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a plain text notice (no markup parsing)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Send a typing indicator
    async fn typing(&self) -> Result<(), String>;

    /// Get the current chat ID
    fn room_id(&self) -> String;
}

/// Error raised by a market-data feed. One attempt, no retries; callers turn it into a
/// section-level notice.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedError {
    pub feed: String,
    pub message: String,
}

impl FeedError {
    pub fn new(feed: &str, message: impl Into<String>) -> Self {
        Self {
            feed: feed.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.feed, self.message)
    }
}

impl std::error::Error for FeedError {}

/// Exchange ticker feed
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Current price and 24h change for a coin symbol such as "BTC"
    async fn ticker(&self, symbol: &str) -> Result<Ticker, FeedError>;
}

/// News aggregator feed
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Most recent headlines, newest first, at most `limit` of them
    async fn headlines(&self, limit: usize) -> Result<Vec<Headline>, FeedError>;
}

/// Sentiment index feed
#[async_trait]
pub trait SentimentFeed: Send + Sync {
    async fn current(&self) -> Result<SentimentReading, FeedError>;
}
