//! # Market Data Feeds
//!
//! HTTP clients for the three external market APIs:
//! - Binance spot 24h ticker (prices)
//! - CryptoPanic posts (news headlines)
//! - alternative.me fear and greed index (sentiment)
//!
//! Each client makes exactly one request per call and reports failures as a `FeedError`.

mod binance;
mod cryptopanic;
mod fear_greed;

pub use binance::BinanceClient;
pub use cryptopanic::CryptoPanicClient;
pub use fear_greed::FearGreedClient;

use crate::domain::traits::FeedError;

/// Turns a non-success response into a `FeedError`, keeping the body for the log.
async fn error_from_response(feed: &str, response: reqwest::Response) -> FeedError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    FeedError::new(feed, format!("HTTP {}: {}", status, body.trim()))
}
