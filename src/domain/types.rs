//! # Domain Types
//!
//! Market values returned by the feeds. They live only long enough to be formatted
//! into a reply.

use chrono::{DateTime, Utc};

/// Spot price snapshot for one coin.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticker {
    /// Coin symbol as the user typed it, upper-cased (e.g. "BTC")
    pub symbol: String,
    /// Exchange pair the price was read from (e.g. "BTCUSDT")
    pub pair: String,
    pub last_price: f64,
    /// Rolling 24h change in percent
    pub change_percent_24h: f64,
}

/// A single news headline.
#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Fear and greed index reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReading {
    /// 0 (extreme fear) to 100 (extreme greed)
    pub value: u8,
    pub classification: String,
    pub updated_at: Option<DateTime<Utc>>,
}
