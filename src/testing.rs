//! Test doubles shared by the router and command handler tests, plus helpers for
//! pointing a `teloxide::Bot` at an `httpmock` server.

use async_trait::async_trait;
use httpmock::MockServer;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use teloxide::Bot;

use crate::application::router::MarketFeeds;
use crate::domain::traits::{ChatProvider, FeedError, NewsFeed, PriceFeed, SentimentFeed};
use crate::domain::types::{Headline, SentimentReading, Ticker};

/// What the bot sent, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Markdown(String),
    Plain(String),
    Typing,
}

/// Chat that records everything instead of talking to a server.
#[derive(Clone, Default)]
pub struct RecordingChat {
    pub sent: Arc<Mutex<Vec<Sent>>>,
    pub fail_sends: bool,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text of every message and notice, typing indicators skipped.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Markdown(t) | Sent::Plain(t) => Some(t),
                Sent::Typing => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> String {
        self.texts().pop().unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        if self.fail_sends {
            return Err("chat offline".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(Sent::Markdown(content.to_string()));
        Ok(sent.len().to_string())
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        if self.fail_sends {
            return Err("chat offline".to_string());
        }
        self.sent.lock().unwrap().push(Sent::Plain(content.to_string()));
        Ok(())
    }

    async fn typing(&self) -> Result<(), String> {
        self.sent.lock().unwrap().push(Sent::Typing);
        Ok(())
    }

    fn room_id(&self) -> String {
        "test-chat".to_string()
    }
}

pub struct StubPrices(pub Result<Ticker, FeedError>);

#[async_trait]
impl PriceFeed for StubPrices {
    async fn ticker(&self, symbol: &str) -> Result<Ticker, FeedError> {
        self.0.clone().map(|mut t| {
            t.symbol = symbol.to_string();
            t
        })
    }
}

pub struct StubNews(pub Result<Vec<Headline>, FeedError>);

#[async_trait]
impl NewsFeed for StubNews {
    async fn headlines(&self, limit: usize) -> Result<Vec<Headline>, FeedError> {
        self.0
            .clone()
            .map(|list| list.into_iter().take(limit).collect())
    }
}

pub struct StubSentiment(pub Result<SentimentReading, FeedError>);

#[async_trait]
impl SentimentFeed for StubSentiment {
    async fn current(&self) -> Result<SentimentReading, FeedError> {
        self.0.clone()
    }
}

pub fn ticker(price: f64, change: f64) -> Ticker {
    Ticker {
        symbol: "BTC".to_string(),
        pair: "BTCUSDT".to_string(),
        last_price: price,
        change_percent_24h: change,
    }
}

pub fn headline(title: &str) -> Headline {
    Headline {
        title: title.to_string(),
        url: format!("https://news.example/{}", title.len()),
        source: None,
        published_at: None,
    }
}

pub fn reading(value: u8, classification: &str) -> SentimentReading {
    SentimentReading {
        value,
        classification: classification.to_string(),
        updated_at: None,
    }
}

pub fn down(feed: &str) -> FeedError {
    FeedError::new(feed, "connection refused")
}

/// Feeds where everything answers.
pub fn healthy_feeds() -> MarketFeeds {
    feeds(
        Ok(ticker(61543.21, 1.25)),
        Ok(vec![headline("Bitcoin holds support"), headline("ETH upgrade ships")]),
        Ok(reading(40, "Fear")),
    )
}

pub fn feeds(
    prices: Result<Ticker, FeedError>,
    news: Result<Vec<Headline>, FeedError>,
    sentiment: Result<SentimentReading, FeedError>,
) -> MarketFeeds {
    MarketFeeds {
        prices: Arc::new(StubPrices(prices)),
        news: Arc::new(StubNews(news)),
        sentiment: Arc::new(StubSentiment(sentiment)),
    }
}

/// Bot API client talking to `server` with a fixed test token.
pub fn bot_for(server: &MockServer) -> Bot {
    let url = reqwest::Url::parse(&server.base_url()).unwrap();
    Bot::new("123:secret").set_api_url(url)
}

/// Path matcher for a Bot API method. Method names are case-insensitive on Telegram's
/// side, so the match is too.
pub fn bot_method(name: &str) -> Regex {
    Regex::new(&format!("(?i)^/bot[^/]+/{name}$")).unwrap()
}

/// Successful `sendMessage` answer.
pub fn sent_message(chat_id: i64, message_id: i32) -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": message_id,
            "date": 1_760_745_600,
            "chat": {"id": chat_id, "type": "private", "first_name": "Ann"},
            "from": {"id": 42, "is_bot": true, "first_name": "Relay", "username": "coinrelay_bot"},
            "text": "ok"
        }
    })
}

/// Incoming private text message, as teloxide would hand it to the handler.
pub fn incoming(text: &str, from_id: u64, date: i64) -> teloxide::types::Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "date": date,
        "chat": {"id": 555, "type": "private", "first_name": "Ann", "username": "ann"},
        "from": {"id": from_id, "is_bot": false, "first_name": "Ann", "username": "ann"},
        "text": text
    }))
    .unwrap()
}
