//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error notices, usage hints, and section headings.

pub const UNKNOWN_COMMAND: &str =
    "Sorry, I didn't understand that command. Try /start to see the list of available commands.";

pub const PRICE_USAGE: &str =
    "Please specify a coin symbol after the command.\n*Example:* /price BTC";

pub fn invalid_symbol(symbol: &str) -> String {
    format!("\"{symbol}\" is not a valid coin symbol. Use a ticker like BTC or ETH.")
}

pub fn price_unavailable(symbol: &str) -> String {
    format!("Sorry, I couldn't get a price for {symbol}.")
}

pub const NEWS_HEADING: &str = "📰 *Latest market news:*";
pub const NEWS_UNAVAILABLE: &str = "Could not load news right now.";
pub const NO_HEADLINES: &str = "No fresh headlines right now.";

pub fn digest_heading(date: &str) -> String {
    format!("📊 *Market digest for {date}*")
}

pub const DIGEST_PRICE_UNAVAILABLE: &str = "⚠️ Price data is unavailable.";
pub const DIGEST_SENTIMENT_UNAVAILABLE: &str = "⚠️ Sentiment index is unavailable.";
pub const DIGEST_HEADLINE_UNAVAILABLE: &str = "⚠️ Headline is unavailable.";
pub const DIGEST_TOP_HEADLINE: &str = "*Top headline:*";
