//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, PriceFeed).

pub mod market;
pub mod telegram;

use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("coinrelay/", env!("CARGO_PKG_VERSION"));

/// Builds an HTTP client with the bot's user agent and a whole-request timeout.
pub fn http_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
