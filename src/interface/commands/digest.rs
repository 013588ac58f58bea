//! # Digest Command
//!
//! Handles `/digest`.
//! Fetches price, sentiment and the top headline one after another. A failing fetch only
//! blanks its own section; the reply is always sent.

use anyhow::Result;
use chrono::Local;

use crate::application::formatter::MarketFormatter;
use crate::application::parsing::normalize_symbol;
use crate::application::router::MarketFeeds;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;

pub async fn handle_digest(
    config: &AppConfig,
    feeds: &MarketFeeds,
    chat: &impl ChatProvider,
) -> Result<()> {
    if let Err(e) = chat.typing().await {
        tracing::debug!("Typing indicator failed: {}", e);
    }

    let symbol = normalize_symbol(&config.digest.symbol).unwrap_or_else(|rejected| rejected);

    let price = feeds.prices.ticker(&symbol).await;
    if let Err(e) = &price {
        tracing::warn!(symbol = %symbol, "Digest price section failed: {}", e);
    }

    let sentiment = feeds.sentiment.current().await;
    if let Err(e) = &sentiment {
        tracing::warn!("Digest sentiment section failed: {}", e);
    }

    let headlines = feeds.news.headlines(1).await;
    if let Err(e) = &headlines {
        tracing::warn!("Digest headline section failed: {}", e);
    }

    let date = Local::now().format("%Y-%m-%d").to_string();
    let reply = MarketFormatter::digest(&date, &price, &sentiment, &headlines);

    chat.send_message(&reply)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
