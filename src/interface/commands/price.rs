//! # Price Command
//!
//! Handles `/price <SYMBOL>`.
//! Validates the symbol, asks the exchange for a 24h ticker, and replies with price and change.

use anyhow::Result;

use crate::application::formatter::MarketFormatter;
use crate::application::parsing::normalize_symbol;
use crate::application::router::MarketFeeds;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub async fn handle_price(feeds: &MarketFeeds, chat: &impl ChatProvider, args: &str) -> Result<()> {
    let Some(raw) = args.split_whitespace().next() else {
        chat.send_message(messages::PRICE_USAGE)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    };

    let symbol = match normalize_symbol(raw) {
        Ok(symbol) => symbol,
        Err(rejected) => {
            chat.send_notification(&messages::invalid_symbol(&rejected))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
            return Ok(());
        }
    };

    if let Err(e) = chat.typing().await {
        tracing::debug!("Typing indicator failed: {}", e);
    }

    match feeds.prices.ticker(&symbol).await {
        Ok(ticker) => {
            tracing::info!(symbol = %symbol, pair = %ticker.pair, price = ticker.last_price, "Price fetched");
            chat.send_message(&MarketFormatter::price(&ticker))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Err(e) => {
            tracing::warn!(symbol = %symbol, "Price fetch failed: {}", e);
            chat.send_notification(&messages::price_unavailable(&symbol))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}
