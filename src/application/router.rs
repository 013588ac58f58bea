//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command string (e.g., `/price btc`) and dispatches it with the necessary context.

use anyhow::Result;
use std::sync::Arc;

use crate::application::parsing::parse_command;
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatProvider, NewsFeed, PriceFeed, SentimentFeed};
use crate::interface::commands;

/// The three market-data sources handlers can draw on.
#[derive(Clone)]
pub struct MarketFeeds {
    pub prices: Arc<dyn PriceFeed>,
    pub news: Arc<dyn NewsFeed>,
    pub sentiment: Arc<dyn SentimentFeed>,
}

pub struct CommandRouter {
    config: AppConfig,
    feeds: MarketFeeds,
    /// Bot username without `@`, used to accept `/cmd@username`
    bot_username: Option<String>,
}

impl CommandRouter {
    pub fn new(config: AppConfig, feeds: MarketFeeds, bot_username: Option<String>) -> Self {
        Self {
            config,
            feeds,
            bot_username,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let Some(command) = parse_command(message, self.bot_username.as_deref()) else {
            tracing::debug!("Ignoring non-command message from {}", sender);
            return Ok(());
        };

        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}' chat='{}'",
            command.name,
            command.args,
            sender,
            chat.room_id()
        );

        match command.name.as_str() {
            "start" | "help" => {
                commands::start::handle_start(chat).await?;
            }
            "news" => {
                commands::news::handle_news(&self.config, &self.feeds, chat).await?;
            }
            "price" => {
                commands::price::handle_price(&self.feeds, chat, command.args).await?;
            }
            "digest" => {
                commands::digest::handle_digest(&self.config, &self.feeds, chat).await?;
            }
            _ => {
                chat.send_message(crate::strings::messages::UNKNOWN_COMMAND)
                    .await
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
        }

        Ok(())
    }
}
