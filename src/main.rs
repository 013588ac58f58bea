//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: Configuration, Credentials and Types
//! - Infrastructure: Telegram, market data feeds
//! - Application: Router, Parsing, Formatting, Logging
//! - Interface: Command Handlers
//!
//! and then hands the bot to teloxide's long-polling dispatcher until Ctrl-C.

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use teloxide::requests::{Request, Requester};
use teloxide::types::{Message, UserId};
use teloxide::{respond, Bot};

use crate::application::logging;
use crate::application::router::{CommandRouter, MarketFeeds};
use crate::domain::config::{AppConfig, Credentials, DEFAULT_CONFIG_PATH};
use crate::infrastructure::market::{BinanceClient, CryptoPanicClient, FearGreedClient};
use crate::infrastructure::telegram::{self, TelegramChat};
use crate::strings::logs;

/// Whole-request timeout for the market data APIs.
const FEED_TIMEOUT_SECS: u64 = 20;

#[derive(Parser, Debug)]
#[command(name = "coinrelay", version, about = "Crypto market news and prices for Telegram")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load Configuration
    let (config_path, required) = match cli.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let config = AppConfig::load(&config_path, required)?;

    // 2. Logging Setup
    let _guard = logging::init(&config.logging)?;
    tracing::info!("{}", logs::STARTING);
    if config_path.exists() {
        tracing::info!("{}", logs::config_loaded(&config_path.display().to_string()));
    } else {
        tracing::info!("{}", logs::CONFIG_DEFAULTS);
    }

    // 3. Credentials. A missing token ends startup quietly rather than with an error exit.
    let credentials = match Credentials::from_env(&config) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("{}", logs::missing_token(&e.to_string()));
            return Ok(());
        }
    };
    if credentials.news_api_key.is_none() {
        tracing::warn!("{}", logs::NEWS_KEY_MISSING);
    }

    // 4. Initialize Infrastructure
    let feeds_http =
        infrastructure::http_client(FEED_TIMEOUT_SECS).context("Failed to create HTTP client")?;
    let services = &config.services;
    let feeds = MarketFeeds {
        prices: Arc::new(BinanceClient::new(
            feeds_http.clone(),
            &services.exchange.base_url,
            &services.exchange.quote_asset,
        )),
        news: Arc::new(CryptoPanicClient::new(
            feeds_http.clone(),
            &services.news.base_url,
            credentials.news_api_key.clone(),
        )),
        sentiment: Arc::new(FearGreedClient::new(feeds_http, &services.sentiment.base_url)),
    };

    let bot = telegram::build_bot(&services.telegram, &credentials.bot_token)?;
    let me = bot.get_me().send().await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to authenticate with the Telegram Bot API: {}",
            telegram::describe_error(&bot, &e)
        )
    })?;
    tracing::info!("{}", logs::logged_in(&telegram::user_handle(&me.user)));

    // 5. Event Loop
    let relay = Arc::new(Relay {
        router: CommandRouter::new(config.clone(), feeds, me.user.username.clone()),
        turn: Mutex::new(()),
        bot_id: me.user.id,
        drop_before: services.telegram.drop_pending_updates.then(Utc::now),
    });

    tracing::info!("{}", logs::POLL_LOOP_START);
    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let relay = Arc::clone(&relay);
        async move {
            relay.handle(&bot, &msg).await;
            respond(())
        }
    })
    .await;

    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}

/// Routes incoming text messages to the command router. Handler errors are logged and
/// never reach the dispatcher, so one failed reply does not affect later updates.
///
/// teloxide runs different chats concurrently; `turn` keeps handling to one message at a
/// time across all chats.
struct Relay {
    router: CommandRouter,
    turn: Mutex<()>,
    bot_id: UserId,
    /// Messages sent before this instant are dropped when pending updates are skipped
    drop_before: Option<DateTime<Utc>>,
}

impl Relay {
    async fn handle(&self, bot: &Bot, msg: &Message) {
        let Some(text) = msg.text() else {
            return;
        };

        // Ignore messages older than start_time
        if self.drop_before.is_some_and(|start| msg.date < start) {
            tracing::debug!("Dropping pending message {}", msg.id);
            return;
        }

        if msg.from().is_some_and(|user| user.id == self.bot_id) {
            return;
        }

        let sender = msg
            .from()
            .map(telegram::user_handle)
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info!("Received message from {}: \n{}", sender, text);

        let _turn = self.turn.lock().await;
        let chat = TelegramChat::new(bot.clone(), msg.chat.id);
        if let Err(e) = self.router.route(&chat, text, &sender).await {
            tracing::error!("{}", logs::route_failed(&e.to_string()));
        }
    }
}
