//! # Telegram Service Adapter
//!
//! Wraps `teloxide::Bot` so command handlers can talk to a single Telegram chat through
//! the `ChatProvider` trait. Polling and update dispatch are left to teloxide; see
//! `main.rs`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::{Request, Requester};
use teloxide::types::{ChatAction, ChatId, Message, ParseMode, User};
use teloxide::{Bot, RequestError};

use crate::domain::config::TelegramConfig;
use crate::domain::traits::ChatProvider;

/// Builds the bot for `token`, pointed at the configured Bot API server.
pub fn build_bot(config: &TelegramConfig, token: &str) -> Result<Bot> {
    let api_url = reqwest::Url::parse(&config.api_url)
        .with_context(|| format!("Invalid Telegram API URL {}", config.api_url))?;
    Ok(Bot::new(token).set_api_url(api_url))
}

/// Error text with the bot token masked. Network errors carry the request URL, and the
/// token is part of every Bot API URL.
pub fn describe_error(bot: &Bot, err: &RequestError) -> String {
    err.to_string().replace(bot.token(), "<token>")
}

/// `@username` when available, otherwise the numeric user ID.
pub fn user_handle(user: &User) -> String {
    match &user.username {
        Some(name) => format!("@{name}"),
        None => user.id.0.to_string(),
    }
}

/// A single Telegram chat seen through the `ChatProvider` interface.
#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChat {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_text(
        &self,
        content: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<Message, RequestError> {
        let mut request = self
            .bot
            .send_message(self.chat_id, content)
            .disable_web_page_preview(true);
        if let Some(mode) = parse_mode {
            request = request.parse_mode(mode);
        }
        request.send().await
    }
}

/// Telegram answers malformed markup with "Bad Request: can't parse entities".
fn is_markup_rejection(err: &RequestError) -> bool {
    matches!(err, RequestError::Api(api) if api.to_string().to_lowercase().contains("can't parse entities"))
}

#[async_trait]
impl ChatProvider for TelegramChat {
    fn room_id(&self) -> String {
        self.chat_id.0.to_string()
    }

    async fn send_message(&self, content: &str) -> Result<String, String> {
        tracing::info!("Bot sending message to {}: {}", self.chat_id.0, content);

        let sent = match self.send_text(content, Some(ParseMode::Markdown)).await {
            Err(e) if is_markup_rejection(&e) => {
                tracing::warn!("Markdown rejected, resending as plain text: {}", e);
                self.send_text(content, None).await
            }
            other => other,
        };

        sent.map(|msg| msg.id.to_string())
            .map_err(|e| describe_error(&self.bot, &e))
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.send_text(content, None)
            .await
            .map(|_| ())
            .map_err(|e| describe_error(&self.bot, &e))
    }

    async fn typing(&self) -> Result<(), String> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| describe_error(&self.bot, &e))
    }
}
