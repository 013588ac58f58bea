//! # News Command
//!
//! Handles `/news`.
//! Lists the latest headlines from the news feed.

use anyhow::Result;

use crate::application::formatter::MarketFormatter;
use crate::application::router::MarketFeeds;
use crate::domain::config::AppConfig;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;

pub async fn handle_news(
    config: &AppConfig,
    feeds: &MarketFeeds,
    chat: &impl ChatProvider,
) -> Result<()> {
    if let Err(e) = chat.typing().await {
        tracing::debug!("Typing indicator failed: {}", e);
    }

    match feeds.news.headlines(config.services.news.limit).await {
        Ok(headlines) => {
            tracing::info!(count = headlines.len(), "Headlines fetched");
            chat.send_message(&MarketFormatter::news(&headlines))
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Err(e) => {
            tracing::warn!("News fetch failed: {}", e);
            chat.send_notification(messages::NEWS_UNAVAILABLE)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{down, feeds, headline, reading, ticker, RecordingChat};

    #[tokio::test]
    async fn test_headlines_respect_configured_limit() {
        let mut config = AppConfig::default();
        config.services.news.limit = 2;
        let feeds = feeds(
            Ok(ticker(1.0, 0.0)),
            Ok(vec![headline("one"), headline("two"), headline("three")]),
            Ok(reading(50, "Neutral")),
        );
        let chat = RecordingChat::new();

        handle_news(&config, &feeds, &chat).await.unwrap();

        let reply = chat.last_text();
        assert!(reply.starts_with(messages::NEWS_HEADING));
        assert!(reply.contains("[one]"));
        assert!(reply.contains("[two]"));
        assert!(!reply.contains("[three]"));
    }

    #[tokio::test]
    async fn test_feed_failure_sends_notice() {
        let feeds = feeds(
            Ok(ticker(1.0, 0.0)),
            Err(down("cryptopanic")),
            Ok(reading(50, "Neutral")),
        );
        let chat = RecordingChat::new();

        handle_news(&AppConfig::default(), &feeds, &chat).await.unwrap();
        assert_eq!(chat.texts(), vec![messages::NEWS_UNAVAILABLE.to_string()]);
    }
}
