//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Every key is optional; missing sections fall back to the public endpoints of the
//! services the bot talks to. Secrets never live in the file, only the names of the
//! environment variables that hold them.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "data/config.yaml";

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub digest: DigestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads the configuration from `path`.
    ///
    /// When `required` is false a missing file yields the defaults, so the bot can
    /// run with nothing but a token in the environment.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is valid YAML for "all defaults" but serde_yaml sees `null`
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Configuration for the connected services.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ServicesConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

/// Telegram Bot API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_url")]
    pub api_url: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// Skip messages sent while the bot was offline
    #[serde(default)]
    pub drop_pending_updates: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_url(),
            token_env: default_token_env(),
            drop_pending_updates: false,
        }
    }
}

/// Spot exchange used for `/price` and the digest.
#[derive(Debug, Deserialize, Clone)]
pub struct ExchangeConfig {
    #[serde(default = "default_exchange_url")]
    pub base_url: String,
    #[serde(default = "default_quote_asset")]
    pub quote_asset: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_exchange_url(),
            quote_asset: default_quote_asset(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsConfig {
    #[serde(default = "default_news_url")]
    pub base_url: String,
    #[serde(default = "default_news_key_env")]
    pub api_key_env: String,
    /// Number of headlines shown by `/news`.
    #[serde(default = "default_news_limit")]
    pub limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_url(),
            api_key_env: default_news_key_env(),
            limit: default_news_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SentimentConfig {
    #[serde(default = "default_sentiment_url")]
    pub base_url: String,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            base_url: default_sentiment_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DigestConfig {
    /// Coin whose price heads the digest.
    #[serde(default = "default_digest_symbol")]
    pub symbol: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            symbol: default_digest_symbol(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

fn default_telegram_url() -> String {
    "https://api.telegram.org".to_string()
}
fn default_token_env() -> String {
    "TELEGRAM_TOKEN".to_string()
}
fn default_exchange_url() -> String {
    "https://api.binance.com".to_string()
}
fn default_quote_asset() -> String {
    "USDT".to_string()
}
fn default_news_url() -> String {
    "https://cryptopanic.com/api/v1".to_string()
}
fn default_news_key_env() -> String {
    "NEWS_API_KEY".to_string()
}
fn default_news_limit() -> usize {
    5
}
fn default_sentiment_url() -> String {
    "https://api.alternative.me".to_string()
}
fn default_digest_symbol() -> String {
    "BTC".to_string()
}
fn default_log_dir() -> String {
    "data".to_string()
}
fn default_log_file() -> String {
    "session.log".to_string()
}
fn default_log_filter() -> String {
    "info,hyper=warn,reqwest=warn".to_string()
}

/// Secrets resolved from the environment at startup.
#[derive(Clone)]
pub struct Credentials {
    pub bot_token: String,
    pub news_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env(config: &AppConfig) -> Result<Self> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolves secrets through `lookup`. The bot token is mandatory; an empty value
    /// counts as missing.
    pub fn resolve<F>(config: &AppConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_env = &config.services.telegram.token_env;
        let bot_token = lookup(token_env)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .with_context(|| format!("{token_env} is not set"))?;

        let news_api_key = lookup(&config.services.news.api_key_env)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            bot_token,
            news_api_key,
        })
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bot_token", &"<redacted>")
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
