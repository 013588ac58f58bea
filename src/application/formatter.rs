//! # Market Formatter
//!
//! Turns feed results into Telegram Markdown replies. Pure functions only, so every
//! reply layout can be checked without a network.

use chrono::{DateTime, Utc};

use crate::domain::traits::FeedError;
use crate::domain::types::{Headline, SentimentReading, Ticker};
use crate::strings::messages;

pub struct MarketFormatter;

impl MarketFormatter {
    /// Full `/price` reply.
    pub fn price(ticker: &Ticker) -> String {
        format!(
            "Price for *{}*:\n\n*Price:* ${}\n*24h change:* {}",
            escape_markdown(&ticker.symbol),
            format_price(ticker.last_price),
            format_change(ticker.change_percent_24h)
        )
    }

    /// Full `/news` reply.
    pub fn news(headlines: &[Headline]) -> String {
        if headlines.is_empty() {
            return messages::NO_HEADLINES.to_string();
        }
        let items: Vec<String> = headlines.iter().map(headline_line).collect();
        format!("{}\n\n{}", messages::NEWS_HEADING, items.join("\n\n"))
    }

    /// One-line sentiment summary, e.g. `😨 *Fear & Greed Index:* 40/100 (Fear)`.
    /// The reading time is appended when the feed reports one.
    pub fn sentiment(reading: &SentimentReading) -> String {
        let mut line = format!(
            "{} *Fear & Greed Index:* {}/100 ({})",
            sentiment_emoji(reading.value),
            reading.value,
            escape_markdown(&reading.classification)
        );
        if let Some(at) = reading.updated_at {
            line.push_str(&format!(", as of {}", format_timestamp(&at)));
        }
        line
    }

    /// Composite digest. Each section is rendered from its own result; a failed
    /// section becomes a notice and the others are kept.
    pub fn digest(
        date: &str,
        price: &Result<Ticker, FeedError>,
        sentiment: &Result<SentimentReading, FeedError>,
        headlines: &Result<Vec<Headline>, FeedError>,
    ) -> String {
        let price_section = match price {
            Ok(t) => format!(
                "💰 *{}:* ${} ({} 24h)",
                escape_markdown(&t.symbol),
                format_price(t.last_price),
                format_change(t.change_percent_24h)
            ),
            Err(_) => messages::DIGEST_PRICE_UNAVAILABLE.to_string(),
        };

        let sentiment_section = match sentiment {
            Ok(reading) => Self::sentiment(reading),
            Err(_) => messages::DIGEST_SENTIMENT_UNAVAILABLE.to_string(),
        };

        let headline_section = match headlines {
            Ok(list) => match list.first() {
                Some(top) => format!("{}\n{}", messages::DIGEST_TOP_HEADLINE, headline_line(top)),
                None => messages::NO_HEADLINES.to_string(),
            },
            Err(_) => messages::DIGEST_HEADLINE_UNAVAILABLE.to_string(),
        };

        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            messages::digest_heading(date),
            price_section,
            sentiment_section,
            headline_section
        )
    }
}

/// Escapes the characters legacy Telegram Markdown treats as markup.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Text placed inside `[...]`. Legacy Markdown ignores escapes inside an entity, so
/// brackets are swapped for parentheses instead of being escaped.
pub fn link_label(text: &str) -> String {
    text.replace('[', "(").replace(']', ")")
}

fn headline_line(headline: &Headline) -> String {
    let mut line = if headline.url.is_empty() {
        format!("• {}", escape_markdown(&headline.title))
    } else {
        // A raw `)` would close the link target early
        format!(
            "• [{}]({})",
            link_label(&headline.title),
            headline.url.replace(')', "%29")
        )
    };

    let mut meta = Vec::new();
    if let Some(source) = &headline.source {
        meta.push(escape_markdown(source));
    }
    if let Some(at) = &headline.published_at {
        meta.push(format_timestamp(at));
    }
    if !meta.is_empty() {
        line.push_str(&format!(" ({})", meta.join(", ")));
    }
    line
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%d %b %H:%M UTC").to_string()
}

/// `$` amounts: thousands separators and 2 decimals from 1 up, up to 6 decimals below.
pub fn format_price(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let value = value.abs();

    if value >= 1.0 {
        let fixed = format!("{:.2}", value);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        return format!("{}{}.{}", sign, group_thousands(int_part), frac_part);
    }

    let mut fixed = format!("{:.6}", value);
    while fixed.ends_with('0') && fixed.len() > "0.00".len() {
        fixed.pop();
    }
    format!("{}{}", sign, fixed)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Signed percentage with a direction marker, e.g. `📈 +1.25%`.
pub fn format_change(percent: f64) -> String {
    let arrow = if percent >= 0.0 { "📈" } else { "📉" };
    format!("{} {:+.2}%", arrow, percent)
}

fn sentiment_emoji(value: u8) -> &'static str {
    match value {
        0..=24 => "😱",
        25..=44 => "😨",
        45..=55 => "😐",
        56..=75 => "🙂",
        _ => "🤑",
    }
}
