//! Binance spot ticker client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::traits::{FeedError, PriceFeed};
use crate::domain::types::Ticker;

const FEED: &str = "binance";

/// `GET /api/v3/ticker/24hr` response. Numbers arrive as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    symbol: String,
    last_price: String,
    price_change_percent: String,
}

/// Error body Binance returns with 4xx statuses
#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

#[derive(Debug, Clone)]
pub struct BinanceClient {
    base_url: String,
    quote_asset: String,
    client: Client,
}

impl BinanceClient {
    pub fn new(client: Client, base_url: &str, quote_asset: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            quote_asset: quote_asset.to_uppercase(),
            client,
        }
    }

    /// Exchange pair for a coin: "BTC" -> "BTCUSDT". Symbols already quoted are kept.
    pub fn pair_for(&self, symbol: &str) -> String {
        if symbol.len() > self.quote_asset.len() && symbol.ends_with(&self.quote_asset) {
            symbol.to_string()
        } else {
            format!("{}{}", symbol, self.quote_asset)
        }
    }
}

#[async_trait]
impl PriceFeed for BinanceClient {
    async fn ticker(&self, symbol: &str) -> Result<Ticker, FeedError> {
        let pair = self.pair_for(symbol);
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);
        tracing::debug!(pair = %pair, "Requesting 24h ticker");

        let response = self
            .client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await
            .map_err(|e| FeedError::new(FEED, format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                return Err(FeedError::new(
                    FEED,
                    format!("{} (code {})", api_error.msg, api_error.code),
                ));
            }
            return Err(FeedError::new(FEED, format!("HTTP {}: {}", status, body.trim())));
        }

        let raw: Ticker24h = response
            .json()
            .await
            .map_err(|e| FeedError::new(FEED, format!("Failed to parse response: {}", e)))?;

        let last_price = parse_decimal(&raw.last_price, "lastPrice")?;
        let change_percent_24h = parse_decimal(&raw.price_change_percent, "priceChangePercent")?;

        Ok(Ticker {
            symbol: symbol.to_string(),
            pair: raw.symbol,
            last_price,
            change_percent_24h,
        })
    }
}

fn parse_decimal(value: &str, field: &str) -> Result<f64, FeedError> {
    value
        .parse::<f64>()
        .map_err(|_| FeedError::new(FEED, format!("Invalid {} value '{}'", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> BinanceClient {
        BinanceClient::new(Client::new(), &server.base_url(), "USDT")
    }

    #[test]
    fn test_pair_for() {
        let client = BinanceClient::new(Client::new(), "http://localhost/", "usdt");
        assert_eq!(client.pair_for("BTC"), "BTCUSDT");
        assert_eq!(client.pair_for("ETHUSDT"), "ETHUSDT");
        // The bare quote asset is a coin in its own right
        assert_eq!(client.pair_for("USDT"), "USDTUSDT");
    }

    #[tokio::test]
    async fn test_ticker_parses_decimal_strings() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v3/ticker/24hr")
                    .query_param("symbol", "BTCUSDT");
                then.status(200).json_body(json!({
                    "symbol": "BTCUSDT",
                    "priceChange": "760.12",
                    "priceChangePercent": "1.250",
                    "lastPrice": "61543.21000000",
                    "volume": "12345.6"
                }));
            })
            .await;

        let ticker = client_for(&server).ticker("BTC").await.unwrap();
        mock.assert_async().await;
        assert_eq!(ticker.symbol, "BTC");
        assert_eq!(ticker.pair, "BTCUSDT");
        assert!((ticker.last_price - 61543.21).abs() < 1e-9);
        assert!((ticker.change_percent_24h - 1.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_symbol_reports_exchange_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/ticker/24hr");
                then.status(400)
                    .json_body(json!({"code": -1121, "msg": "Invalid symbol."}));
            })
            .await;

        let err = client_for(&server).ticker("NOPE").await.unwrap_err();
        assert_eq!(err.feed, "binance");
        assert!(err.message.contains("Invalid symbol."));
        assert!(err.message.contains("-1121"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v3/ticker/24hr");
                then.status(200).json_body(json!({
                    "symbol": "BTCUSDT",
                    "lastPrice": "n/a",
                    "priceChangePercent": "0.1"
                }));
            })
            .await;

        let err = client_for(&server).ticker("BTC").await.unwrap_err();
        assert!(err.message.contains("lastPrice"));
    }
}
