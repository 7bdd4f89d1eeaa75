use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use crate::models::settings::Settings;
use super::traits::QuoteProvider;

const PROVIDER: &str = "Alpha Vantage";

/// Date format used as keys of the daily time series.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Alpha Vantage API provider for equity quotes.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key.
/// - **Endpoints used**: `GLOBAL_QUOTE` (last price) and
///   `TIME_SERIES_DAILY` (compact, last 100 trading days).
///
/// When the daily limit is hit the service answers 200 with a "Note" or
/// "Information" body instead of data, which surfaces here as missing keys.
pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, crate::models::settings::DEFAULT_BASE_URL.to_string(), 30)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_base_url(
            settings.api_key.clone(),
            settings.base_url.clone(),
            settings.request_timeout_secs,
        )
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn query(&self, function: &str, symbol: &str) -> Result<String, CoreError> {
        tracing::debug!(function, symbol, "querying {PROVIDER}");
        let mut params = vec![("function", function), ("symbol", symbol)];
        if function == "TIME_SERIES_DAILY" {
            params.push(("outputsize", "compact"));
        }
        params.push(("apikey", self.api_key.as_str()));

        let body = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

#[derive(Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyData>>,
}

#[derive(Deserialize)]
struct DailyData {
    #[serde(rename = "4. close")]
    close: String,
}

/// Extract the last price from a `GLOBAL_QUOTE` response body.
pub fn parse_global_quote(symbol: &str, body: &str) -> Result<f64, CoreError> {
    let resp: GlobalQuoteResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse quote for {symbol}: {e}"),
    })?;

    let price_str = resp
        .global_quote
        .and_then(|q| q.price)
        .ok_or_else(|| CoreError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no quote in response (unknown symbol or API limit reached)".into(),
        })?;

    price_str.trim().parse().map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Invalid price format for {symbol}: {e}"),
    })
}

/// Extract daily closes from a `TIME_SERIES_DAILY` response body.
///
/// The feed is a JSON object keyed by date, so entry order is not
/// guaranteed. Points are returned in whatever order they were read.
pub fn parse_daily_series(symbol: &str, body: &str) -> Result<Vec<PricePoint>, CoreError> {
    let resp: TimeSeriesResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse time series for {symbol}: {e}"),
    })?;

    let time_series = resp.time_series.ok_or_else(|| CoreError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: "no daily time series in response".into(),
    })?;

    time_series
        .into_iter()
        .map(|(date_str, data)| {
            let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|e| {
                CoreError::Api {
                    provider: PROVIDER.into(),
                    message: format!("Invalid date '{date_str}' for {symbol}: {e}"),
                }
            })?;
            let price: f64 = data.close.trim().parse().map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Invalid close '{}' on {date_str} for {symbol}: {e}", data.close),
            })?;
            Ok(PricePoint::new(date, price))
        })
        .collect()
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_last_price(&self, symbol: &str) -> Result<f64, CoreError> {
        let body = self.query("GLOBAL_QUOTE", symbol).await?;
        parse_global_quote(symbol, &body)
    }

    async fn get_daily_history(&self, symbol: &str) -> Result<Vec<PricePoint>, CoreError> {
        let body = self.query("TIME_SERIES_DAILY", symbol).await?;
        parse_daily_series(symbol, &body)
    }
}
