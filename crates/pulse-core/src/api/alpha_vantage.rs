//! Alpha Vantage API client

use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;

use crate::config::PulseConfig;
use crate::error::{PulseError, Result};
use crate::provider::MarketDataProvider;
use crate::series::{DailyBar, DailySeries};
use crate::ticker::Ticker;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "alphavantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage client serving both quote and daily-series lookups.
///
/// One credential and one rate limiter cover both endpoints; the free tier
/// allows 5 requests per minute.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new client with an API key and a per-minute quota.
    pub fn new(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Self {
            client: Client::new(),
            api_key: api_key.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Create a client from an injected configuration.
    pub fn from_config(config: &PulseConfig) -> Result<Self> {
        let api_key = config.require_alpha_vantage_api_key()?;
        Ok(Self::new(api_key, config.alpha_vantage_rate_limit))
    }

    async fn query(&self, function: &str, ticker: &Ticker) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let mut params = HashMap::new();
        params.insert("function", function);
        params.insert("symbol", ticker.as_str());
        params.insert("apikey", self.api_key.as_str());

        self.client
            .get(BASE_URL)
            .query(&params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| PulseError::Transport {
                provider: PROVIDER.to_string(),
                source,
            })
    }

    /// Latest quoted price from the `GLOBAL_QUOTE` endpoint.
    ///
    /// A well-formed response without the expected nested price field is a
    /// data-shape problem (`QuoteUnavailable`), kept apart from transport
    /// failures.
    pub async fn latest_price(&self, ticker: &Ticker) -> Result<f64> {
        let response = self.query("GLOBAL_QUOTE", ticker).await?;

        let payload: GlobalQuoteResponse =
            response
                .json()
                .await
                .map_err(|e| PulseError::QuoteUnavailable {
                    symbol: ticker.to_string(),
                    reason: format!("unparseable payload: {e}"),
                })?;

        parse_global_quote(ticker, payload)
    }

    /// Full daily close history from the `TIME_SERIES_DAILY_ADJUSTED`
    /// endpoint, keyed by date.
    pub async fn daily_series(&self, ticker: &Ticker) -> Result<DailySeries> {
        let response = self.query("TIME_SERIES_DAILY_ADJUSTED", ticker).await?;

        let payload: DailySeriesResponse = response
            .json()
            .await
            .map_err(|e| PulseError::SeriesUnavailable(format!("unparseable payload: {e}")))?;

        series_from_payload(payload)
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    async fn latest_price(&self, ticker: &Ticker) -> Result<f64> {
        Self::latest_price(self, ticker).await
    }

    async fn daily_series(&self, ticker: &Ticker) -> Result<DailySeries> {
        Self::daily_series(self, ticker).await
    }
}

// Alpha Vantage nests its values under prose keys and quotes every number
// as a string; the payload structs keep that irregularity at the edge.

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: Option<GlobalQuotePayload>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuotePayload {
    #[serde(rename = "05. price", default)]
    price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    series: Option<BTreeMap<String, DailyBarPayload>>,
}

#[derive(Debug, Deserialize)]
struct DailyBarPayload {
    #[serde(rename = "4. close")]
    close: String,
}

pub(crate) fn parse_global_quote(ticker: &Ticker, payload: GlobalQuoteResponse) -> Result<f64> {
    let quote = payload.quote.ok_or_else(|| PulseError::QuoteUnavailable {
        symbol: ticker.to_string(),
        reason: "missing \"Global Quote\" object".to_string(),
    })?;

    let raw = quote.price.ok_or_else(|| PulseError::QuoteUnavailable {
        symbol: ticker.to_string(),
        reason: "missing \"05. price\" field".to_string(),
    })?;

    raw.trim()
        .parse::<f64>()
        .map_err(|_| PulseError::QuoteUnavailable {
            symbol: ticker.to_string(),
            reason: format!("non-numeric price {raw:?}"),
        })
}

pub(crate) fn series_from_payload(payload: DailySeriesResponse) -> Result<DailySeries> {
    let raw = payload.series.ok_or_else(|| {
        PulseError::SeriesUnavailable("missing \"Time Series (Daily)\" object".to_string())
    })?;

    let mut series = DailySeries::new();
    for (date_key, bar) in raw {
        let date = NaiveDate::parse_from_str(&date_key, "%Y-%m-%d").map_err(|e| {
            PulseError::SeriesUnavailable(format!("unparseable date key {date_key:?}: {e}"))
        })?;

        let close = bar.close.trim().parse::<f64>().map_err(|_| {
            PulseError::SeriesUnavailable(format!(
                "non-numeric close {:?} on {date_key}",
                bar.close
            ))
        })?;

        series.insert(DailyBar::new(date, close));
    }

    Ok(series)
}
