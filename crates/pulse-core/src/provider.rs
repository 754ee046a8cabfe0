//! Provider traits in front of the external data clients
//!
//! The pipeline depends on these seams rather than on concrete clients, so
//! behavior tests can drive it with stub providers and the two market-data
//! operations stay independent even though one client serves both.

use async_trait::async_trait;

use crate::api::news::NewsDigest;
use crate::error::Result;
use crate::series::DailySeries;
use crate::ticker::Ticker;

/// Source of recent headlines for a ticker.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Fetch up to `limit` recent headlines, most recent first.
    ///
    /// An empty result set is a successful [`NewsDigest::NoRecentNews`],
    /// not an error.
    async fn recent_headlines(&self, ticker: &Ticker, limit: usize) -> Result<NewsDigest>;
}

/// Source of quotes and daily close history for a ticker.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest quoted price.
    async fn latest_price(&self, ticker: &Ticker) -> Result<f64>;

    /// Full daily close series, keyed by date.
    async fn daily_series(&self, ticker: &Ticker) -> Result<DailySeries>;
}
