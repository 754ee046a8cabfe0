//! Request orchestration
//!
//! One pipeline invocation answers one query: resolve the ticker, fan out
//! the three independent fetches, compute the trailing change, synthesize
//! the report. Every fetch failure is isolated and rendered as placeholder
//! text; only an unresolved ticker terminates the request.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use tokio::time::timeout;

use crate::api::alpha_vantage::AlphaVantageClient;
use crate::api::news::NewsApiClient;
use crate::change::compute_price_change;
use crate::config::PulseConfig;
use crate::error::{PulseError, Result};
use crate::provider::{MarketDataProvider, NewsProvider};
use crate::report::{AnalysisReport, synthesize};
use crate::ticker::{KeywordResolver, TickerResolver};

/// Lifecycle stages of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Resolving,
    Fetching,
    Computing,
    Synthesizing,
    Done,
    Failed,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Resolving => "resolving",
            Self::Fetching => "fetching",
            Self::Computing => "computing",
            Self::Synthesizing => "synthesizing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Orchestrator for one-shot stock query analysis.
pub struct Pipeline {
    resolver: Arc<dyn TickerResolver>,
    news: Arc<dyn NewsProvider>,
    market: Arc<dyn MarketDataProvider>,
    config: PulseConfig,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assemble a pipeline from explicit collaborators.
    pub fn new(
        resolver: Arc<dyn TickerResolver>,
        news: Arc<dyn NewsProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: PulseConfig,
    ) -> Self {
        Self {
            resolver,
            news,
            market,
            config,
        }
    }

    /// Wire the real clients and the fallback resolver from a validated
    /// configuration.
    pub fn from_config(config: PulseConfig) -> Result<Self> {
        let news = Arc::new(NewsApiClient::from_config(&config)?);
        let market = Arc::new(AlphaVantageClient::from_config(&config)?);

        Ok(Self::new(
            Arc::new(KeywordResolver::new()),
            news,
            market,
            config,
        ))
    }

    /// Answer one query.
    ///
    /// Returns `TickerNotFound` without invoking any fetch when resolution
    /// fails; otherwise always produces a report, degrading unavailable
    /// sections to placeholder text.
    pub async fn run(&self, query: &str) -> Result<AnalysisReport> {
        tracing::info!(stage = %PipelineStage::Resolving, query, "resolving ticker");
        let Some(ticker) = self.resolver.resolve(query).await else {
            tracing::warn!(stage = %PipelineStage::Failed, query, "no ticker identified");
            return Err(PulseError::TickerNotFound);
        };
        tracing::info!(%ticker, "ticker resolved");

        // Fan-out: the three fetches are independent, so the stage is
        // bounded by the slowest of them rather than their sum. The join
        // is a barrier; no later stage sees a partial subset.
        tracing::info!(stage = %PipelineStage::Fetching, %ticker, "fetching news, quote, and series");
        let deadline = self.config.request_timeout;
        let (news, quote, series) = tokio::join!(
            timeout(
                deadline,
                self.news.recent_headlines(&ticker, self.config.headline_limit),
            ),
            timeout(deadline, self.market.latest_price(&ticker)),
            timeout(deadline, self.market.daily_series(&ticker)),
        );

        // An elapsed deadline abandons the fetch and counts as that
        // stage's failure kind; nothing is retried within the request.
        let news = news
            .unwrap_or_else(|_| Err(PulseError::NewsFetchFailed("timed out".to_string())));
        let quote = quote.unwrap_or_else(|_| {
            Err(PulseError::QuoteUnavailable {
                symbol: ticker.to_string(),
                reason: "timed out".to_string(),
            })
        });
        let series = series
            .unwrap_or_else(|_| Err(PulseError::SeriesUnavailable("timed out".to_string())));

        let news_summary = match news {
            Ok(digest) => digest.summary(),
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "news fetch degraded");
                "Failed to fetch news.".to_string()
            }
        };

        let quote_line = match quote {
            Ok(price) => format!("Latest quoted price: ${price:.2}"),
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "quote fetch degraded");
                "Latest quoted price unavailable.".to_string()
            }
        };

        tracing::info!(stage = %PipelineStage::Computing, %ticker, "computing price change");
        let change_line =
            match series.and_then(|s| compute_price_change(&s, self.config.window_days)) {
                Ok(change) => change.summary(),
                Err(e) => {
                    tracing::warn!(%ticker, error = %e, "price change degraded");
                    "Not enough data to calculate price change.".to_string()
                }
            };

        tracing::info!(stage = %PipelineStage::Synthesizing, %ticker, "assembling report");
        let change_summary = format!("{quote_line}\n{change_line}");
        let report = synthesize(&ticker, &news_summary, &change_summary);

        tracing::info!(stage = %PipelineStage::Done, %ticker, "report ready");
        Ok(report)
    }
}
