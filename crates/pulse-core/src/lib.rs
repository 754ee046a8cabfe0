//! Stock question analysis pipeline
//!
//! Answers a natural-language stock question in one request/response
//! cycle:
//!
//! 1. Resolve a ticker symbol from the query (pluggable
//!    [`TickerResolver`] capability with a deterministic keyword
//!    fallback).
//! 2. Concurrently fetch recent headlines, the latest quote, and the
//!    daily close history from the external providers.
//! 3. Compute the price change over a trailing window of trading days.
//! 4. Synthesize a combined report correlating news with price movement.
//!
//! Fetch failures degrade to placeholder text instead of aborting: once a
//! ticker resolves, a report always renders, even under total provider
//! outage.
//!
//! # Example
//!
//! ```rust,ignore
//! use pulse_core::{Pipeline, PulseConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PulseConfig::builder()
//!         .with_env_api_keys()
//!         .build()?;
//!
//!     let pipeline = Pipeline::from_config(config)?;
//!     let report = pipeline.run("how did tesla react to the news?").await?;
//!     println!("{report}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod change;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod series;
pub mod ticker;

// Re-export main types for convenience
pub use api::alpha_vantage::AlphaVantageClient;
pub use api::news::{NewsApiClient, NewsDigest, NewsItem};
pub use change::{PriceChange, compute_price_change};
pub use config::PulseConfig;
pub use error::{PulseError, Result};
pub use pipeline::{Pipeline, PipelineStage};
pub use provider::{MarketDataProvider, NewsProvider};
pub use report::{AnalysisReport, synthesize};
pub use series::{DailyBar, DailySeries};
pub use ticker::{KeywordResolver, Ticker, TickerResolver};
