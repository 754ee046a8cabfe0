//! Error types for the stock query pipeline

use thiserror::Error;

/// Errors produced while answering a stock query.
///
/// Only `TickerNotFound` terminates a request; every other variant is
/// caught at its originating stage and rendered as placeholder text in the
/// final report.
#[derive(Debug, Error)]
pub enum PulseError {
    /// No ticker symbol could be identified in the user query
    #[error("could not identify a stock ticker in the query")]
    TickerNotFound,

    /// News provider returned a non-success status or the transfer failed
    #[error("news fetch failed: {0}")]
    NewsFetchFailed(String),

    /// Quote payload did not carry a usable price for the symbol
    #[error("quote unavailable for {symbol}: {reason}")]
    QuoteUnavailable {
        symbol: String,
        reason: String,
    },

    /// Daily series payload was missing or malformed
    #[error("daily series unavailable: {0}")]
    SeriesUnavailable(String),

    /// Not enough price history to compute a change over the window
    #[error("insufficient price history: {0}")]
    InsufficientHistory(String),

    /// Connectivity problem talking to a provider, as opposed to a
    /// well-formed response with an unusable shape
    #[error("transport error talking to {provider}: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// Input could not be parsed as a ticker symbol
    #[error("invalid ticker symbol {input:?}: {reason}")]
    InvalidTicker {
        input: String,
        reason: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PulseError>;
