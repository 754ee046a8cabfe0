//! Ticker symbols and the resolution boundary
//!
//! Resolution of free text into a ticker is a pluggable capability: the
//! pipeline only sees the [`TickerResolver`] trait. [`KeywordResolver`] is
//! the deterministic fallback used both in production (when no smarter
//! resolver is wired in) and as a test double.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};

/// Normalized stock ticker symbol.
///
/// Uppercase, non-empty, restricted to ASCII letters plus `.` and `-`
/// (class shares such as `BRK.B` are valid). Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize a ticker symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PulseError::InvalidTicker {
                input: input.to_string(),
                reason: "empty symbol".to_string(),
            });
        }

        let normalized = trimmed.to_ascii_uppercase();

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(PulseError::InvalidTicker {
                    input: input.to_string(),
                    reason: format!("symbol must start with a letter, found {first:?}"),
                });
            }
        }

        for ch in normalized.chars() {
            if !(ch.is_ascii_alphabetic() || ch == '.' || ch == '-') {
                return Err(PulseError::InvalidTicker {
                    input: input.to_string(),
                    reason: format!("invalid character {ch:?}"),
                });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = PulseError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = PulseError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

/// Capability boundary for turning a free-text query into a ticker.
///
/// `None` is terminal for the whole request: resolution failure is not
/// considered transient and is never retried.
#[async_trait]
pub trait TickerResolver: Send + Sync {
    /// Resolve a user query to a ticker symbol, or `None` when no
    /// instrument can be identified.
    async fn resolve(&self, query: &str) -> Option<Ticker>;
}

/// Company names recognized by the fallback resolver.
const COMPANY_TABLE: &[(&str, &str)] = &[
    ("tesla", "TSLA"),
    ("apple", "AAPL"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("microsoft", "MSFT"),
    ("meta", "META"),
];

/// Deterministic lookup-table resolver.
///
/// Checks the query for a known company name first, then for an explicit
/// 2-5 letter uppercase token that parses as a ticker. No network, no
/// model, fully reproducible.
#[derive(Debug, Clone, Default)]
pub struct KeywordResolver;

impl KeywordResolver {
    pub fn new() -> Self {
        Self
    }

    fn lookup_company(query: &str) -> Option<Ticker> {
        let lowered = query.to_lowercase();
        COMPANY_TABLE
            .iter()
            .find(|(name, _)| lowered.contains(name))
            .and_then(|(_, symbol)| Ticker::parse(symbol).ok())
    }

    fn explicit_symbol(query: &str) -> Option<Ticker> {
        query
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_ascii_alphanumeric()))
            .filter(|word| {
                (2..=5).contains(&word.len()) && word.chars().all(|c| c.is_ascii_uppercase())
            })
            .find_map(|word| Ticker::parse(word).ok())
    }
}

#[async_trait]
impl TickerResolver for KeywordResolver {
    async fn resolve(&self, query: &str) -> Option<Ticker> {
        Self::lookup_company(query).or_else(|| Self::explicit_symbol(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_to_uppercase() {
        let ticker = Ticker::parse(" aapl ").expect("symbol should parse");
        assert_eq!(ticker.as_str(), "AAPL");
    }

    #[test]
    fn test_parse_allows_dot_and_hyphen() {
        assert!(Ticker::parse("BRK.B").is_ok());
        assert!(Ticker::parse("RDS-A").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        let err = Ticker::parse("   ").expect_err("must fail");
        assert!(matches!(err, PulseError::InvalidTicker { .. }));
    }

    #[test]
    fn test_parse_rejects_digits_and_symbols() {
        assert!(Ticker::parse("AAPL1").is_err());
        assert!(Ticker::parse("AAPL$").is_err());
        assert!(Ticker::parse("1AAPL").is_err());
    }

    #[tokio::test]
    async fn test_resolver_finds_company_names() {
        let resolver = KeywordResolver::new();

        let ticker = resolver.resolve("how is tesla doing this week?").await;
        assert_eq!(ticker.expect("should resolve").as_str(), "TSLA");

        let ticker = resolver.resolve("Why did Apple drop today?").await;
        assert_eq!(ticker.expect("should resolve").as_str(), "AAPL");
    }

    #[tokio::test]
    async fn test_resolver_finds_explicit_symbols() {
        let resolver = KeywordResolver::new();

        let ticker = resolver.resolve("what moved NVDA recently?").await;
        assert_eq!(ticker.expect("should resolve").as_str(), "NVDA");
    }

    #[tokio::test]
    async fn test_resolver_prefers_company_name_over_symbol() {
        let resolver = KeywordResolver::new();

        let ticker = resolver.resolve("compare tesla with NVDA").await;
        assert_eq!(ticker.expect("should resolve").as_str(), "TSLA");
    }

    #[tokio::test]
    async fn test_resolver_returns_none_for_unknown_query() {
        let resolver = KeywordResolver::new();

        assert!(resolver.resolve("what should i cook tonight?").await.is_none());
    }
}
