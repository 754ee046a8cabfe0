//! News search API client

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::PulseConfig;
use crate::error::{PulseError, Result};
use crate::provider::NewsProvider;
use crate::ticker::Ticker;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One news headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub source_name: String,
}

/// Result of a headline fetch.
///
/// A successful response with zero articles is a distinct outcome from a
/// failed fetch; only the latter is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsDigest {
    /// Headlines in publish-time descending order
    Headlines(Vec<NewsItem>),
    /// The provider answered successfully but had nothing recent
    NoRecentNews,
}

impl NewsDigest {
    /// Build a digest from provider articles, capped at `limit`.
    pub fn from_items(items: Vec<NewsItem>, limit: usize) -> Self {
        if items.is_empty() {
            Self::NoRecentNews
        } else {
            Self::Headlines(items.into_iter().take(limit).collect())
        }
    }

    /// Render the digest as report-ready text, one line per headline.
    pub fn summary(&self) -> String {
        match self {
            Self::NoRecentNews => "No recent news found.".to_string(),
            Self::Headlines(items) => items
                .iter()
                .map(|item| format!("- {} ({})", item.title, item.source_name))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// News search client.
///
/// Queries the everything endpoint filtered by ticker symbol, newest
/// first. No retries here: the pipeline decides whether to continue after
/// a failure (it does).
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
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
        let api_key = config.require_news_api_key()?;
        Ok(Self::new(api_key, config.news_rate_limit))
    }

    /// Fetch recent headlines mentioning `ticker`.
    pub async fn recent_headlines(&self, ticker: &Ticker, limit: usize) -> Result<NewsDigest> {
        self.rate_limiter.until_ready().await;

        let page_size = limit.to_string();
        let mut params = HashMap::new();
        params.insert("q", ticker.as_str());
        params.insert("sortBy", "publishedAt");
        params.insert("language", "en");
        params.insert("pageSize", page_size.as_str());
        params.insert("apiKey", self.api_key.as_str());

        let response = self
            .client
            .get(BASE_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| PulseError::NewsFetchFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PulseError::NewsFetchFailed(format!(
                "news provider returned status {}",
                response.status()
            )));
        }

        let payload: NewsSearchResponse = response
            .json()
            .await
            .map_err(|e| PulseError::NewsFetchFailed(format!("unparseable payload: {e}")))?;

        let digest = digest_from_payload(payload, limit);
        if matches!(digest, NewsDigest::NoRecentNews) {
            tracing::debug!(%ticker, "news provider returned no recent articles");
        }

        Ok(digest)
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn recent_headlines(&self, ticker: &Ticker, limit: usize) -> Result<NewsDigest> {
        Self::recent_headlines(self, ticker, limit).await
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewsSearchResponse {
    #[serde(default)]
    articles: Vec<ArticlePayload>,
}

#[derive(Debug, Deserialize)]
struct ArticlePayload {
    title: String,
    source: ArticleSource,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: String,
}

pub(crate) fn digest_from_payload(payload: NewsSearchResponse, limit: usize) -> NewsDigest {
    let items = payload
        .articles
        .into_iter()
        .map(|article| NewsItem {
            title: article.title,
            source_name: article.source.name,
        })
        .collect();

    NewsDigest::from_items(items, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> NewsSearchResponse {
        serde_json::from_value(value).expect("fixture deserializes")
    }

    #[test]
    fn test_client_creation() {
        let client = NewsApiClient::new("test-key", 30);
        assert_eq!(client.api_key, "test-key");
    }

    #[test]
    fn test_articles_become_headlines_in_order() {
        let payload = payload(json!({
            "articles": [
                { "title": "Tesla jumps on delivery beat", "source": { "name": "Reuters" } },
                { "title": "Tesla expands Berlin plant", "source": { "name": "Bloomberg" } },
            ]
        }));

        let digest = digest_from_payload(payload, 5);
        let NewsDigest::Headlines(items) = digest else {
            panic!("expected headlines");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Tesla jumps on delivery beat");
        assert_eq!(items[1].source_name, "Bloomberg");
    }

    #[test]
    fn test_empty_article_list_is_no_recent_news_not_error() {
        let digest = digest_from_payload(payload(json!({ "articles": [] })), 5);
        assert_eq!(digest, NewsDigest::NoRecentNews);
        assert_eq!(digest.summary(), "No recent news found.");
    }

    #[test]
    fn test_missing_articles_key_is_no_recent_news() {
        let digest = digest_from_payload(payload(json!({ "status": "ok" })), 5);
        assert_eq!(digest, NewsDigest::NoRecentNews);
    }

    #[test]
    fn test_headlines_are_capped_at_limit() {
        let payload = payload(json!({
            "articles": [
                { "title": "one", "source": { "name": "a" } },
                { "title": "two", "source": { "name": "b" } },
                { "title": "three", "source": { "name": "c" } },
            ]
        }));

        let NewsDigest::Headlines(items) = digest_from_payload(payload, 2) else {
            panic!("expected headlines");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_summary_renders_one_line_per_headline() {
        let digest = NewsDigest::from_items(
            vec![
                NewsItem {
                    title: "Apple unveils new chip".to_string(),
                    source_name: "The Verge".to_string(),
                },
                NewsItem {
                    title: "Apple raises dividend".to_string(),
                    source_name: "WSJ".to_string(),
                },
            ],
            5,
        );

        assert_eq!(
            digest.summary(),
            "- Apple unveils new chip (The Verge)\n- Apple raises dividend (WSJ)"
        );
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_recent_headlines_live() {
        let api_key = std::env::var("NEWS_API_KEY").expect("NEWS_API_KEY set");
        let client = NewsApiClient::new(api_key, 30);
        let ticker = Ticker::parse("AAPL").expect("valid ticker");

        let digest = client.recent_headlines(&ticker, 5).await;
        assert!(digest.is_ok());
    }
}
