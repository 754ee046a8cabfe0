//! Analysis report synthesis

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ticker::Ticker;

/// Fixed correlating sentence closing every report.
pub const CORRELATION_NOTE: &str = "Recent news likely influenced the stock's price changes.";

/// Final output of one pipeline run.
///
/// Assembled once and never mutated; the sections may contain placeholder
/// text produced by degraded upstream stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub news_section: String,
    pub price_change_section: String,
    pub narrative: String,
}

/// Compose the combined analysis report.
///
/// Pure string composition with no failure mode: any inputs, including
/// upstream "unavailable" placeholders, produce a complete report.
pub fn synthesize(ticker: &Ticker, news_summary: &str, change_summary: &str) -> AnalysisReport {
    AnalysisReport {
        ticker: ticker.clone(),
        news_section: news_summary.to_string(),
        price_change_section: change_summary.to_string(),
        narrative: CORRELATION_NOTE.to_string(),
    }
}

impl Display for AnalysisReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Analysis for {}:\n{}\n\nPrice movement summary:\n{}\n\nAnalysis: {}",
            self.ticker, self.news_section, self.price_change_section, self.narrative
        )
    }
}
