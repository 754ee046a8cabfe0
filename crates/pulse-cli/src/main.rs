//! Stock query CLI
//!
//! Single request/response cycle: resolve a ticker from the query, fetch
//! news and price data, print the combined analysis report.
//!
//! # Usage
//!
//! ```bash
//! # Set up credentials (a .env file works too)
//! export NEWS_API_KEY="..."
//! export ALPHA_VANTAGE_API_KEY="..."
//!
//! cargo run -p pulse-cli -- "why did tesla move this week?"
//! ```

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use pulse_core::{Pipeline, PulseConfig, PulseError};

/// Answer a natural-language stock question with news and price movement.
#[derive(Debug, Parser)]
#[command(name = "pulse", version, about)]
struct Args {
    /// The stock question, e.g. "why did tesla move this week?"
    query: String,

    /// Trailing window for the price change, in trading days
    #[arg(long, default_value_t = 7)]
    window_days: usize,

    /// Maximum number of headlines to include
    #[arg(long, default_value_t = 5)]
    headlines: usize,

    /// Per-fetch deadline in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Credentials may come from a .env file; absence is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "warn,pulse_core=info".to_string()))
        .init();

    let args = Args::parse();

    let config = PulseConfig::builder()
        .window_days(args.window_days)
        .headline_limit(args.headlines)
        .request_timeout(Duration::from_secs(args.timeout_secs))
        .with_env_api_keys()
        .build()
        .context("invalid configuration")?;

    let pipeline = Pipeline::from_config(config)
        .context("set NEWS_API_KEY and ALPHA_VANTAGE_API_KEY (environment or .env)")?;

    match pipeline.run(&args.query).await {
        Ok(report) => {
            println!("Identified ticker: {}", report.ticker);
            println!();
            println!("{report}");
            Ok(ExitCode::SUCCESS)
        }
        Err(PulseError::TickerNotFound) => {
            eprintln!("Could not identify a stock ticker in your query.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).context("stock query failed"),
    }
}
