//! # News Clipper
//!
//! A scheduled batch job that clips fresh news-search results into Notion.
//! For each configured keyword it queries the Naver News Search API, strips
//! markup from titles and excerpts, normalizes publication dates, skips items
//! the keyword's destination database already recorded within the lookback
//! window, and inserts the remainder as one page per item.
//!
//! ## Usage
//!
//! ```sh
//! news_clipper --keywords-file ./keywords.yaml
//! ```
//!
//! Credentials come from `NAVER_CLIENT_ID`, `NAVER_CLIENT_SECRET`, and
//! `NOTION_TOKEN` (or the matching flags). The keywords file maps each
//! keyword to the Notion database receiving its clips.
//!
//! ## Architecture
//!
//! One sequential pipeline per keyword:
//! 1. **Fetch existing**: collect (title, link) keys recorded in the last two days
//! 2. **Search**: query the news API, dedup and cap the results
//! 3. **Filter and upload**: drop known keys, normalize, insert the rest
//!
//! Run-phase failures are logged and absorbed; the process exits zero unless
//! startup configuration is unusable.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod models;
mod naver;
mod normalize;
mod notion;
mod pipeline;
mod utils;

use cli::Cli;
use config::Config;
use naver::NaverClient;
use notion::NotionClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_clipper starting up");

    let args = Cli::parse();
    debug!(
        keywords_file = %args.keywords_file,
        max_results = args.max_results,
        lookback_days = args.lookback_days,
        "Parsed CLI arguments"
    );

    // Configuration problems are the one thing allowed to fail the process:
    // an unconfigured run exiting zero would go unnoticed by its scheduler.
    let config = Config::from_cli(args)?;

    let source = NaverClient::new(
        config.naver_client_id.clone(),
        config.naver_client_secret.clone(),
        config.max_results,
    );
    let store = NotionClient::new(config.notion_token.clone());

    let today = Local::now().date_naive();
    let summary = pipeline::run(&source, &store, &config, today).await;

    let elapsed = start_time.elapsed();
    if summary.all_failed() {
        error!(
            keywords = summary.keywords,
            keywords_failed = summary.keywords_failed,
            secs = elapsed.as_secs(),
            "Run finished without reaching any keyword"
        );
    } else {
        info!(
            keywords = summary.keywords,
            keywords_failed = summary.keywords_failed,
            found = summary.found,
            uploaded = summary.uploaded,
            duplicates = summary.duplicates,
            failed = summary.failed,
            secs = elapsed.as_secs(),
            millis = elapsed.subsec_millis(),
            "Run complete"
        );
    }

    Ok(())
}
