//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The breadth-first frontier and its visited set
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing and link extraction
//! - The sequential crawl driver

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::{parse_html, ParseError, ParsedPage};

use crate::config::Config;
use crate::output::{RunHeader, RunLog};
use crate::state::CrawlReport;
use crate::storage::FsArticleStore;
use crate::CrawlError;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl with the real HTTP fetcher and file storage
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Create the output directory, mapping log and run log
/// 3. Drive the crawl until a stop condition is met
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `config_hash` - Recorded in the run log header when present
/// * `cancel` - Cancelled to request a graceful stop
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran; check `stop_reason` for how it ended
/// * `Err(CrawlError)` - The crawl could not be started
pub async fn run_crawl(
    config: &Config,
    config_hash: Option<String>,
    cancel: &CancellationToken,
) -> Result<CrawlReport, CrawlError> {
    let fetcher = HttpFetcher::from_config(config)?;
    let store = FsArticleStore::from_config(config)?;

    let log_path = Path::new(&config.output.directory).join(&config.output.log_file);
    let run_log = RunLog::create(
        &log_path,
        &RunHeader {
            seed_url: config.crawler.seed_url.clone(),
            max_articles: config.crawler.max_articles,
            config_hash,
        },
    )?;

    tracing::info!(
        "Writing articles to {} (run log: {})",
        store.directory().display(),
        log_path.display()
    );

    let mut coordinator = Coordinator::new(config, fetcher, store)?.with_run_log(run_log);
    Ok(coordinator.run(cancel).await)
}
