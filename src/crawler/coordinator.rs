//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl driver. One loop, one fetch in flight:
//! - Stop once the article cap is reached, on cancellation, or when the
//!   frontier runs dry
//! - Fetch the next URL, save it if it is an article
//! - Extract, classify and enqueue its links
//! - Sleep for the politeness delay, waking early on cancellation
//!
//! Fetch and parse failures are logged and skipped. Storage failures end
//! the run with `StopReason::FatalError`.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{FetchedPage, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::output::RunLog;
use crate::state::{CrawlPhase, CrawlReport, CrawlState, StopReason};
use crate::storage::{ArticleStore, SavedArticle};
use crate::url::{normalize_url, LinkClass, UrlClassifier};
use crate::{ConfigError, CrawlError};
use chrono::Local;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Sequential breadth-first crawl driver
pub struct Coordinator<F, S> {
    fetcher: F,
    store: S,
    classifier: UrlClassifier,
    frontier: Frontier,
    state: CrawlState,
    phase: CrawlPhase,
    max_articles: usize,
    delay: Duration,
    progress_interval: usize,
    run_log: Option<RunLog>,
    saved: Vec<SavedArticle>,
}

impl<F: Fetcher, S: ArticleStore> Coordinator<F, S> {
    /// Creates a coordinator with the seed URL already on the frontier
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration, validated here
    /// * `fetcher` - How pages are fetched
    /// * `store` - Where articles are saved
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError::Config)` - The configuration is unusable
    pub fn new(config: &Config, fetcher: F, store: S) -> Result<Self, CrawlError> {
        validate(config)?;

        let delay = Duration::try_from_secs_f64(config.crawler.delay_seconds).map_err(|e| {
            ConfigError::Validation(format!("delay_seconds is not a valid duration: {}", e))
        })?;

        let seed = normalize_url(&config.crawler.seed_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL: {}", e)))?;

        let mut coordinator = Self {
            fetcher,
            store,
            classifier: UrlClassifier::from_config(config),
            frontier: Frontier::new(),
            state: CrawlState::new(),
            phase: CrawlPhase::Running,
            max_articles: config.crawler.max_articles,
            delay,
            progress_interval: config.crawler.progress_interval,
            run_log: None,
            saved: Vec::new(),
        };

        if coordinator.frontier.enqueue(seed) {
            coordinator.state.record_enqueued();
        }

        Ok(coordinator)
    }

    /// Attaches a run log that receives saved/error lines and the footer
    pub fn with_run_log(mut self, run_log: RunLog) -> Self {
        self.run_log = Some(run_log);
        self
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn phase(&self) -> &CrawlPhase {
        &self.phase
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the crawl loop until a stop condition is met
    ///
    /// Cancellation is observed before each dequeue and during the
    /// politeness sleep. An in-flight fetch and save always complete first.
    pub async fn run(&mut self, cancel: &CancellationToken) -> CrawlReport {
        let started_at = Local::now();
        let start = Instant::now();

        tracing::info!(
            "Starting crawl: {} URL(s) queued, saving up to {} articles, {:?} between requests",
            self.frontier.len(),
            self.max_articles,
            self.delay
        );

        let mut stop_reason = loop {
            match self.step(cancel).await {
                Ok(None) => continue,
                Ok(Some(reason)) => break reason,
                Err(e) => {
                    tracing::error!("Fatal error, stopping crawl: {}", e);
                    break StopReason::FatalError(e.to_string());
                }
            }
        };
        self.phase = CrawlPhase::Stopped(stop_reason.clone());

        let mut report = CrawlReport {
            state: self.state,
            stop_reason: stop_reason.clone(),
            saved: self.saved.clone(),
            frontier_remaining: self.frontier.len(),
            started_at,
            finished_at: Local::now(),
            elapsed: start.elapsed(),
        };

        if let Some(log) = self.run_log.as_mut() {
            if let Err(e) = log.finish(&report) {
                tracing::error!("Failed to finish run log {}: {}", log.path().display(), e);
                if stop_reason.is_success() {
                    stop_reason = StopReason::FatalError(e.to_string());
                    report.stop_reason = stop_reason.clone();
                    self.phase = CrawlPhase::Stopped(stop_reason);
                }
            }
        }

        tracing::info!(
            "Crawl stopped ({}): {} visited, {} fetched, {} failed, {}/{} saved in {:.2?}",
            report.stop_reason,
            report.state.visited_count,
            report.state.fetched_count,
            report.state.failed_count,
            report.state.saved_count,
            self.max_articles,
            report.elapsed
        );

        report
    }

    /// One pass through the loop; `Some(reason)` means stop
    async fn step(&mut self, cancel: &CancellationToken) -> Result<Option<StopReason>, CrawlError> {
        if self.state.cap_reached(self.max_articles) {
            tracing::info!("Reached maximum number of articles ({})", self.max_articles);
            return Ok(Some(StopReason::CapReached));
        }

        if cancel.is_cancelled() {
            tracing::info!("Crawl interrupted");
            return Ok(Some(StopReason::Interrupted));
        }

        let Some(entry) = self.frontier.dequeue() else {
            tracing::info!("Frontier is empty, crawl complete");
            return Ok(Some(StopReason::FrontierExhausted));
        };

        self.state.record_fetch();
        tracing::debug!("Crawling [{}]: {}", entry.order, entry.url);

        match self.fetcher.fetch(&entry.url).await {
            Ok(page) => self.process_page(&entry.url, page)?,
            Err(e) => {
                self.state.record_failure();
                tracing::warn!("Request error crawling {}: {}", entry.url, e);
                if let Some(log) = self.run_log.as_mut() {
                    log.error(entry.url.as_str(), &e.to_string())?;
                }
            }
        }

        self.report_progress();

        // Nothing left to be polite for
        if self.state.cap_reached(self.max_articles) || self.frontier.is_empty() {
            return Ok(None);
        }

        if !self.delay.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(self.delay) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Politeness delay cut short by cancellation");
                }
            }
        }

        Ok(None)
    }

    /// Saves the page if it is an article, then enqueues its links
    fn process_page(&mut self, url: &Url, page: FetchedPage) -> Result<(), CrawlError> {
        if self.classifier.is_article(url) && !self.state.cap_reached(self.max_articles) {
            let saved = self.store.save(url, &page.body)?;
            self.state.record_saved();

            tracing::info!(
                "Saved article {}/{}: {} -> {}",
                self.state.saved_count,
                self.max_articles,
                url,
                saved.file_name()
            );

            if let Some(log) = self.run_log.as_mut() {
                log.saved(url.as_str())?;
            }
            self.saved.push(saved);
        }

        let links = match parse_html(&page.body, &page.final_url) {
            Ok(parsed) => {
                if let Some(title) = &parsed.title {
                    tracing::trace!("Parsed '{}' with {} links", title, parsed.links.len());
                }
                parsed.links
            }
            Err(e) => {
                tracing::warn!("Failed to parse HTML for {}: {}", url, e);
                if let Some(log) = self.run_log.as_mut() {
                    log.error(url.as_str(), &e.to_string())?;
                }
                Vec::new()
            }
        };

        self.enqueue_links(&links);
        Ok(())
    }

    /// Normalizes, classifies and enqueues discovered links in order
    fn enqueue_links(&mut self, links: &[String]) {
        let mut added = 0usize;

        for link in links {
            let normalized = match normalize_url(link) {
                Ok(url) => url,
                Err(e) => {
                    tracing::trace!("Skipping link {}: {}", link, e);
                    continue;
                }
            };

            let class = self.classifier.classify(&normalized);
            if !class.should_enqueue() {
                tracing::trace!("Out of scope: {}", normalized);
                continue;
            }

            if self.frontier.enqueue(normalized) {
                self.state.record_enqueued();
                added += 1;
                if class == LinkClass::ExcludedArticle {
                    tracing::trace!("Queued excluded page for traversal only: {}", link);
                }
            }
        }

        tracing::trace!("Queued {} new URLs from {} links", added, links.len());
    }

    fn report_progress(&self) {
        if self.state.fetched_count % self.progress_interval == 0 {
            tracing::info!(
                "Progress: {} fetched | Saved: {}/{} articles | Queue: {} URLs",
                self.state.fetched_count,
                self.state.saved_count,
                self.max_articles,
                self.frontier.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CrawlerConfig, FilterConfig, OutputConfig, ScopeConfig, UserAgentConfig,
    };
    use crate::crawler::FetchError;
    use crate::output::RunHeader;
    use crate::storage::{StorageError, StorageResult};
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const BASE: &str = "https://wiki.example";

    fn create_test_config(max_articles: usize) -> Config {
        Config {
            crawler: CrawlerConfig {
                seed_url: format!("{}/Main", BASE),
                max_articles,
                delay_seconds: 0.0,
                request_timeout_seconds: 30,
                progress_interval: 10,
            },
            scope: ScopeConfig {
                domain: "wiki.example".to_string(),
                path_prefix: "/".to_string(),
            },
            filter: FilterConfig {
                include_suffix: "(Civ5)".to_string(),
                exclude_suffix: Some("/Civilopedia".to_string()),
                exclude_contains: vec![],
                strip_suffixes: vec![],
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact: None,
            },
            output: OutputConfig {
                directory: "./unused".to_string(),
                mapping_file: "url_mapping.txt".to_string(),
                log_file: "crawl_log.txt".to_string(),
            },
        }
    }

    /// Serves an in-memory link graph; records fetch order
    struct GraphFetcher {
        pages: HashMap<String, Result<String, u16>>,
        fetched: Mutex<Vec<String>>,
        cancel_on: Option<(String, CancellationToken)>,
    }

    impl GraphFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::new(),
                fetched: Mutex::new(Vec::new()),
                cancel_on: None,
            }
        }

        /// Adds a page whose body links to `links` (paths under BASE)
        fn page(mut self, path: &str, links: &[&str]) -> Self {
            let anchors: String = links
                .iter()
                .map(|l| format!(r#"<a href="{}">{}</a>"#, l, l))
                .collect();
            self.pages.insert(
                format!("{}{}", BASE, path),
                Ok(format!("<html><body>{}</body></html>", anchors)),
            );
            self
        }

        fn failing(mut self, path: &str, status: u16) -> Self {
            self.pages.insert(format!("{}{}", BASE, path), Err(status));
            self
        }

        fn cancel_after(mut self, path: &str, token: CancellationToken) -> Self {
            self.cancel_on = Some((format!("{}{}", BASE, path), token));
            self
        }

        fn fetched_paths(&self) -> Vec<String> {
            self.fetched
                .lock()
                .unwrap()
                .iter()
                .map(|u| u.trim_start_matches(BASE).to_string())
                .collect()
        }
    }

    impl Fetcher for GraphFetcher {
        fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send {
            let key = url.to_string();
            self.fetched.lock().unwrap().push(key.clone());

            if let Some((path, token)) = &self.cancel_on {
                if *path == key {
                    token.cancel();
                }
            }

            let result = match self.pages.get(&key) {
                Some(Ok(body)) => Ok(FetchedPage {
                    final_url: url.clone(),
                    status_code: 200,
                    content_type: "text/html".to_string(),
                    body: body.clone(),
                }),
                Some(Err(status)) => Err(FetchError::Status {
                    url: key,
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: key,
                    status: 404,
                }),
            };

            async move { result }
        }
    }

    /// Keeps saved articles in memory; can be told to fail
    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<SavedArticle>,
        fail: bool,
    }

    impl ArticleStore for MemoryStore {
        fn save(&mut self, url: &Url, _body: &str) -> StorageResult<SavedArticle> {
            if self.fail {
                return Err(StorageError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk unavailable",
                )));
            }
            let record = SavedArticle {
                storage_key: format!("doc{}", self.saved.len()),
                url: url.to_string(),
            };
            self.saved.push(record.clone());
            Ok(record)
        }

        fn saved_count(&self) -> usize {
            self.saved.len()
        }
    }

    fn saved_paths(report: &CrawlReport) -> Vec<String> {
        report
            .saved
            .iter()
            .map(|s| s.url.trim_start_matches(BASE).to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_cap_scenario_with_exclusion() {
        let fetcher = GraphFetcher::new()
            .page(
                "/Main",
                &[
                    "/A_(Civ5)",
                    "/B_(Civ5)/Civilopedia",
                    "/C_(Civ5)",
                    "/D_(Civ5)",
                ],
            )
            .page("/A_(Civ5)", &[])
            .page("/B_(Civ5)/Civilopedia", &[])
            .page("/C_(Civ5)", &[])
            .page("/D_(Civ5)", &[]);

        let mut coordinator =
            Coordinator::new(&create_test_config(2), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(report.stop_reason, StopReason::CapReached);
        assert_eq!(saved_paths(&report), vec!["/A_(Civ5)", "/C_(Civ5)"]);
        assert_eq!(report.state.saved_count, 2);
        assert_eq!(
            coordinator.fetcher().fetched_paths(),
            vec!["/Main", "/A_(Civ5)", "/B_(Civ5)/Civilopedia", "/C_(Civ5)"]
        );
        assert_eq!(report.state.visited_count, 5);
        assert_eq!(report.frontier_remaining, 1);
    }

    #[tokio::test]
    async fn test_breadth_first_fetch_order() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/a", "/b"])
            .page("/a", &["/c", "/d"])
            .page("/b", &["/d", "/e", "/Main"])
            .page("/c", &["/f"])
            .page("/d", &["/a"])
            .page("/e", &[])
            .page("/f", &["/Main"]);

        let mut coordinator =
            Coordinator::new(&create_test_config(10), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
        assert_eq!(
            coordinator.fetcher().fetched_paths(),
            vec!["/Main", "/a", "/b", "/c", "/d", "/e", "/f"]
        );
        assert_eq!(report.state.visited_count, 7);
        assert_eq!(report.state.fetched_count, 7);
    }

    #[tokio::test]
    async fn test_url_discovered_twice_fetched_once() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/x", "/y", "/Shared_(Civ5)"])
            .page("/x", &["/Shared_(Civ5)", "/Shared_(Civ5)#Notes"])
            .page("/y", &["/Shared_(Civ5)", "/x"])
            .page("/Shared_(Civ5)", &["/Main"]);

        let mut coordinator =
            Coordinator::new(&create_test_config(10), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        let fetched = coordinator.fetcher().fetched_paths();
        assert_eq!(fetched, vec!["/Main", "/x", "/y", "/Shared_(Civ5)"]);
        assert_eq!(saved_paths(&report), vec!["/Shared_(Civ5)"]);
        assert_eq!(coordinator.store().saved_count(), 1);
    }

    #[tokio::test]
    async fn test_encoding_variants_take_one_cap_slot() {
        let fetcher = GraphFetcher::new()
            .page(
                "/Main",
                &[
                    "/Rome_(Civ5)",
                    "/Rome_(Civ5)/",
                    "/Rome_%28Civ5%29",
                    "/Other_(Civ5)",
                ],
            )
            .page("/Rome_(Civ5)", &[])
            .page("/Other_(Civ5)", &[]);

        let mut coordinator =
            Coordinator::new(&create_test_config(3), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(saved_paths(&report), vec!["/Rome_(Civ5)", "/Other_(Civ5)"]);
        assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
        assert_eq!(
            coordinator.fetcher().fetched_paths(),
            vec!["/Main", "/Rome_(Civ5)", "/Other_(Civ5)"]
        );
        assert_eq!(report.state.visited_count, 3);
    }

    #[tokio::test]
    async fn test_out_of_scope_never_enqueued() {
        let fetcher = GraphFetcher::new().page(
            "/Main",
            &[
                "https://other.example/Elsewhere_(Civ5)",
                "mailto:someone@wiki.example",
                "/Local_(Civ5)",
            ],
        );

        let mut coordinator =
            Coordinator::new(&create_test_config(10), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        let other = Url::parse("https://other.example/Elsewhere_(Civ5)").unwrap();
        assert!(!coordinator.frontier().contains(&other));
        assert_eq!(
            coordinator.fetcher().fetched_paths(),
            vec!["/Main", "/Local_(Civ5)"]
        );
        assert_eq!(report.state.visited_count, 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_skipped() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/X_(Civ5)", "/Y_(Civ5)"])
            .failing("/X_(Civ5)", 500)
            .page("/Y_(Civ5)", &[]);

        let mut coordinator =
            Coordinator::new(&create_test_config(10), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
        assert_eq!(saved_paths(&report), vec!["/Y_(Civ5)"]);
        assert_eq!(report.state.failed_count, 1);
        assert_eq!(report.state.visited_count, 3);

        // Not retried
        let fetched = coordinator.fetcher().fetched_paths();
        assert_eq!(fetched.iter().filter(|p| *p == "/X_(Civ5)").count(), 1);
    }

    #[tokio::test]
    async fn test_frontier_exhausted_below_cap() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/Only_(Civ5)"])
            .page("/Only_(Civ5)", &[]);

        let mut coordinator =
            Coordinator::new(&create_test_config(5), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
        assert!(report.state.saved_count < 5);
        assert_eq!(report.frontier_remaining, 0);
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_saved_count_never_exceeds_cap() {
        let links: Vec<String> = (0..20).map(|i| format!("/P{}_(Civ5)", i)).collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();

        let mut fetcher = GraphFetcher::new().page("/Main", &link_refs);
        for link in &links {
            fetcher = fetcher.page(link, &link_refs);
        }

        let mut coordinator =
            Coordinator::new(&create_test_config(3), fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(report.stop_reason, StopReason::CapReached);
        assert_eq!(report.state.saved_count, 3);
        assert_eq!(coordinator.store().saved_count(), 3);
    }

    #[tokio::test]
    async fn test_seed_saved_when_it_is_an_article() {
        let mut config = create_test_config(1);
        config.crawler.seed_url = format!("{}/Main_(Civ5)", BASE);

        let fetcher = GraphFetcher::new().page("/Main_(Civ5)", &["/Next_(Civ5)"]);
        let mut coordinator = Coordinator::new(&config, fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert_eq!(saved_paths(&report), vec!["/Main_(Civ5)"]);
        assert_eq!(report.stop_reason, StopReason::CapReached);
        assert_eq!(coordinator.fetcher().fetched_paths(), vec!["/Main_(Civ5)"]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let fetcher = GraphFetcher::new().page("/Main", &["/A_(Civ5)"]);
        let mut coordinator =
            Coordinator::new(&create_test_config(5), fetcher, MemoryStore::default()).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = coordinator.run(&cancel).await;

        assert_eq!(report.stop_reason, StopReason::Interrupted);
        assert_eq!(report.state.fetched_count, 0);
        assert!(coordinator.fetcher().fetched_paths().is_empty());
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_cancel_mid_run_completes_in_flight_save() {
        let cancel = CancellationToken::new();
        let fetcher = GraphFetcher::new()
            .page("/Start_(Civ5)", &["/A_(Civ5)", "/B_(Civ5)"])
            .page("/A_(Civ5)", &[])
            .page("/B_(Civ5)", &[])
            .cancel_after("/Start_(Civ5)", cancel.clone());

        let mut config = create_test_config(5);
        config.crawler.seed_url = format!("{}/Start_(Civ5)", BASE);
        // A long delay proves cancellation cuts the sleep short
        config.crawler.delay_seconds = 30.0;

        let mut coordinator = Coordinator::new(&config, fetcher, MemoryStore::default()).unwrap();
        let report = tokio::time::timeout(Duration::from_secs(10), coordinator.run(&cancel))
            .await
            .expect("crawl should stop without waiting out the delay");

        assert_eq!(report.stop_reason, StopReason::Interrupted);
        assert_eq!(saved_paths(&report), vec!["/Start_(Civ5)"]);
        assert_eq!(coordinator.fetcher().fetched_paths(), vec!["/Start_(Civ5)"]);
        assert_eq!(report.frontier_remaining, 2);
        assert!(matches!(coordinator.phase(), CrawlPhase::Stopped(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_fatal() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/A_(Civ5)", "/B_(Civ5)"])
            .page("/A_(Civ5)", &[])
            .page("/B_(Civ5)", &[]);
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };

        let mut coordinator = Coordinator::new(&create_test_config(5), fetcher, store).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        assert!(matches!(report.stop_reason, StopReason::FatalError(_)));
        assert!(!report.is_success());
        assert_eq!(report.state.saved_count, 0);
        assert_eq!(
            coordinator.fetcher().fetched_paths(),
            vec!["/Main", "/A_(Civ5)"]
        );
    }

    #[tokio::test]
    async fn test_politeness_delay_between_fetches() {
        let fetcher = GraphFetcher::new()
            .page("/Main", &["/a", "/b"])
            .page("/a", &[])
            .page("/b", &[]);

        let mut config = create_test_config(5);
        config.crawler.delay_seconds = 0.05;

        let mut coordinator = Coordinator::new(&config, fetcher, MemoryStore::default()).unwrap();
        let report = coordinator.run(&CancellationToken::new()).await;

        // Three fetches, two delays; none after the last page
        assert_eq!(report.state.fetched_count, 3);
        assert!(report.elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_crawling() {
        let config = create_test_config(0);
        let result = Coordinator::new(&config, GraphFetcher::new(), MemoryStore::default());
        assert!(matches!(result, Err(CrawlError::Config(_))));

        let mut config = create_test_config(1);
        config.crawler.seed_url = "https://other.example/Main".to_string();
        let result = Coordinator::new(&config, GraphFetcher::new(), MemoryStore::default());
        assert!(matches!(result, Err(CrawlError::Config(_))));
    }

    #[tokio::test]
    async fn test_run_log_records_saves_errors_and_footer() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("crawl_log.txt");
        let run_log = RunLog::create(
            &log_path,
            &RunHeader {
                seed_url: format!("{}/Main", BASE),
                max_articles: 5,
                config_hash: None,
            },
        )
        .unwrap();

        let fetcher = GraphFetcher::new()
            .page("/Main", &["/A_(Civ5)", "/Broken"])
            .page("/A_(Civ5)", &[])
            .failing("/Broken", 503);

        let mut coordinator = Coordinator::new(&create_test_config(5), fetcher, MemoryStore::default())
            .unwrap()
            .with_run_log(run_log);
        coordinator.run(&CancellationToken::new()).await;

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Saved: https://wiki.example/A_(Civ5)\n"));
        assert!(content.contains("Error: https://wiki.example/Broken - HTTP 503"));
        assert!(content.contains("Stop reason: frontier_exhausted\n"));
        assert!(content.contains("Saved articles: 1\n"));
    }
}
