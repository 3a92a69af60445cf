//! Counters and stop states for a single crawl run
use std::fmt;

/// Why the crawl driver left the running state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured number of articles has been saved
    CapReached,

    /// Every reachable in-scope URL has been fetched
    FrontierExhausted,

    /// The operator requested a stop
    Interrupted,

    /// Storage failed and saves can no longer be logged durably
    FatalError(String),
}

impl StopReason {
    /// Returns true for every reason except `FatalError`
    ///
    /// An interruption is a graceful stop, not a failure.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::FatalError(_))
    }

    /// Short machine-friendly label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::CapReached => "cap_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::Interrupted => "interrupted",
            Self::FatalError(_) => "fatal_error",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FatalError(message) => write!(f, "{}: {}", self.label(), message),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// Driver state machine phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPhase {
    Running,
    Stopped(StopReason),
}

/// Run-scoped counters, owned by the coordinator
///
/// Every counter only ever grows. `saved_count` is the only value that
/// drives the article cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlState {
    /// Articles persisted so far
    pub saved_count: usize,

    /// URLs ever placed on the frontier (the visited set size)
    pub visited_count: usize,

    /// URLs dequeued and handed to the fetcher
    pub fetched_count: usize,

    /// Fetches that failed and were skipped
    pub failed_count: usize,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once `saved_count` has reached `max_articles`
    pub fn cap_reached(&self, max_articles: usize) -> bool {
        self.saved_count >= max_articles
    }

    pub fn record_enqueued(&mut self) {
        self.visited_count += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetched_count += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed_count += 1;
    }

    pub fn record_saved(&mut self) {
        self.saved_count += 1;
    }
}
