//! Final report of a crawl run

use crate::state::{CrawlState, StopReason};
use crate::storage::SavedArticle;
use chrono::{DateTime, Local};
use std::time::Duration;

/// Everything known about a run once the driver has stopped
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Final counter values
    pub state: CrawlState,

    /// Why the run stopped
    pub stop_reason: StopReason,

    /// Saved articles in save order
    pub saved: Vec<SavedArticle>,

    /// URLs still waiting on the frontier when the run stopped
    pub frontier_remaining: usize,

    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Returns true unless the run ended on a fatal error
    pub fn is_success(&self) -> bool {
        self.stop_reason.is_success()
    }

    /// Fetched pages per second over the whole run
    pub fn fetch_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.state.fetched_count as f64 / secs
    }
}
