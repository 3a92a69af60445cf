//! Human-readable run log written next to the saved articles
//!
//! The file is truncated when a run starts. It holds a header, one line per
//! saved article or recovered error, and a footer with the final counts.

use crate::state::CrawlReport;
use crate::storage::StorageResult;
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// What the header of a run log records
#[derive(Debug, Clone)]
pub struct RunHeader {
    pub seed_url: String,
    pub max_articles: usize,
    pub config_hash: Option<String>,
}

/// Append-only text log for one crawl run
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// Truncates `path` and writes the run header
    pub fn create(path: &Path, header: &RunHeader) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut log = Self {
            path: path.to_path_buf(),
            file,
        };

        let mut text = format!(
            "Crawl started at: {}\nStarting URL: {}\nMax articles: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            header.seed_url,
            header.max_articles
        );
        if let Some(hash) = &header.config_hash {
            text.push_str(&format!("Config hash: {}\n", hash));
        }
        text.push('\n');
        log.write(&text)?;

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn saved(&mut self, url: &str) -> StorageResult<()> {
        self.write(&format!("Saved: {}\n", url))
    }

    pub fn error(&mut self, url: &str, reason: &str) -> StorageResult<()> {
        // Reasons may carry newlines from upstream error chains
        let reason = reason.replace(['\n', '\r'], " ");
        self.write(&format!("Error: {} - {}\n", url, reason))
    }

    /// Writes the footer summarising the finished run
    pub fn finish(&mut self, report: &CrawlReport) -> StorageResult<()> {
        let text = format!(
            "\nCrawl completed at: {}\nDuration: {:.2} seconds\nStop reason: {}\n\
             Visited URLs: {}\nFetched URLs: {}\nFailed fetches: {}\nSaved articles: {}\n",
            report.finished_at.format("%Y-%m-%d %H:%M:%S%.3f"),
            report.elapsed.as_secs_f64(),
            report.stop_reason,
            report.state.visited_count,
            report.state.fetched_count,
            report.state.failed_count,
            report.state.saved_count,
        );
        self.write(&text)
    }

    fn write(&mut self, text: &str) -> StorageResult<()> {
        self.file.write_all(text.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
