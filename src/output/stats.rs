//! Summaries of a finished crawl and of a previous run's mapping log
//!
//! This module prints the end-of-run report and backs the `--stats` and
//! `--list` modes, which read the mapping log of an earlier run.

use crate::config::Config;
use crate::state::CrawlReport;
use crate::storage::{read_mapping, SavedArticle, StorageResult};
use std::path::{Path, PathBuf};

/// What the mapping log of a previous run says about the output directory
#[derive(Debug, Clone)]
pub struct SavedStatistics {
    /// The mapping log that was read
    pub mapping_path: PathBuf,

    /// Records in the mapping log
    pub total_articles: usize,

    /// Records whose HTML file is no longer on disk
    pub missing_files: usize,

    /// Combined size of the HTML files that exist
    pub total_bytes: u64,
}

/// Loads the mapping log named by the `[output]` section
pub fn load_saved_articles(config: &Config) -> StorageResult<Vec<SavedArticle>> {
    read_mapping(&mapping_path(config))
}

/// Location of the mapping log inside the output directory
pub fn mapping_path(config: &Config) -> PathBuf {
    Path::new(&config.output.directory).join(&config.output.mapping_file)
}

/// Cross-checks mapping records against the files in `directory`
///
/// # Arguments
///
/// * `directory` - The output directory holding `<key>.html` files
/// * `mapping_path` - The mapping log the records came from
/// * `records` - Records read from the mapping log
pub fn load_statistics(
    directory: &Path,
    mapping_path: &Path,
    records: &[SavedArticle],
) -> SavedStatistics {
    let mut missing_files = 0;
    let mut total_bytes = 0;

    for record in records {
        match std::fs::metadata(directory.join(record.file_name())) {
            Ok(meta) => total_bytes += meta.len(),
            Err(_) => missing_files += 1,
        }
    }

    SavedStatistics {
        mapping_path: mapping_path.to_path_buf(),
        total_articles: records.len(),
        missing_files,
        total_bytes,
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &SavedStatistics) {
    println!("=== Saved Articles ===\n");
    println!("Mapping log: {}", stats.mapping_path.display());
    println!("  Articles saved: {}", stats.total_articles);
    println!("  Total size: {:.1} KiB", stats.total_bytes as f64 / 1024.0);

    if stats.missing_files > 0 {
        println!("  Missing files: {}", stats.missing_files);
    }
}

/// Formats the first `limit` records, then a count of the rest
pub fn format_listing(records: &[SavedArticle], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = records
        .iter()
        .take(limit)
        .map(|r| format!("{} -> {}", r.file_name(), r.url))
        .collect();

    if records.len() > limit {
        lines.push(format!("... and {} more", records.len() - limit));
    }
    lines
}

/// Prints the end-of-run summary
pub fn print_report(report: &CrawlReport, max_articles: usize) {
    println!("\n=== Crawl Summary ===\n");
    println!("Stop reason: {}", report.stop_reason);
    println!(
        "Started: {} | Finished: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        report.finished_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "Duration: {:.2} seconds ({:.2} pages/s)",
        report.elapsed.as_secs_f64(),
        report.fetch_rate()
    );
    println!("Visited URLs: {}", report.state.visited_count);
    println!("Fetched URLs: {}", report.state.fetched_count);
    println!("Failed fetches: {}", report.state.failed_count);
    println!(
        "Saved articles: {}/{}",
        report.state.saved_count, max_articles
    );

    if report.frontier_remaining > 0 {
        println!("Still queued: {}", report.frontier_remaining);
    }
}
