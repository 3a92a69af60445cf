//! Output module for run logs, summaries and the article index
//!
//! This module handles:
//! - The plain-text run log written during a crawl
//! - Printing the end-of-run summary and mapping-log statistics
//! - Building a browsable `index.html` over saved articles

mod index;
mod run_log;
pub mod stats;

pub use index::{article_title, build_index, render_index};
pub use run_log::{RunHeader, RunLog};
pub use stats::{
    format_listing, load_saved_articles, load_statistics, mapping_path, print_report,
    print_statistics, SavedStatistics,
};
