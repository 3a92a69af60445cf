//! Post-crawl content extraction
//!
//! Reads the saved articles listed in the mapping log and writes, per
//! article, `<key>.json` with the title and text blocks and `<key>.html` as a
//! minimal readable page. Both go to the `extracted/` directory inside the
//! output directory.

mod content;
mod minimal;

pub use content::{extract_article, BlockKind, ContentBlock, ExtractedArticle, UNKNOWN_TITLE};
pub use minimal::render_minimal_html;

use crate::storage::SavedArticle;
use crate::CrawlError;
use std::path::{Path, PathBuf};

/// Directory name, inside the output directory, receiving extracted files
pub const EXTRACT_DIR: &str = "extracted";

/// Outcome of an extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Articles extracted
    pub processed: usize,

    /// Articles whose saved HTML could not be read
    pub skipped: usize,

    /// Combined size of the HTML that was read
    pub html_bytes: u64,

    /// Combined size of the JSON written
    pub json_bytes: u64,
}

impl ExtractSummary {
    /// How much smaller the JSON is than the source HTML, in percent
    pub fn size_reduction(&self) -> f64 {
        if self.html_bytes == 0 {
            return 0.0;
        }
        (self.html_bytes as f64 - self.json_bytes as f64) / self.html_bytes as f64 * 100.0
    }
}

/// Extracts every article in `records` from `directory`
///
/// A missing or unreadable article file is logged and skipped. Failing to
/// write output is an error.
///
/// # Returns
///
/// * `Ok((PathBuf, ExtractSummary))` - Where the files went and what was done
/// * `Err(CrawlError)` - Output could not be written
pub fn extract_saved_articles(
    directory: &Path,
    records: &[SavedArticle],
) -> Result<(PathBuf, ExtractSummary), CrawlError> {
    let out_dir = directory.join(EXTRACT_DIR);
    std::fs::create_dir_all(&out_dir)?;

    let mut summary = ExtractSummary::default();

    for (i, record) in records.iter().enumerate() {
        if i % 10 == 0 {
            tracing::info!(
                "Extracting {}/{}: {}",
                i + 1,
                records.len(),
                record.file_name()
            );
        }

        let source = directory.join(record.file_name());
        let html = match std::fs::read_to_string(&source) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", source.display(), e);
                summary.skipped += 1;
                continue;
            }
        };

        let article = extract_article(&html, &record.url);
        if article.content.is_empty() {
            tracing::debug!("No article body found in {}", source.display());
        }

        let json = serde_json::to_string_pretty(&article)?;
        std::fs::write(out_dir.join(format!("{}.json", record.storage_key)), &json)?;
        std::fs::write(out_dir.join(record.file_name()), render_minimal_html(&article))?;

        summary.processed += 1;
        summary.html_bytes += html.len() as u64;
        summary.json_bytes += json.len() as u64;
    }

    tracing::info!(
        "Extracted {} articles ({} skipped) into {}",
        summary.processed,
        summary.skipped,
        out_dir.display()
    );

    Ok((out_dir, summary))
}
