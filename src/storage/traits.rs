//! Storage traits and error types
//!
//! This module defines the trait interface for article storage backends and
//! associated error types.

use thiserror::Error;
use url::Url;

/// Errors that can occur during storage operations
///
/// Any of these ends the crawl: a save that cannot be logged durably breaks
/// the guarantee that the mapping log lists every saved document.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Malformed mapping line {line}: {content}")]
    MalformedMapping { line: usize, content: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One persisted document and the key it was stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArticle {
    /// Filesystem-safe identifier of the stored document
    pub storage_key: String,

    /// Absolute URL the document was fetched from
    pub url: String,
}

impl SavedArticle {
    /// File name of the stored HTML document
    pub fn file_name(&self) -> String {
        format!("{}.html", self.storage_key)
    }
}

/// Trait for article storage implementations
///
/// A successful `save` means the document is written and its mapping record
/// has been appended. Records are never rewritten or removed.
pub trait ArticleStore {
    /// Persists one fetched article
    ///
    /// # Arguments
    ///
    /// * `url` - The URL the article was fetched from
    /// * `body` - Raw HTML body
    ///
    /// # Returns
    ///
    /// The record appended to the mapping log
    fn save(&mut self, url: &Url, body: &str) -> StorageResult<SavedArticle>;

    /// Number of articles saved through this store
    fn saved_count(&self) -> usize;
}
