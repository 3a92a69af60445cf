//! Storage module for persisting saved articles
//!
//! This module handles everything written for saved articles:
//! - The `ArticleStore` trait the crawl driver saves through
//! - A filesystem store writing one HTML file per article
//! - The append-only mapping log pairing storage keys with URLs
//! - Storage key derivation from article URLs

mod fs;
mod key;
mod mapping;
mod traits;

pub use fs::FsArticleStore;
pub use key::{derive_key, unique_key};
pub use mapping::{read_mapping, MappingLog};
pub use traits::{ArticleStore, SavedArticle, StorageError, StorageResult};
