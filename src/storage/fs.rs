//! Filesystem-backed article store
//!
//! Articles are written as `<directory>/<key>.html`; every save is followed
//! by one line in the mapping log.

use crate::config::Config;
use crate::storage::key::{derive_key, unique_key};
use crate::storage::{ArticleStore, MappingLog, SavedArticle, StorageResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

/// Stores articles as HTML files in one output directory
#[derive(Debug)]
pub struct FsArticleStore {
    directory: PathBuf,
    strip_suffixes: Vec<String>,
    mapping: MappingLog,
    used_keys: HashSet<String>,
    saved: usize,
}

/// Keys that would clash with files the crate writes itself
const RESERVED_KEYS: [&str; 1] = ["index"];

impl FsArticleStore {
    /// Creates the output directory if needed and starts a fresh mapping log
    ///
    /// # Arguments
    ///
    /// * `directory` - Where article files are written
    /// * `mapping_file` - File name of the mapping log inside `directory`
    /// * `strip_suffixes` - Suffixes removed from the last path segment
    pub fn create(
        directory: &Path,
        mapping_file: &str,
        strip_suffixes: Vec<String>,
    ) -> StorageResult<Self> {
        std::fs::create_dir_all(directory)?;
        let mapping = MappingLog::create(&directory.join(mapping_file))?;

        tracing::debug!(
            "Article store ready at {} (mapping log: {})",
            directory.display(),
            mapping.path().display()
        );

        Ok(Self {
            directory: directory.to_path_buf(),
            strip_suffixes,
            mapping,
            used_keys: RESERVED_KEYS.iter().map(|k| k.to_string()).collect(),
            saved: 0,
        })
    }

    /// Builds the store described by the `[output]` and `[filter]` sections
    ///
    /// When no `strip-suffixes` are configured, `_` + the inclusion suffix
    /// is stripped, so `Rome_(Civ5)` is stored as `Rome.html`.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let strip = if config.filter.strip_suffixes.is_empty() {
            vec![format!("_{}", config.filter.include_suffix)]
        } else {
            config.filter.strip_suffixes.clone()
        };

        Self::create(
            Path::new(&config.output.directory),
            &config.output.mapping_file,
            strip,
        )
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn mapping_path(&self) -> &Path {
        self.mapping.path()
    }
}

impl ArticleStore for FsArticleStore {
    fn save(&mut self, url: &Url, body: &str) -> StorageResult<SavedArticle> {
        let key = unique_key(derive_key(url, &self.strip_suffixes), &self.used_keys);
        let record = SavedArticle {
            storage_key: key,
            url: url.to_string(),
        };

        // Document first, so the mapping log never points at a missing file
        std::fs::write(self.directory.join(record.file_name()), body)?;
        self.mapping.append(&record)?;
        self.used_keys.insert(record.storage_key.clone());
        self.saved += 1;

        Ok(record)
    }

    fn saved_count(&self) -> usize {
        self.saved
    }
}
