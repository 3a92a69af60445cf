//! Append-only mapping log of `storage_key<TAB>url` lines

use crate::storage::{SavedArticle, StorageError, StorageResult};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Writer for the run's mapping log
///
/// Each record is formatted into one buffer and written with a single
/// `write_all`, then synced, so a crash never leaves half a line behind.
#[derive(Debug)]
pub struct MappingLog {
    path: PathBuf,
    file: File,
}

impl MappingLog {
    /// Creates (or truncates) the mapping log at `path`
    pub fn create(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record and syncs it to disk
    pub fn append(&mut self, record: &SavedArticle) -> StorageResult<()> {
        for field in [&record.storage_key, &record.url] {
            if field.contains(['\t', '\n', '\r']) {
                return Err(StorageError::InvalidKey(format!(
                    "mapping field contains a separator: {:?}",
                    field
                )));
            }
        }

        let line = format!("{}\t{}\n", record.storage_key, record.url);
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }
}

/// Reads every record from a mapping log
///
/// Blank lines are skipped. A line without a tab separator is reported as
/// `MalformedMapping` with its 1-based line number.
pub fn read_mapping(path: &Path) -> StorageResult<Vec<SavedArticle>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.split_once('\t') {
            Some((key, url)) if !key.is_empty() && !url.is_empty() => {
                records.push(SavedArticle {
                    storage_key: key.to_string(),
                    url: url.to_string(),
                });
            }
            _ => {
                return Err(StorageError::MalformedMapping {
                    line: index + 1,
                    content: line,
                })
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(key: &str, url: &str) -> SavedArticle {
        SavedArticle {
            storage_key: key.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("url_mapping.txt");

        let mut log = MappingLog::create(&path).unwrap();
        log.append(&record("Rome", "https://wiki.example/wiki/Rome_(Civ5)"))
            .unwrap();
        log.append(&record("Babylon", "https://wiki.example/wiki/Babylon_(Civ5)"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Rome\thttps://wiki.example/wiki/Rome_(Civ5)\n\
             Babylon\thttps://wiki.example/wiki/Babylon_(Civ5)\n"
        );

        let records = read_mapping(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].storage_key, "Babylon");
    }

    #[test]
    fn test_create_truncates_previous_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("url_mapping.txt");
        std::fs::write(&path, "Old\thttps://wiki.example/old\n").unwrap();

        MappingLog::create(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_rejects_separator_in_fields() {
        let dir = TempDir::new().unwrap();
        let mut log = MappingLog::create(&dir.path().join("m.txt")).unwrap();

        let result = log.append(&record("bad\tkey", "https://wiki.example/"));
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "");
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.txt");
        std::fs::write(&path, "A\thttps://wiki.example/A\n\nB\thttps://wiki.example/B\n").unwrap();

        assert_eq!(read_mapping(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_read_reports_malformed_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.txt");
        std::fs::write(&path, "A\thttps://wiki.example/A\nbroken line\n").unwrap();

        let result = read_mapping(&path);
        assert!(matches!(
            result,
            Err(StorageError::MalformedMapping { line: 2, .. })
        ));
    }
}
