//! High-score persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Where the best score survives between sessions.
pub trait HighScoreStore {
    /// The stored high score, or 0 when nothing has been stored yet.
    fn load(&self) -> Result<u64, StoreError>;

    /// Replace the stored high score.
    fn save(&mut self, value: u64) -> Result<(), StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    high_score: u64,
}

/// Keeps the high score in a small JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Format {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u64, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        let record: ScoreRecord = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => return Err(self.format_error(e)),
        };
        Ok(record.high_score)
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let record = ScoreRecord { high_score: value };
        let text = serde_json::to_string(&record).map_err(|e| self.format_error(e))?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

/// Keeps the high score in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    high_score: u64,
    saves: usize,
}

impl MemoryStore {
    pub fn with_high_score(high_score: u64) -> Self {
        MemoryStore { high_score, saves: 0 }
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        self.high_score = value;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("score.json"));
        store.save(4096).unwrap();
        assert_eq!(store.load().unwrap(), 4096);

        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.load().unwrap(), 4096);
    }

    #[test]
    fn test_malformed_file_is_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("score.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Format { .. }));
        assert!(err.to_string().contains("score.json"));
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryStore::with_high_score(10);
        assert_eq!(store.load().unwrap(), 10);
        store.save(20).unwrap();
        assert_eq!(store.load().unwrap(), 20);
        assert_eq!(store.saves(), 1);
    }
}
