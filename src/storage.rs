//! On-disk layout: word list, review state, log file, progress exports.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{ImportError, PersistenceError};
use crate::models::{ReviewStateMap, WordEntry};
use crate::store::JsonFileBackend;
use crate::vocabulary;

const VOCABULARY_FILE: &str = "vocabulary.json";
const PROGRESS_FILE: &str = "progress.json";
const LOG_FILE: &str = "vocab.log";

/// Handles everything the app keeps under its data directory.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: PathBuf) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&root).map_err(|source| PersistenceError::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-srs")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.root.join(VOCABULARY_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.root.join(PROGRESS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Backend for the review state store.
    pub fn progress_backend(&self) -> JsonFileBackend {
        JsonFileBackend::new(self.progress_path())
    }

    /// The saved word list, or the bundled sample if there is none yet or it
    /// cannot be read.
    pub fn load_vocabulary(&self) -> Vec<WordEntry> {
        let path = self.vocabulary_path();
        if !path.exists() {
            return vocabulary::sample();
        }

        match read_vocabulary(&path) {
            Ok(entries) => {
                info!(words = entries.len(), "loaded vocabulary");
                entries
            }
            Err(e) => {
                warn!(error = %e, "saved vocabulary unreadable, using bundled sample");
                vocabulary::sample()
            }
        }
    }

    pub fn save_vocabulary(&self, entries: &[WordEntry]) -> Result<PathBuf, PersistenceError> {
        let path = self.vocabulary_path();
        write_json(&path, entries)?;
        Ok(path)
    }

    /// Normalize a word list file and make it the current vocabulary.
    ///
    /// Nothing is written unless the whole file imports cleanly.
    pub fn import_vocabulary(&self, source: &Path) -> anyhow::Result<Vec<WordEntry>> {
        let entries = read_vocabulary(source)?;
        self.save_vocabulary(&entries)?;
        info!(words = entries.len(), source = %source.display(), "imported vocabulary");
        Ok(entries)
    }

    /// Suggested export location; the date lives in the filename only.
    pub fn default_export_path(today: NaiveDate) -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(export_file_name(today))
    }
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("progress_{}.json", today.format("%Y-%m-%d"))
}

/// Write a progress snapshot.
pub fn export_progress(states: &ReviewStateMap, path: &Path) -> Result<usize, PersistenceError> {
    write_json(path, states)?;
    info!(words = states.len(), path = %path.display(), "exported progress");
    Ok(states.len())
}

/// Read a progress snapshot written by [`export_progress`].
pub fn import_progress(path: &Path) -> Result<ReviewStateMap, ImportError> {
    let json = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_progress(&json)
}

pub fn parse_progress(json: &str) -> Result<ReviewStateMap, ImportError> {
    serde_json::from_str(json).map_err(ImportError::MalformedProgress)
}

fn read_vocabulary(path: &Path) -> Result<Vec<WordEntry>, ImportError> {
    let json = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    vocabulary::parse(&json)
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(value).map_err(PersistenceError::Encode)?;
    fs::write(path, json).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
