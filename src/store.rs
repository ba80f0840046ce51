//! Review state store with a swappable persistence backend.
//!
//! The store never mutates its map in place: callers build the next snapshot
//! and hand it to [`ReviewStateStore::update`], which swaps it in and persists
//! it in full.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::PersistenceError;
use crate::models::{ReviewState, ReviewStateMap, WordEntry};

/// Where review state lives between sessions.
pub trait ProgressBackend {
    fn load(&self) -> Result<ReviewStateMap, PersistenceError>;
    fn save(&self, states: &ReviewStateMap) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file holding the whole map.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProgressBackend for JsonFileBackend {
    fn load(&self) -> Result<ReviewStateMap, PersistenceError> {
        if !self.path.exists() {
            return Ok(ReviewStateMap::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| PersistenceError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, states: &ReviewStateMap) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(states).map_err(PersistenceError::Encode)?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory review state plus the backend it is mirrored to.
pub struct ReviewStateStore {
    states: ReviewStateMap,
    backend: Box<dyn ProgressBackend>,
}

impl ReviewStateStore {
    /// Load from the backend. An unreadable backend starts cold with an empty map.
    pub fn open(backend: Box<dyn ProgressBackend>) -> Self {
        let states = match backend.load() {
            Ok(states) => {
                info!(words = states.len(), "loaded review state");
                states
            }
            Err(e) => {
                warn!(error = %e, "could not load review state, starting empty");
                ReviewStateMap::new()
            }
        };
        Self { states, backend }
    }

    pub fn states(&self) -> &ReviewStateMap {
        &self.states
    }

    pub fn get(&self, identity: &str) -> Option<&ReviewState> {
        self.states.get(identity)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Swap in a new snapshot and persist it.
    ///
    /// The snapshot stays in memory even if the write fails; the error is
    /// returned so the caller can report it.
    pub fn update(&mut self, next: ReviewStateMap) -> Result<(), PersistenceError> {
        self.states = next;
        let result = self.backend.save(&self.states);
        match &result {
            Ok(()) => debug!(words = self.states.len(), "persisted review state"),
            Err(e) => warn!(error = %e, "failed to persist review state"),
        }
        result
    }

    /// Replace one word's state.
    pub fn record(&mut self, identity: String, state: ReviewState) -> Result<(), PersistenceError> {
        let mut next = self.states.clone();
        next.insert(identity, state);
        self.update(next)
    }

    /// Give every entry without state a fresh one due `today`.
    /// Returns how many states were created.
    pub fn seed(&mut self, entries: &[WordEntry], today: NaiveDate) -> Result<usize, PersistenceError> {
        let mut next = self.states.clone();
        let mut created = 0;
        for entry in entries {
            next.entry(entry.identity()).or_insert_with(|| {
                created += 1;
                ReviewState::new(today)
            });
        }

        if created > 0 {
            self.update(next)?;
        }
        Ok(created)
    }

    /// Replace everything, as when importing a progress file.
    pub fn replace(&mut self, states: ReviewStateMap) -> Result<(), PersistenceError> {
        info!(words = states.len(), "replacing review state");
        self.update(states)
    }

    /// Forget all progress.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        info!("resetting review state");
        self.update(ReviewStateMap::new())
    }
}
