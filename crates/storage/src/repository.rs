use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use exam_core::model::RecordSet;

use crate::json::JsonStatsStore;

/// Errors surfaced by storage adapters.
///
/// Only *writes* can fail: loading follows the fail-soft policy and always
/// produces a record set (see `StatsRepository::load`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store lock poisoned: {0}")]
    Lock(String),
}

/// Repository contract for the statistics store.
///
/// The store is a single keyed document: every read is a full load and every
/// mutation is persisted by rewriting the whole document. There is no
/// incremental format and no locking; a single interactive user is assumed.
pub trait StatsRepository: Send + Sync {
    /// Loads the full record set.
    ///
    /// Missing or unparseable backing data yields an empty set. Corruption
    /// is deliberately swallowed (with a log) instead of surfaced, so a
    /// damaged file never takes the UI down.
    fn load(&self) -> RecordSet;

    /// Persists the full record set, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be serialized or written.
    fn save(&self, records: &RecordSet) -> Result<(), StorageError>;
}

/// In-memory store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStats {
    records: Arc<Mutex<RecordSet>>,
}

impl InMemoryStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsRepository for InMemoryStats {
    fn load(&self) -> RecordSet {
        self.records
            .lock()
            .map_or_else(|_| RecordSet::new(), |guard| guard.clone())
    }

    fn save(&self, records: &RecordSet) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        *guard = records.clone();
        Ok(())
    }
}

/// Aggregates the statistics repository behind a trait object for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            stats: Arc::new(InMemoryStats::new()),
        }
    }

    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            stats: Arc::new(JsonStatsStore::open(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::QuestionRecord;

    #[test]
    fn in_memory_round_trip() {
        let repo = InMemoryStats::new();
        assert!(repo.load().is_empty());

        let mut set = RecordSet::new();
        set.insert(QuestionRecord::new("Q1", "General", None));
        repo.save(&set).unwrap();

        let loaded = repo.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains("Q1"));
    }

    #[test]
    fn save_replaces_the_whole_set() {
        let repo = InMemoryStats::new();

        let mut first = RecordSet::new();
        first.insert(QuestionRecord::new("Q1", "General", None));
        repo.save(&first).unwrap();

        let mut second = RecordSet::new();
        second.insert(QuestionRecord::new("Q2", "General", None));
        repo.save(&second).unwrap();

        let loaded = repo.load();
        assert_eq!(loaded.len(), 1);
        assert!(!loaded.contains("Q1"));
        assert!(loaded.contains("Q2"));
    }
}
