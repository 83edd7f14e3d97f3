use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use exam_core::model::RecordSet;

use crate::repository::{StatsRepository, StorageError};

use super::document::StatsDocument;

/// File-backed statistics store.
///
/// Load-modify-save-whole-file: the document is serialized in full and
/// written in a single call, so no partial mapping is ever persisted. A
/// crash mid-write loses only the in-flight update.
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    /// Points the store at a file. Nothing is touched until the first
    /// load or save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsRepository for JsonStatsStore {
    fn load(&self) -> RecordSet {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), %err, "stats file unreadable, starting empty");
                }
                return RecordSet::new();
            }
        };

        let document: StatsDocument = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "stats file corrupt, resetting to empty");
                return RecordSet::new();
            }
        };

        match document.into_set() {
            Ok(set) => set,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "stats file inconsistent, resetting to empty");
                RecordSet::new()
            }
        }
    }

    fn save(&self, records: &RecordSet) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&StatsDocument::from_set(records))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "stats saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{AttemptEvent, QuestionRecord, SessionId};
    use exam_core::time::fixed_now;

    fn store_in(dir: &tempfile::TempDir) -> JsonStatsStore {
        JsonStatsStore::open(dir.path().join("stats.json"))
    }

    fn sample_set() -> RecordSet {
        let mut set = RecordSet::new();
        let mut record = QuestionRecord::new("What is 2+2?", "Math", None);
        record.log_attempt(
            AttemptEvent::new(fixed_now(), true, 3.456, SessionId::new("20240101000000"), None)
                .unwrap(),
        );
        set.insert(record);
        set.insert(QuestionRecord::new("Name the capital", "Geography", None));
        set
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let set = sample_set();
        store.save(&set).unwrap();
        assert_eq!(store.load(), set);
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn inconsistent_record_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        // failures > attempts: shaped like the wire format but invalid.
        fs::write(
            store.path(),
            r#"{"Q": {"intentos": 1, "fallos": 5, "categoria": "General", "tiempos": [1.0], "historial": [{"fecha": "2024-01-01 00:00:00", "correcta": false, "tiempo": 1.0, "sesion_id": "20240101000000", "archivo": null}]}}"#,
        )
        .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStatsStore::open(dir.path().join("nested/deeper/stats.json"));
        store.save(&sample_set()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn wire_format_uses_legacy_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&sample_set()).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        for field in ["intentos", "fallos", "categoria", "tiempos", "historial", "sesion_id"] {
            assert!(raw.contains(field), "missing wire field {field}");
        }
    }
}
