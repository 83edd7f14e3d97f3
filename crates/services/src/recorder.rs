use std::sync::Arc;

use chrono::{DateTime, Utc};

use exam_core::Clock;
use exam_core::model::{AttemptEvent, QuestionRecord, SessionId, category_from_file};
use storage::StatsRepository;

use crate::error::RecorderError;

/// One answered question, as reported by the quiz flow.
///
/// Skipped questions are never turned into an outcome; they leave the store
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub question_text: String,
    pub was_correct: bool,
    /// Fallback category; overridden by the source file's stem when one is
    /// given.
    pub category: String,
    pub elapsed_seconds: f64,
    pub session: SessionId,
    pub source_file: Option<String>,
}

/// Applies attempt outcomes to the statistics store.
///
/// Every call is one full load and one full save; there is no incremental
/// path. Concurrent recorders are unsupported; the last save wins.
pub struct AttemptRecorder {
    clock: Clock,
    stats: Arc<dyn StatsRepository>,
}

impl AttemptRecorder {
    #[must_use]
    pub fn new(clock: Clock, stats: Arc<dyn StatsRepository>) -> Self {
        Self { clock, stats }
    }

    /// Current time according to the recorder's clock. The UI uses this to
    /// measure response times against the same time source that stamps the
    /// history.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Records one attempt: updates or creates the question's record,
    /// appends to its history and persists the whole store.
    ///
    /// The record key is the trimmed question text. When a source file is
    /// supplied its stem becomes the category, taking precedence over
    /// `outcome.category`; a record that has no source file yet adopts the
    /// file (and the derived category) exactly once.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError` if the elapsed time is invalid or the store
    /// cannot be saved.
    pub fn record(&self, outcome: AttemptOutcome) -> Result<(), RecorderError> {
        let key = outcome.question_text.trim();
        let category = outcome
            .source_file
            .as_deref()
            .and_then(category_from_file)
            .unwrap_or_else(|| outcome.category.clone());

        let event = AttemptEvent::new(
            self.clock.now(),
            outcome.was_correct,
            outcome.elapsed_seconds,
            outcome.session,
            outcome.source_file.clone(),
        )?;

        let mut records = self.stats.load();
        let record = records.get_or_insert_with(key, || {
            QuestionRecord::new(key, &category, outcome.source_file.clone())
        });
        if let Some(file) = outcome.source_file.as_deref() {
            record.adopt_source(file, &category);
        }
        record.log_attempt(event);

        self.stats.save(&records)?;
        tracing::debug!(question = key, correct = outcome.was_correct, "attempt recorded");
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::{fixed_clock, fixed_now};
    use storage::InMemoryStats;

    fn recorder_with_store() -> (AttemptRecorder, Arc<InMemoryStats>) {
        let store = Arc::new(InMemoryStats::new());
        let recorder = AttemptRecorder::new(fixed_clock(), store.clone());
        (recorder, store)
    }

    fn outcome(text: &str, correct: bool, seconds: f64, file: Option<&str>) -> AttemptOutcome {
        AttemptOutcome {
            question_text: text.into(),
            was_correct: correct,
            category: "Math".into(),
            elapsed_seconds: seconds,
            session: SessionId::new("20240101000000"),
            source_file: file.map(str::to_owned),
        }
    }

    #[test]
    fn first_attempt_creates_the_record() {
        let (recorder, store) = recorder_with_store();
        recorder
            .record(outcome("What is 2+2?", true, 3.456, None))
            .unwrap();

        let records = store.load();
        let record = records.get("What is 2+2?").unwrap();
        assert_eq!(record.attempts(), 1);
        assert_eq!(record.failures(), 0);
        assert_eq!(record.category(), "Math");
        assert_eq!(record.times(), [3.46]);
        assert_eq!(record.history().len(), 1);
        assert_eq!(record.history()[0].recorded_at, fixed_now());
    }

    #[test]
    fn counters_track_every_call() {
        let (recorder, store) = recorder_with_store();
        for &correct in &[true, false, false, true, false] {
            recorder
                .record(outcome("Q", correct, 1.0, None))
                .unwrap();
        }

        let records = store.load();
        let record = records.get("Q").unwrap();
        assert_eq!(record.attempts(), 5);
        assert_eq!(record.failures(), 3);
        assert_eq!(record.times().len(), 5);
        assert_eq!(record.history().len(), 5);
    }

    #[test]
    fn question_text_is_trimmed_into_one_key() {
        let (recorder, store) = recorder_with_store();
        recorder.record(outcome("  Q  ", true, 1.0, None)).unwrap();
        recorder.record(outcome("Q", false, 2.0, None)).unwrap();

        let records = store.load();
        assert_eq!(records.len(), 1);
        assert_eq!(records.get("Q").unwrap().attempts(), 2);
    }

    #[test]
    fn source_file_stem_overrides_the_category() {
        let (recorder, store) = recorder_with_store();
        recorder
            .record(outcome("Q", true, 1.0, Some("exams/Networking.pdf")))
            .unwrap();

        let records = store.load();
        let record = records.get("Q").unwrap();
        assert_eq!(record.category(), "Networking");
        assert_eq!(record.source_file(), Some("exams/Networking.pdf"));
    }

    #[test]
    fn category_backfills_exactly_once() {
        let (recorder, store) = recorder_with_store();
        recorder.record(outcome("Q", true, 1.0, None)).unwrap();
        assert_eq!(store.load().get("Q").unwrap().category(), "Math");

        recorder
            .record(outcome("Q", true, 1.0, Some("exams/Networking.pdf")))
            .unwrap();
        let record_after_backfill = store.load();
        let record = record_after_backfill.get("Q").unwrap();
        assert_eq!(record.category(), "Networking");
        assert_eq!(record.source_file(), Some("exams/Networking.pdf"));

        // A different file later on does not move the record again.
        recorder
            .record(outcome("Q", false, 1.0, Some("exams/Other.pdf")))
            .unwrap();
        let records = store.load();
        let record = records.get("Q").unwrap();
        assert_eq!(record.category(), "Networking");
        assert_eq!(record.source_file(), Some("exams/Networking.pdf"));
    }

    #[test]
    fn invalid_elapsed_time_leaves_the_store_alone() {
        let (recorder, store) = recorder_with_store();
        let err = recorder.record(outcome("Q", true, -1.0, None)).unwrap_err();
        assert!(matches!(err, RecorderError::Attempt(_)));
        assert!(store.load().is_empty());
    }
}
