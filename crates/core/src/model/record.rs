use std::collections::HashMap;
use thiserror::Error;

use crate::model::AttemptEvent;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when rehydrating or updating a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("failures ({failures}) exceed attempts ({attempts})")]
    FailuresExceedAttempts { failures: u32, attempts: u32 },

    #[error("history lengths do not match attempts: {attempts} attempts, {times} times, {events} events")]
    HistoryLengthMismatch {
        attempts: u32,
        times: usize,
        events: usize,
    },
}

//
// ─── QUESTION RECORD ──────────────────────────────────────────────────────────
//

/// Per-question aggregate statistics plus the full attempt history.
///
/// Invariants, held at construction and across every update:
/// `failures <= attempts` and both histories have exactly one entry per
/// attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    key: String,
    category: String,
    source_file: Option<String>,
    attempts: u32,
    failures: u32,
    times: Vec<f64>,
    history: Vec<AttemptEvent>,
}

impl QuestionRecord {
    /// Creates a fresh record with zero attempts and empty histories.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        category: impl Into<String>,
        source_file: Option<String>,
    ) -> Self {
        Self {
            key: key.into().trim().to_owned(),
            category: category.into(),
            source_file,
            attempts: 0,
            failures: 0,
            times: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Rehydrates a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the counters and histories do not line up.
    pub fn from_persisted(
        key: impl Into<String>,
        category: impl Into<String>,
        source_file: Option<String>,
        attempts: u32,
        failures: u32,
        times: Vec<f64>,
        history: Vec<AttemptEvent>,
    ) -> Result<Self, RecordError> {
        if failures > attempts {
            return Err(RecordError::FailuresExceedAttempts { failures, attempts });
        }
        if times.len() != attempts as usize || history.len() != attempts as usize {
            return Err(RecordError::HistoryLengthMismatch {
                attempts,
                times: times.len(),
                events: history.len(),
            });
        }

        Ok(Self {
            key: key.into().trim().to_owned(),
            category: category.into(),
            source_file,
            attempts,
            failures,
            times,
            history,
        })
    }

    /// Applies one attempt: bumps the counters and appends to both
    /// histories, keeping the invariants by construction.
    pub fn log_attempt(&mut self, event: AttemptEvent) {
        self.attempts += 1;
        if !event.correct {
            self.failures += 1;
        }
        self.times.push(event.seconds);
        self.history.push(event);
    }

    /// One-time source backfill: if no origin file is recorded yet, adopts
    /// the given file and category. Returns whether anything changed.
    ///
    /// After the first adoption the category never changes again.
    pub fn adopt_source(&mut self, source_file: &str, category: &str) -> bool {
        if self.source_file.is_some() {
            return false;
        }
        self.source_file = Some(source_file.to_owned());
        self.category = category.to_owned();
        true
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn history(&self) -> &[AttemptEvent] {
        &self.history
    }

    /// Mean response time in seconds; 0 when nothing is recorded.
    #[must_use]
    pub fn mean_response_time(&self) -> f64 {
        self.times.iter().sum::<f64>() / self.times.len().max(1) as f64
    }

    /// Failure rate in percent; 0 when there are no attempts.
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.failures) / f64::from(self.attempts) * 100.0
    }
}

//
// ─── RECORD SET ───────────────────────────────────────────────────────────────
//

/// The store's in-memory shape: question key → record, preserving first
/// insertion order.
///
/// The order is load-bearing twice over: ranking queries break failure-count
/// ties by store order, and save/load round-trips keep the document stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<QuestionRecord>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key.trim())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QuestionRecord> {
        self.index.get(key.trim()).map(|&at| &self.records[at])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut QuestionRecord> {
        match self.index.get(key.trim()) {
            Some(&at) => Some(&mut self.records[at]),
            None => None,
        }
    }

    /// Inserts a record, replacing any existing one with the same key in
    /// place (the original position is kept).
    pub fn insert(&mut self, record: QuestionRecord) {
        match self.index.get(record.key()) {
            Some(&at) => self.records[at] = record,
            None => {
                self.index.insert(record.key().to_owned(), self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Returns the record for `key`, creating it with `build` when absent.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        build: impl FnOnce() -> QuestionRecord,
    ) -> &mut QuestionRecord {
        let key = key.trim();
        let at = match self.index.get(key) {
            Some(&at) => at,
            None => {
                let at = self.records.len();
                self.index.insert(key.to_owned(), at);
                self.records.push(build());
                at
            }
        };
        &mut self.records[at]
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.records.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
