use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use exam_core::Clock;
use storage::Storage;

use crate::error::ExamError;
use crate::exam::ExamSession;
use crate::recorder::AttemptRecorder;
use crate::source::QuestionSource;
use crate::stats::StatsService;

/// Composition root for the services layer.
///
/// Owns the clock and the storage handle and hands out the recorder and
/// the statistics queries as shared services. The UI never touches
/// repositories or time directly.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
    recorder: Arc<AttemptRecorder>,
    stats: Arc<StatsService>,
}

impl AppServices {
    /// Services over a JSON stats file. Nothing is read until first use.
    #[must_use]
    pub fn open(stats_path: impl Into<PathBuf>) -> Self {
        Self::with_storage(Clock::system(), Storage::json_file(stats_path))
    }

    /// Services over an in-memory store, for tests and previews.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::with_storage(clock, Storage::in_memory())
    }

    #[must_use]
    pub fn with_storage(clock: Clock, storage: Storage) -> Self {
        let recorder = Arc::new(AttemptRecorder::new(clock, Arc::clone(&storage.stats)));
        let stats = Arc::new(StatsService::new(Arc::clone(&storage.stats)));
        Self {
            clock,
            storage,
            recorder,
            stats,
        }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn recorder(&self) -> Arc<AttemptRecorder> {
        Arc::clone(&self.recorder)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Starts an exam over the questions a source yields right now.
    ///
    /// # Errors
    ///
    /// Returns `ExamError` when extraction fails or yields no questions.
    pub fn start_exam(&self, source: &dyn QuestionSource) -> Result<ExamSession, ExamError> {
        let questions = source.load_questions()?;
        ExamSession::new(questions, self.clock.now())
    }
}
