use chrono::{DateTime, Utc};
use std::fmt;

use exam_core::model::{OptionLabel, Question, SessionId};
use exam_core::scoring;

use crate::error::ExamError;
use crate::recorder::{AttemptOutcome, AttemptRecorder};

//
// ─── OUTCOMES ─────────────────────────────────────────────────────────────────
//

/// What happened to one question within an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionOutcome {
    Answered { chosen: OptionLabel, correct: bool },
    Skipped,
}

/// Per-question result kept by the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamAnswer {
    pub question: String,
    pub outcome: QuestionOutcome,
}

/// Aggregated view of exam progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Correct/incorrect/blank tallies for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExamCounts {
    pub correct: u32,
    pub incorrect: u32,
    pub skipped: u32,
}

//
// ─── EXAM SESSION ─────────────────────────────────────────────────────────────
//

/// In-memory exam run over a fixed question list.
///
/// Steps through the questions sequentially. Answering a question reports
/// it to the `AttemptRecorder`; skipping advances without touching the
/// store. The session id is minted from the start timestamp, which is what
/// ties the attempt history back to this run.
pub struct ExamSession {
    questions: Vec<Question>,
    current: usize,
    results: Vec<ExamAnswer>,
    session: SessionId,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    /// Creates a session over the given questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Empty` if no questions are provided.
    pub fn new(questions: Vec<Question>, started_at: DateTime<Utc>) -> Result<Self, ExamError> {
        if questions.is_empty() {
            return Err(ExamError::Empty);
        }
        Ok(Self {
            questions,
            current: 0,
            results: Vec::new(),
            session: SessionId::at(started_at),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionId {
        &self.session
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn results(&self) -> &[ExamAnswer] {
        &self.results
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Position of the current question, 1-based for display.
    #[must_use]
    pub fn current_position(&self) -> usize {
        self.current + 1
    }

    #[must_use]
    pub fn progress(&self) -> ExamProgress {
        ExamProgress {
            total: self.questions.len(),
            answered: self.results.len(),
            remaining: self.questions.len().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn counts(&self) -> ExamCounts {
        let mut counts = ExamCounts::default();
        for result in &self.results {
            match result.outcome {
                QuestionOutcome::Answered { correct: true, .. } => counts.correct += 1,
                QuestionOutcome::Answered { correct: false, .. } => counts.incorrect += 1,
                QuestionOutcome::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    /// The 0..=10 grade over every question in the session.
    #[must_use]
    pub fn grade(&self) -> f64 {
        let counts = self.counts();
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        scoring::exam_grade(total, counts.correct, counts.incorrect)
    }

    /// Answers the current question and advances.
    ///
    /// The attempt goes through the recorder, so the store is updated and
    /// saved before the session moves on. `answered_at` should come from
    /// the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Completed` if the session is already finished,
    /// or propagates recorder failures.
    pub fn answer_current(
        &mut self,
        recorder: &AttemptRecorder,
        chosen: OptionLabel,
        elapsed_seconds: f64,
        answered_at: DateTime<Utc>,
    ) -> Result<&ExamAnswer, ExamError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(ExamError::Completed);
        };

        let correct = question.is_correct(chosen);
        recorder.record(AttemptOutcome {
            question_text: question.text().to_owned(),
            was_correct: correct,
            category: question.category().to_owned(),
            elapsed_seconds,
            session: self.session.clone(),
            source_file: question.source_file().map(str::to_owned),
        })?;

        let answer = ExamAnswer {
            question: question.key().to_owned(),
            outcome: QuestionOutcome::Answered { chosen, correct },
        };
        self.push_result(answer, answered_at)
    }

    /// Skips the current question and advances. Skipped questions are NOT
    /// recorded to the store.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Completed` if the session is already finished.
    pub fn skip_current(
        &mut self,
        skipped_at: DateTime<Utc>,
    ) -> Result<&ExamAnswer, ExamError> {
        let Some(question) = self.questions.get(self.current) else {
            return Err(ExamError::Completed);
        };
        let answer = ExamAnswer {
            question: question.key().to_owned(),
            outcome: QuestionOutcome::Skipped,
        };
        self.push_result(answer, skipped_at)
    }

    fn push_result(
        &mut self,
        answer: ExamAnswer,
        at: DateTime<Utc>,
    ) -> Result<&ExamAnswer, ExamError> {
        if self.is_complete() {
            return Err(ExamError::Completed);
        }

        self.results.push(answer);
        self.current += 1;
        if self.current >= self.questions.len() {
            self.completed_at = Some(at);
        }

        self.results.last().ok_or(ExamError::Completed)
    }
}

impl fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamSession")
            .field("session", &self.session)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("results_len", &self.results.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::time::{fixed_clock, fixed_now};
    use std::sync::Arc;
    use storage::{InMemoryStats, StatsRepository};

    fn build_question(text: &str, correct: OptionLabel) -> Question {
        Question::new(
            text,
            ["one", "two", "three", "four"].map(String::from),
            correct,
            "General",
            None,
        )
        .unwrap()
    }

    fn recorder_with_store() -> (AttemptRecorder, Arc<InMemoryStats>) {
        let store = Arc::new(InMemoryStats::new());
        (AttemptRecorder::new(fixed_clock(), store.clone()), store)
    }

    #[test]
    fn empty_exam_returns_error() {
        let err = ExamSession::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, ExamError::Empty));
    }

    #[test]
    fn session_id_comes_from_the_start_time() {
        let session = ExamSession::new(vec![build_question("Q", OptionLabel::A)], fixed_now())
            .unwrap();
        assert_eq!(session.session().as_str(), "20240101000000");
    }

    #[test]
    fn exam_advances_and_completes() {
        let (recorder, _) = recorder_with_store();
        let mut session = ExamSession::new(
            vec![
                build_question("Q1", OptionLabel::A),
                build_question("Q2", OptionLabel::B),
            ],
            fixed_now(),
        )
        .unwrap();

        assert!(!session.is_complete());
        let first = session
            .answer_current(&recorder, OptionLabel::A, 2.0, fixed_now())
            .unwrap();
        assert_eq!(
            first.outcome,
            QuestionOutcome::Answered { chosen: OptionLabel::A, correct: true }
        );
        assert!(!session.is_complete());

        session
            .answer_current(&recorder, OptionLabel::C, 3.0, fixed_now())
            .unwrap();
        assert!(session.is_complete());
        assert_eq!(session.completed_at(), Some(fixed_now()));

        let counts = session.counts();
        assert_eq!(counts.correct, 1);
        assert_eq!(counts.incorrect, 1);
        assert_eq!(counts.skipped, 0);

        let err = session
            .answer_current(&recorder, OptionLabel::A, 1.0, fixed_now())
            .unwrap_err();
        assert!(matches!(err, ExamError::Completed));
    }

    #[test]
    fn answers_reach_the_store_but_skips_do_not() {
        let (recorder, store) = recorder_with_store();
        let mut session = ExamSession::new(
            vec![
                build_question("Answered", OptionLabel::A),
                build_question("Skipped", OptionLabel::B),
            ],
            fixed_now(),
        )
        .unwrap();

        session
            .answer_current(&recorder, OptionLabel::D, 1.5, fixed_now())
            .unwrap();
        session.skip_current(fixed_now()).unwrap();

        assert!(session.is_complete());
        let records = store.load();
        assert_eq!(records.len(), 1);
        assert!(records.contains("Answered"));
        assert!(!records.contains("Skipped"));

        let counts = session.counts();
        assert_eq!(counts.incorrect, 1);
        assert_eq!(counts.skipped, 1);
    }

    #[test]
    fn grade_counts_blanks_in_the_total() {
        let (recorder, _) = recorder_with_store();
        let mut session = ExamSession::new(
            vec![
                build_question("Q1", OptionLabel::A),
                build_question("Q2", OptionLabel::A),
                build_question("Q3", OptionLabel::A),
            ],
            fixed_now(),
        )
        .unwrap();

        session
            .answer_current(&recorder, OptionLabel::A, 1.0, fixed_now())
            .unwrap();
        session.skip_current(fixed_now()).unwrap();
        session.skip_current(fixed_now()).unwrap();

        // 1 correct over 3 questions, blanks neither add nor subtract.
        assert_eq!(session.grade(), 3.33);
    }

    #[test]
    fn progress_tracks_the_walk() {
        let (recorder, _) = recorder_with_store();
        let mut session = ExamSession::new(
            vec![
                build_question("Q1", OptionLabel::A),
                build_question("Q2", OptionLabel::A),
            ],
            fixed_now(),
        )
        .unwrap();

        let before = session.progress();
        assert_eq!(before.total, 2);
        assert_eq!(before.answered, 0);
        assert_eq!(before.remaining, 2);
        assert!(!before.is_complete);

        session
            .answer_current(&recorder, OptionLabel::A, 1.0, fixed_now())
            .unwrap();
        let after = session.progress();
        assert_eq!(after.answered, 1);
        assert_eq!(after.remaining, 1);
    }
}
