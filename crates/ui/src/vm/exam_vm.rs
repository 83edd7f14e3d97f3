use chrono::{DateTime, Utc};

use exam_core::model::{OptionLabel, Question};
use services::{AppServices, ExamError, ExamSession, QuestionSource};

/// What the answer panel shows after each choice.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub chosen: OptionLabel,
    pub correct_label: OptionLabel,
    pub correct_text: String,
}

/// Drives one exam run for the view: steps the session, measures response
/// times against the services clock and holds the between-question
/// feedback state.
pub struct ExamVm {
    session: ExamSession,
    shown_at: DateTime<Utc>,
    feedback: Option<AnswerFeedback>,
}

impl ExamVm {
    /// Extracts questions from the source and opens the session.
    ///
    /// # Errors
    ///
    /// Propagates extraction and session errors.
    pub fn start(services: &AppServices, source: &dyn QuestionSource) -> Result<Self, ExamError> {
        let session = services.start_exam(source)?;
        Ok(Self {
            session,
            shown_at: services.now(),
            feedback: None,
        })
    }

    /// The question currently on screen, unless feedback or completion is
    /// showing instead.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        if self.feedback.is_some() {
            return None;
        }
        self.session.current_question()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.feedback.is_none() && self.session.is_complete()
    }

    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    /// "Question 3 / 10" style progress label.
    #[must_use]
    pub fn progress_label(&self) -> String {
        let total = self.session.total_questions();
        let position = self.session.current_position().min(total);
        format!("Question {position} / {total}")
    }

    /// Answers the current question, recording the attempt with the time
    /// elapsed since it was shown.
    ///
    /// # Errors
    ///
    /// Propagates recorder and session errors.
    pub fn choose(
        &mut self,
        services: &AppServices,
        chosen: OptionLabel,
    ) -> Result<(), ExamError> {
        let Some(question) = self.session.current_question() else {
            return Err(ExamError::Completed);
        };
        let correct_label = question.correct();
        let correct_text = question.option(correct_label).to_owned();

        let now = services.now();
        let elapsed = (now - self.shown_at).num_milliseconds() as f64 / 1000.0;
        let answer = self
            .session
            .answer_current(&services.recorder(), chosen, elapsed.max(0.0), now)?;

        let correct = matches!(
            answer.outcome,
            services::QuestionOutcome::Answered { correct: true, .. }
        );
        self.feedback = Some(AnswerFeedback {
            correct,
            chosen,
            correct_label,
            correct_text,
        });
        Ok(())
    }

    /// Skips the current question; nothing is recorded.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Completed` if the session is already finished.
    pub fn skip(&mut self, services: &AppServices) -> Result<(), ExamError> {
        self.session.skip_current(services.now())?;
        self.shown_at = services.now();
        Ok(())
    }

    /// Dismisses the feedback panel and arms the timer for the next
    /// question.
    pub fn advance(&mut self, services: &AppServices) {
        self.feedback = None;
        self.shown_at = services.now();
    }

    /// Grade line for the completion panel.
    #[must_use]
    pub fn grade_label(&self) -> String {
        let counts = self.session.counts();
        format!(
            "Grade: {:.2} ({} correct, {} wrong, {} blank)",
            self.session.grade(),
            counts.correct,
            counts.incorrect,
            counts.skipped
        )
    }
}
