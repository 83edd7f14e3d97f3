//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::AttemptError;
use storage::StorageError;

/// Errors emitted by `AttemptRecorder`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecorderError {
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while extracting questions from a source document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("cannot read {path}: {reason}")]
    Document { path: String, reason: String },

    #[error("no questions found in {path}")]
    NoQuestions { path: String },
}

/// Errors emitted by the exam session flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamError {
    #[error("no questions available for this exam")]
    Empty,
    #[error("exam already completed")]
    Completed,
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
}
