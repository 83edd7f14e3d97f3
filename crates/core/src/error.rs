use thiserror::Error;

use crate::model::{AttemptError, QuestionError, RecordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
