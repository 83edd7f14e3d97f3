use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::SessionId;

/// Errors raised while building attempt events.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttemptError {
    #[error("response time must be a non-negative number, got {0}")]
    InvalidResponseTime(f64),
}

/// Rounds a response time to two decimal places, the persisted precision.
#[must_use]
pub(crate) fn round_seconds(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One answered question, immutable once appended to a record's history.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptEvent {
    pub recorded_at: DateTime<Utc>,
    pub correct: bool,
    /// Response time in seconds, rounded to two decimals.
    pub seconds: f64,
    pub session: SessionId,
    pub source_file: Option<String>,
}

impl AttemptEvent {
    /// Builds an event, rounding the response time to two decimals.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::InvalidResponseTime` if the time is negative
    /// or not finite.
    pub fn new(
        recorded_at: DateTime<Utc>,
        correct: bool,
        seconds: f64,
        session: SessionId,
        source_file: Option<String>,
    ) -> Result<Self, AttemptError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AttemptError::InvalidResponseTime(seconds));
        }
        Ok(Self {
            recorded_at,
            correct,
            seconds: round_seconds(seconds),
            session,
            source_file,
        })
    }
}
