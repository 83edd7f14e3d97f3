//! Persisted mirrors of the domain record types.
//!
//! The wire field names are Spanish for compatibility with the stats files
//! produced by earlier releases of the trainer; they never leak past this
//! module.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use exam_core::model::{AttemptError, AttemptEvent, QuestionRecord, RecordError, SessionId};

/// On-disk timestamp format: `YYYY-MM-DD HH:MM:SS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors raised when mapping stored shapes back into domain types.
///
/// The JSON store treats any of these as corruption and falls back to an
/// empty set; they are surfaced individually so tests can tell them apart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    #[error("invalid timestamp {0:?}")]
    Timestamp(String),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Attempt(#[from] AttemptError),
}

/// Persisted shape of one attempt-history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAttempt {
    pub fecha: String,
    pub correcta: bool,
    pub tiempo: f64,
    pub sesion_id: String,
    #[serde(default)]
    pub archivo: Option<String>,
}

impl StoredAttempt {
    #[must_use]
    pub fn from_event(event: &AttemptEvent) -> Self {
        Self {
            fecha: event.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            correcta: event.correct,
            tiempo: event.seconds,
            sesion_id: event.session.as_str().to_owned(),
            archivo: event.source_file.clone(),
        }
    }

    /// Converts the stored entry back into a domain event.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if the timestamp does not parse or the
    /// response time is invalid.
    pub fn into_event(self) -> Result<AttemptEvent, MappingError> {
        let recorded_at = NaiveDateTime::parse_from_str(&self.fecha, TIMESTAMP_FORMAT)
            .map_err(|_| MappingError::Timestamp(self.fecha.clone()))?
            .and_utc();
        let event = AttemptEvent::new(
            recorded_at,
            self.correcta,
            self.tiempo,
            SessionId::new(self.sesion_id),
            self.archivo,
        )?;
        Ok(event)
    }
}

/// Persisted shape of a question record, keyed by the surrounding document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub intentos: u32,
    pub fallos: u32,
    pub categoria: String,
    #[serde(default)]
    pub tiempos: Vec<f64>,
    #[serde(default)]
    pub historial: Vec<StoredAttempt>,
    #[serde(default)]
    pub origen_archivo: Option<String>,
}

impl StoredRecord {
    #[must_use]
    pub fn from_record(record: &QuestionRecord) -> Self {
        Self {
            intentos: record.attempts(),
            fallos: record.failures(),
            categoria: record.category().to_owned(),
            tiempos: record.times().to_vec(),
            historial: record.history().iter().map(StoredAttempt::from_event).collect(),
            origen_archivo: record.source_file().map(str::to_owned),
        }
    }

    /// Rehydrates the domain record under the given key, re-validating the
    /// counting invariants.
    ///
    /// # Errors
    ///
    /// Returns `MappingError` if any entry is malformed or the counters do
    /// not line up.
    pub fn into_record(self, key: &str) -> Result<QuestionRecord, MappingError> {
        let history = self
            .historial
            .into_iter()
            .map(StoredAttempt::into_event)
            .collect::<Result<Vec<_>, _>>()?;
        let record = QuestionRecord::from_persisted(
            key,
            self.categoria,
            self.origen_archivo,
            self.intentos,
            self.fallos,
            self.tiempos,
            history,
        )?;
        Ok(record)
    }
}
