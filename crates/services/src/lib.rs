#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod exam;
pub mod parser;
pub mod pdf;
pub mod recorder;
pub mod source;
pub mod stats;

pub use exam_core::Clock;

pub use app_services::AppServices;
pub use error::{ExamError, ExtractError, RecorderError};
pub use exam::{ExamAnswer, ExamCounts, ExamProgress, ExamSession, QuestionOutcome};
pub use pdf::{DEFAULT_QUESTION_LIMIT, PdfQuestionSource};
pub use recorder::{AttemptOutcome, AttemptRecorder};
pub use source::{QuestionSource, StaticQuestionSource};
pub use stats::{
    CategoryRollup, CategoryTiming, MostFailedEntry, QuestionBreakdown, QuestionDetail,
    SessionTrendPoint, StatsOverview, StatsService,
};
