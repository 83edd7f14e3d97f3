mod attempt;
mod question;
mod record;
mod session;

pub use attempt::{AttemptError, AttemptEvent};
pub use question::{category_from_file, OptionLabel, Question, QuestionError};
pub use record::{QuestionRecord, RecordError, RecordSet};
pub use session::SessionId;
