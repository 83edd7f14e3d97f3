mod exam_vm;
mod stats_vm;
mod time_fmt;

pub use exam_vm::{AnswerFeedback, ExamVm};
pub use stats_vm::{
    BreakdownRowVm, CategoryRowVm, OverviewVm, QuestionDetailVm, StatsDashboardVm, TimingRowVm,
    TrendPointVm, truncate_question,
};
pub use time_fmt::{format_datetime, format_day};
