mod exam;
mod home;
mod stats;

pub use exam::ExamView;
pub use home::HomeView;
pub use stats::StatsView;
