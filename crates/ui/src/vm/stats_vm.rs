use services::{AppServices, QuestionDetail, StatsService};

use crate::vm::time_fmt::{format_datetime, format_day};

/// Questions longer than this are shortened for table rows.
const QUESTION_DISPLAY_LEN: usize = 60;

/// Shortens a question for table display, keeping short ones as-is.
#[must_use]
pub fn truncate_question(question: &str) -> String {
    if question.chars().count() < QUESTION_DISPLAY_LEN {
        return question.to_owned();
    }
    let cut: String = question.chars().take(QUESTION_DISPLAY_LEN - 3).collect();
    format!("{cut}...")
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewVm {
    pub questions: String,
    pub attempts: String,
    pub failures: String,
    pub failure_rate: String,
    /// Share of correct attempts, 0..=100, for the summary meter.
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRowVm {
    /// Full key, used for drill-down lookups.
    pub question: String,
    pub question_display: String,
    pub category: String,
    pub attempts: String,
    pub failures: String,
    pub failure_rate: String,
    pub mean_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRowVm {
    pub category: String,
    pub questions: String,
    pub attempts: String,
    pub failures: String,
    pub failure_rate: String,
    /// 0..=100, for the category bar chart.
    pub success_rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPointVm {
    pub day: String,
    pub timestamp: String,
    pub rate: f64,
    pub rate_display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingRowVm {
    pub category: String,
    pub mean_time: String,
    /// Seconds, for the timing bar chart.
    pub mean_seconds: f64,
}

/// Drill-down panel content for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDetailVm {
    pub question: String,
    pub category: String,
    pub source_file: Option<String>,
    pub attempts: String,
    pub failures: String,
    pub failure_rate: String,
    pub mean_time: String,
    /// Latest attempts, newest last: "2024-01-01 00:00:00 | ✔ | 3.5s".
    pub recent_history: Vec<String>,
}

impl QuestionDetailVm {
    const RECENT: usize = 5;

    #[must_use]
    pub fn from_detail(detail: &QuestionDetail) -> Self {
        let start = detail.history.len().saturating_sub(Self::RECENT);
        let recent_history = detail.history[start..]
            .iter()
            .map(|event| {
                format!(
                    "{} | {} | {}s",
                    format_datetime(event.recorded_at),
                    if event.correct { "✔" } else { "✘" },
                    event.seconds
                )
            })
            .collect();

        Self {
            question: detail.question.clone(),
            category: detail.category.clone(),
            source_file: detail.source_file.clone(),
            attempts: detail.attempts.to_string(),
            failures: detail.failures.to_string(),
            failure_rate: format!("{:.1}%", detail.failure_rate),
            mean_time: format!("{:.1}s", detail.mean_time),
            recent_history,
        }
    }
}

/// Everything the dashboard tabs render, loaded in one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsDashboardVm {
    pub overview: OverviewVm,
    pub hardest: Vec<BreakdownRowVm>,
    pub categories: Vec<CategoryRowVm>,
    pub trend: Vec<TrendPointVm>,
    pub timings: Vec<TimingRowVm>,
    pub is_empty: bool,
}

impl StatsDashboardVm {
    /// How many sessions the progress tab looks back over.
    const TREND_SESSIONS: usize = 10;

    #[must_use]
    pub fn load(services: &AppServices) -> Self {
        Self::from_stats(&services.stats())
    }

    #[must_use]
    pub fn from_stats(stats: &StatsService) -> Self {
        let overview = stats.overview();
        let success_rate = if overview.attempts > 0 {
            100.0 - overview.failure_rate
        } else {
            0.0
        };

        let hardest = stats
            .hardest_questions()
            .into_iter()
            .map(|entry| BreakdownRowVm {
                question_display: truncate_question(&entry.question),
                question: entry.question,
                category: entry.category,
                attempts: entry.attempts.to_string(),
                failures: entry.failures.to_string(),
                failure_rate: format!("{:.1}%", entry.failure_rate),
                mean_time: format!("{:.1}", entry.mean_time),
            })
            .collect();

        let mut categories: Vec<CategoryRowVm> = stats
            .rollup_by_category()
            .into_iter()
            .map(|rollup| {
                let failure_rate = if rollup.attempts > 0 {
                    f64::from(rollup.failures) / f64::from(rollup.attempts) * 100.0
                } else {
                    0.0
                };
                let success_rate = if rollup.attempts > 0 {
                    100.0 - failure_rate
                } else {
                    0.0
                };
                CategoryRowVm {
                    category: rollup.category,
                    questions: rollup.questions.to_string(),
                    attempts: rollup.attempts.to_string(),
                    failures: rollup.failures.to_string(),
                    failure_rate: format!("{failure_rate:.1}%"),
                    success_rate,
                }
            })
            .collect();
        categories.sort_by(|a, b| a.category.cmp(&b.category));

        let trend = stats
            .trend_by_session(Self::TREND_SESSIONS)
            .into_iter()
            .map(|point| TrendPointVm {
                day: format_day(point.first_seen),
                timestamp: format_datetime(point.first_seen),
                rate: point.success_rate,
                rate_display: format!("{:.1}%", point.success_rate),
            })
            .collect();

        let mut timings: Vec<TimingRowVm> = stats
            .mean_time_by_category()
            .into_iter()
            .map(|timing| TimingRowVm {
                category: timing.category,
                mean_time: format!("{:.1}s", timing.mean_time),
                mean_seconds: timing.mean_time,
            })
            .collect();
        timings.sort_by(|a, b| a.category.cmp(&b.category));

        Self {
            is_empty: overview.questions == 0,
            overview: OverviewVm {
                questions: overview.questions.to_string(),
                attempts: overview.attempts.to_string(),
                failures: overview.failures.to_string(),
                failure_rate: format!("{:.1}%", overview.failure_rate),
                success_rate,
            },
            hardest,
            categories,
            trend,
            timings,
        }
    }

    /// Loads the drill-down panel for one question.
    #[must_use]
    pub fn detail(services: &AppServices, question: &str) -> Option<QuestionDetailVm> {
        services
            .stats()
            .question_detail(question)
            .map(|detail| QuestionDetailVm::from_detail(&detail))
    }
}
