use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use exam_core::model::{AttemptEvent, QuestionRecord, SessionId};
use storage::StatsRepository;

//
// ─── DERIVED ITEMS ────────────────────────────────────────────────────────────
//

/// One row of the most-failed ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct MostFailedEntry {
    pub question: String,
    pub failures: u32,
    pub attempts: u32,
    pub category: String,
    pub mean_time: f64,
}

/// Aggregated attempts/failures/question-count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRollup {
    pub category: String,
    pub attempts: u32,
    pub failures: u32,
    pub questions: u32,
}

/// Per-session success-rate summary used for progress charts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTrendPoint {
    pub session: SessionId,
    pub correct: u32,
    pub total: u32,
    /// Percent, rounded to one decimal.
    pub success_rate: f64,
    /// Timestamp of the first event seen for this session, for display.
    pub first_seen: DateTime<Utc>,
}

/// Store-wide headline numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsOverview {
    pub questions: usize,
    pub attempts: u32,
    pub failures: u32,
    /// Percent; 0 when nothing has been attempted.
    pub failure_rate: f64,
}

/// Per-question breakdown for the dashboard table, rate-ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBreakdown {
    pub question: String,
    pub category: String,
    pub attempts: u32,
    pub failures: u32,
    pub failure_rate: f64,
    pub mean_time: f64,
}

/// Raw record detail for drill-down display.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDetail {
    pub question: String,
    pub category: String,
    pub source_file: Option<String>,
    pub attempts: u32,
    pub failures: u32,
    pub failure_rate: f64,
    pub mean_time: f64,
    pub history: Vec<AttemptEvent>,
}

/// Mean response time for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTiming {
    pub category: String,
    pub mean_time: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//
// ─── STATS SERVICE ────────────────────────────────────────────────────────────
//

/// Read-only queries over the statistics store.
///
/// Every query loads a fresh snapshot and never fails: a missing or damaged
/// store simply reads as empty. Results are a point-in-time snapshot and
/// do not track later recorder writes.
pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// The `top_n` questions ranked by failure count, descending.
    ///
    /// Ranking is by failure count only; the sort is stable, so ties keep
    /// store insertion order.
    #[must_use]
    pub fn most_failed(&self, top_n: usize) -> Vec<MostFailedEntry> {
        let records = self.stats.load();
        let mut entries: Vec<MostFailedEntry> = records
            .iter()
            .map(|record| MostFailedEntry {
                question: record.key().to_owned(),
                failures: record.failures(),
                attempts: record.attempts(),
                category: record.category().to_owned(),
                mean_time: record.mean_response_time(),
            })
            .collect();
        entries.sort_by(|a, b| b.failures.cmp(&a.failures));
        entries.truncate(top_n);
        entries
    }

    /// Attempts, failures and distinct-question counts grouped by category,
    /// in first-seen store order.
    #[must_use]
    pub fn rollup_by_category(&self) -> Vec<CategoryRollup> {
        let records = self.stats.load();
        let mut rollups: Vec<CategoryRollup> = Vec::new();
        for record in records.iter() {
            let at = match rollups
                .iter()
                .position(|rollup| rollup.category == record.category())
            {
                Some(at) => at,
                None => {
                    rollups.push(CategoryRollup {
                        category: record.category().to_owned(),
                        attempts: 0,
                        failures: 0,
                        questions: 0,
                    });
                    rollups.len() - 1
                }
            };
            let rollup = &mut rollups[at];
            rollup.attempts += record.attempts();
            rollup.failures += record.failures();
            rollup.questions += 1;
        }
        rollups
    }

    /// Success-rate trend per session, chronological.
    ///
    /// Session ids are fixed-width timestamps, so the lexicographic sort is
    /// a chronological one. `last_n == 0` keeps every session. Sessions
    /// with no events produce no point.
    #[must_use]
    pub fn trend_by_session(&self, last_n: usize) -> Vec<SessionTrendPoint> {
        let records = self.stats.load();

        let sessions: BTreeSet<SessionId> = records
            .iter()
            .flat_map(QuestionRecord::history)
            .map(|event| event.session.clone())
            .collect();
        let mut sessions: Vec<SessionId> = sessions.into_iter().collect();
        if last_n > 0 && sessions.len() > last_n {
            sessions = sessions.split_off(sessions.len() - last_n);
        }

        let mut points = Vec::with_capacity(sessions.len());
        for session in sessions {
            let mut correct = 0_u32;
            let mut total = 0_u32;
            let mut first_seen: Option<DateTime<Utc>> = None;
            for record in records.iter() {
                for event in record.history() {
                    if event.session != session {
                        continue;
                    }
                    total += 1;
                    if event.correct {
                        correct += 1;
                    }
                    if first_seen.is_none() {
                        first_seen = Some(event.recorded_at);
                    }
                }
            }

            let Some(first_seen) = first_seen else { continue };
            if total == 0 {
                continue;
            }
            points.push(SessionTrendPoint {
                session,
                correct,
                total,
                success_rate: round1(f64::from(correct) / f64::from(total) * 100.0),
                first_seen,
            });
        }
        points
    }

    /// Headline totals across the whole store.
    #[must_use]
    pub fn overview(&self) -> StatsOverview {
        let records = self.stats.load();
        let attempts: u32 = records.iter().map(QuestionRecord::attempts).sum();
        let failures: u32 = records.iter().map(QuestionRecord::failures).sum();
        let failure_rate = if attempts > 0 {
            f64::from(failures) / f64::from(attempts) * 100.0
        } else {
            0.0
        };
        StatsOverview {
            questions: records.len(),
            attempts,
            failures,
            failure_rate,
        }
    }

    /// Every question with its rates, hardest first (failure rate, then
    /// attempts, both descending).
    #[must_use]
    pub fn hardest_questions(&self) -> Vec<QuestionBreakdown> {
        let records = self.stats.load();
        let mut entries: Vec<QuestionBreakdown> = records
            .iter()
            .map(|record| QuestionBreakdown {
                question: record.key().to_owned(),
                category: record.category().to_owned(),
                attempts: record.attempts(),
                failures: record.failures(),
                failure_rate: record.failure_rate(),
                mean_time: record.mean_response_time(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.failure_rate
                .partial_cmp(&a.failure_rate)
                .unwrap_or(Ordering::Equal)
                .then(b.attempts.cmp(&a.attempts))
        });
        entries
    }

    /// Full record detail for one question, if it has been seen.
    #[must_use]
    pub fn question_detail(&self, key: &str) -> Option<QuestionDetail> {
        let records = self.stats.load();
        let record = records.get(key)?;
        Some(QuestionDetail {
            question: record.key().to_owned(),
            category: record.category().to_owned(),
            source_file: record.source_file().map(str::to_owned),
            attempts: record.attempts(),
            failures: record.failures(),
            failure_rate: record.failure_rate(),
            mean_time: record.mean_response_time(),
            history: record.history().to_vec(),
        })
    }

    /// Mean response time per category, first-seen store order; categories
    /// with no recorded times read as 0.
    #[must_use]
    pub fn mean_time_by_category(&self) -> Vec<CategoryTiming> {
        let records = self.stats.load();
        let mut sums: Vec<(String, f64, usize)> = Vec::new();
        for record in records.iter() {
            let at = match sums.iter().position(|(category, _, _)| category == record.category()) {
                Some(at) => at,
                None => {
                    sums.push((record.category().to_owned(), 0.0, 0));
                    sums.len() - 1
                }
            };
            let (_, sum, count) = &mut sums[at];
            *sum += record.times().iter().sum::<f64>();
            *count += record.times().len();
        }
        sums.into_iter()
            .map(|(category, sum, count)| CategoryTiming {
                category,
                mean_time: sum / count.max(1) as f64,
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
