use exam_core::model::{OptionLabel, Question};
use exam_core::time::fixed_clock;
use services::{AppServices, QuestionOutcome, StaticQuestionSource};

fn build_question(text: &str, correct: OptionLabel, file: &str) -> Question {
    Question::new(
        text,
        ["alpha", "beta", "gamma", "delta"].map(String::from),
        correct,
        "ignored",
        Some(file.to_owned()),
    )
    .unwrap()
}

#[test]
fn full_exam_run_lands_in_the_statistics() {
    let services = AppServices::in_memory(fixed_clock());
    let source = StaticQuestionSource::new(
        "Networking",
        vec![
            build_question("Q1", OptionLabel::A, "exams/Networking.pdf"),
            build_question("Q2", OptionLabel::B, "exams/Networking.pdf"),
            build_question("Q3", OptionLabel::C, "exams/Networking.pdf"),
        ],
    );

    let mut session = services.start_exam(&source).unwrap();
    let recorder = services.recorder();

    // Right, wrong, blank.
    let first = session
        .answer_current(&recorder, OptionLabel::A, 4.0, services.now())
        .unwrap();
    assert!(matches!(
        first.outcome,
        QuestionOutcome::Answered { correct: true, .. }
    ));
    session
        .answer_current(&recorder, OptionLabel::D, 6.0, services.now())
        .unwrap();
    session.skip_current(services.now()).unwrap();

    assert!(session.is_complete());
    let counts = session.counts();
    assert_eq!((counts.correct, counts.incorrect, counts.skipped), (1, 1, 1));
    // 1 - 1/3 points over 3 questions.
    assert_eq!(session.grade(), 2.22);

    let stats = services.stats();
    let overview = stats.overview();
    assert_eq!(overview.questions, 2, "the skipped question stays out");
    assert_eq!(overview.attempts, 2);
    assert_eq!(overview.failures, 1);

    // Category came from the source file stem, not the question's label.
    let rollups = stats.rollup_by_category();
    assert_eq!(rollups.len(), 1);
    assert_eq!(rollups[0].category, "Networking");

    let trend = stats.trend_by_session(10);
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].session, session.session().clone());
    assert_eq!(trend[0].total, 2);
    assert_eq!(trend[0].success_rate, 50.0);
}

#[test]
fn repeated_runs_accumulate_per_question_history() {
    let services = AppServices::in_memory(fixed_clock());
    let source = StaticQuestionSource::new(
        "Drill",
        vec![build_question("Q1", OptionLabel::A, "exams/Drill.pdf")],
    );
    let recorder = services.recorder();

    for chosen in [OptionLabel::A, OptionLabel::B, OptionLabel::A] {
        let mut session = services.start_exam(&source).unwrap();
        session
            .answer_current(&recorder, chosen, 2.5, services.now())
            .unwrap();
        assert!(session.is_complete());
    }

    let detail = services.stats().question_detail("Q1").unwrap();
    assert_eq!(detail.attempts, 3);
    assert_eq!(detail.failures, 1);
    assert_eq!(detail.history.len(), 3);

    let ranked = services.stats().most_failed(5);
    assert_eq!(ranked[0].question, "Q1");
    assert_eq!(ranked[0].failures, 1);
    assert_eq!(ranked[0].mean_time, 2.5);
}
