use exam_core::model::{AttemptEvent, QuestionRecord, RecordSet, SessionId};
use exam_core::time::fixed_now;
use storage::{JsonStatsStore, StatsRepository};

fn record_with_history(key: &str, category: &str, outcomes: &[bool]) -> QuestionRecord {
    let mut record = QuestionRecord::new(key, category, None);
    for (i, &correct) in outcomes.iter().enumerate() {
        let event = AttemptEvent::new(
            fixed_now() + chrono::Duration::seconds(i as i64),
            correct,
            1.5 + i as f64,
            SessionId::new("20240101000000"),
            None,
        )
        .unwrap();
        record.log_attempt(event);
    }
    record
}

#[test]
fn full_round_trip_preserves_records_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStatsStore::open(dir.path().join("stats.json"));

    let mut set = RecordSet::new();
    set.insert(record_with_history("Which layer routes packets?", "Networking", &[true, false]));
    set.insert(record_with_history("What does ACID stand for?", "Databases", &[false]));
    set.insert(record_with_history("Define a monad", "FP", &[false, false, true]));

    store.save(&set).unwrap();
    let loaded = store.load();

    assert_eq!(loaded, set);
    let keys: Vec<_> = loaded.iter().map(QuestionRecord::key).collect();
    assert_eq!(
        keys,
        [
            "Which layer routes packets?",
            "What does ACID stand for?",
            "Define a monad"
        ]
    );
}

#[test]
fn save_load_save_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStatsStore::open(dir.path().join("stats.json"));

    let mut set = RecordSet::new();
    set.insert(record_with_history("Q1", "General", &[true]));
    set.insert(record_with_history("Q2", "General", &[false, true]));

    store.save(&set).unwrap();
    let once = store.load();
    store.save(&once).unwrap();
    let twice = store.load();

    assert_eq!(once, twice);
    assert_eq!(twice, set);
}

#[test]
fn reload_after_update_sees_new_attempts() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStatsStore::open(dir.path().join("stats.json"));

    let mut set = RecordSet::new();
    set.insert(record_with_history("Q1", "General", &[true]));
    store.save(&set).unwrap();

    let mut reloaded = store.load();
    let event = AttemptEvent::new(
        fixed_now(),
        false,
        9.99,
        SessionId::new("20240102000000"),
        None,
    )
    .unwrap();
    reloaded.get_mut("Q1").unwrap().log_attempt(event);
    store.save(&reloaded).unwrap();

    let fresh = store.load();
    let record = fresh.get("Q1").unwrap();
    assert_eq!(record.attempts(), 2);
    assert_eq!(record.failures(), 1);
    assert_eq!(record.times(), [1.5, 9.99]);
}
