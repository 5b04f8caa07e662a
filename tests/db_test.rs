mod common;

use calcprep::models::{Difficulty, EntryContent, QuestionType};
use common::{create_test_db, entry};

#[tokio::test]
async fn missing_bank_returns_empty_record_shape() {
    let db = create_test_db().await;

    let bank = db.bank("limits-intro").await.unwrap();
    assert_eq!(bank.topic_id, "limits-intro");
    assert!(bank.questions.is_empty());
}

#[tokio::test]
async fn append_creates_bank_and_preserves_entries() {
    let db = create_test_db().await;

    let entries = vec![
        entry("q1", Difficulty::Easy, 0.4),
        entry("q2", Difficulty::Hard, 0.9),
    ];
    db.append_questions("limits-intro", &entries).await.unwrap();

    let bank = db.bank("limits-intro").await.unwrap();
    assert_eq!(bank.questions.len(), 2);
    assert_eq!(bank.questions[0].id, "q1");
    assert_eq!(bank.questions[0].difficulty, Difficulty::Easy);
    assert_eq!(bank.questions[1].id, "q2");
    assert_eq!(bank.questions[1].quality_score, 0.9);

    // A later append merges rather than replacing.
    db.append_questions("limits-intro", &[entry("q3", Difficulty::Medium, 0.5)])
        .await
        .unwrap();
    let bank = db.bank("limits-intro").await.unwrap();
    assert_eq!(bank.questions.len(), 3);
}

#[tokio::test]
async fn replace_entry_keeps_identity_and_usage_fields() {
    let db = create_test_db().await;

    let mut original = entry("q1", Difficulty::Easy, 0.3);
    original.usage_count = 4;
    original.user_ratings = vec![5, 3];
    db.append_questions("chain-rule", &[original.clone()])
        .await
        .unwrap();

    let replacement = EntryContent {
        problem: "new problem".to_string(),
        answer: "new answer".to_string(),
        hint: Some("new hint".to_string()),
        solution: "new solution".to_string(),
        difficulty: Difficulty::Medium,
        tags: vec!["chain-rule".to_string()],
        question_type: QuestionType::FullSolution,
        options: Vec::new(),
        correct_option: None,
        quality_score: 0.85,
    };
    db.replace_entry("chain-rule", "q1", &replacement)
        .await
        .unwrap();

    let bank = db.bank("chain-rule").await.unwrap();
    let updated = &bank.questions[0];

    // Content fields changed.
    assert_eq!(updated.problem, "new problem");
    assert_eq!(updated.answer, "new answer");
    assert_eq!(updated.difficulty, Difficulty::Medium);
    assert_eq!(updated.quality_score, 0.85);

    // Identity and usage fields survived.
    assert_eq!(updated.id, "q1");
    assert_eq!(updated.usage_count, 4);
    assert_eq!(updated.user_ratings, vec![5, 3]);
    assert_eq!(
        updated.created_at.timestamp(),
        original.created_at.timestamp()
    );
    assert_eq!(updated.created_by, original.created_by);
}

#[tokio::test]
async fn replace_entry_with_unknown_id_is_a_noop() {
    let db = create_test_db().await;

    db.append_questions("chain-rule", &[entry("q1", Difficulty::Easy, 0.3)])
        .await
        .unwrap();

    let replacement = EntryContent {
        problem: "should not land".to_string(),
        answer: "x".to_string(),
        hint: None,
        solution: "x".to_string(),
        difficulty: Difficulty::Hard,
        tags: Vec::new(),
        question_type: QuestionType::FullSolution,
        options: Vec::new(),
        correct_option: None,
        quality_score: 1.0,
    };
    db.replace_entry("chain-rule", "ghost", &replacement)
        .await
        .unwrap();

    let bank = db.bank("chain-rule").await.unwrap();
    assert_eq!(bank.questions.len(), 1);
    assert_eq!(bank.questions[0].problem, "problem q1");
}

#[tokio::test]
async fn concurrent_appends_lose_no_entries() {
    let db = create_test_db().await;

    let first = vec![
        entry("a1", Difficulty::Easy, 0.5),
        entry("a2", Difficulty::Medium, 0.5),
    ];
    let second = vec![
        entry("b1", Difficulty::Hard, 0.5),
        entry("b2", Difficulty::Easy, 0.5),
    ];

    let (r1, r2) = tokio::join!(
        db.append_questions("optimization", &first),
        db.append_questions("optimization", &second),
    );
    r1.unwrap();
    r2.unwrap();

    let bank = db.bank("optimization").await.unwrap();
    let mut ids: Vec<&str> = bank.questions.iter().map(|q| q.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["a1", "a2", "b1", "b2"]);
}

#[tokio::test]
async fn usage_and_ratings_accumulate() {
    let db = create_test_db().await;

    db.append_questions("substitution", &[entry("q1", Difficulty::Easy, 0.6)])
        .await
        .unwrap();

    db.touch_usage("substitution", "q1").await.unwrap();
    db.touch_usage("substitution", "q1").await.unwrap();
    db.rate_entry("substitution", "q1", 4).await.unwrap();
    db.rate_entry("substitution", "q1", 2).await.unwrap();

    let bank = db.bank("substitution").await.unwrap();
    assert_eq!(bank.questions[0].usage_count, 2);
    assert_eq!(bank.questions[0].user_ratings, vec![4, 2]);
}

#[tokio::test]
async fn progress_counters_track_mastery_floor() {
    let db = create_test_db().await;

    // Untouched topic gives the zeroed default.
    let fresh = db.progress("limits-intro").await.unwrap();
    assert_eq!(fresh.attempts, 0);
    assert_eq!(fresh.mastery_level, 0);
    assert!(!fresh.completed);

    db.record_attempt("limits-intro", true).await.unwrap();
    db.record_attempt("limits-intro", true).await.unwrap();
    let after_miss = db.record_attempt("limits-intro", false).await.unwrap();

    assert_eq!(after_miss.attempts, 3);
    assert_eq!(after_miss.correct, 2);
    assert_eq!(after_miss.streak, 0);
    assert_eq!(after_miss.best_streak, 2);
    // floor(2/3 * 100) = 66
    assert_eq!(after_miss.mastery_level, 66);
    assert!(!after_miss.completed);
}

#[tokio::test]
async fn completion_requires_mastery_and_volume() {
    let db = create_test_db().await;

    for _ in 0..9 {
        db.record_attempt("continuity", true).await.unwrap();
    }
    let at_nine = db.progress("continuity").await.unwrap();
    assert!(!at_nine.completed, "nine attempts is below the floor");

    let at_ten = db.record_attempt("continuity", true).await.unwrap();
    assert_eq!(at_ten.mastery_level, 100);
    assert!(at_ten.completed);
}

#[tokio::test]
async fn backup_snapshots_both_collections() {
    let db = create_test_db().await;

    db.append_questions("limits-intro", &[entry("q1", Difficulty::Easy, 0.6)])
        .await
        .unwrap();
    db.append_questions("chain-rule", &[entry("q2", Difficulty::Hard, 0.9)])
        .await
        .unwrap();

    let backup_id = db.backup_all().await.unwrap();
    assert!(!backup_id.is_empty());

    let (content, banks) = db
        .find_backup(&backup_id)
        .await
        .unwrap()
        .expect("backup should exist");
    assert!(content.is_empty());
    assert_eq!(banks.len(), 2);
    assert!(db.find_backup("nonexistent").await.unwrap().is_none());
}
