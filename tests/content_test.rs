mod common;

use calcprep::catalog;
use calcprep::content::{self, ContentPart, RegeneratedPart};
use calcprep::models::Difficulty;
use common::{create_test_db, entry, failing_pool, healthy_pool};

#[tokio::test]
async fn first_request_builds_and_seeds_the_bank() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("differentiation-rules").unwrap();

    let response = content::get_or_create(&db, &pool, topic).await.unwrap();

    assert!(!response.cached);
    assert_eq!(response.content.version, 1);
    assert!(!response.content.quality_reviewed);
    assert!(!response.content.explanation.is_empty());
    assert_eq!(response.content.practice_problems.len(), 3);

    // The freshly minted seed questions joined the durable pool.
    let bank = db.bank(topic.id).await.unwrap();
    assert_eq!(bank.questions.len(), 3);
    let snapshot_ids: Vec<&str> = response
        .content
        .practice_problems
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    for q in &bank.questions {
        assert!(snapshot_ids.contains(&q.id.as_str()));
    }
}

#[tokio::test]
async fn cache_hit_augments_response_without_touching_stored_snapshot() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("chain-rule").unwrap();

    let first = content::get_or_create(&db, &pool, topic).await.unwrap();
    assert!(!first.cached);
    let seed_ids: Vec<String> = first
        .content
        .practice_problems
        .iter()
        .map(|q| q.id.clone())
        .collect();

    // Grow the live pool beyond the snapshot.
    db.append_questions(
        topic.id,
        &[
            entry("extra-easy", Difficulty::Easy, 0.99),
            entry("extra-hard", Difficulty::Hard, 0.98),
        ],
    )
    .await
    .unwrap();

    let second = content::get_or_create(&db, &pool, topic).await.unwrap();
    assert!(second.cached);
    assert!(
        second.content.practice_problems.len() > seed_ids.len(),
        "cache hit should attach extra questions from the bank"
    );

    let third = content::get_or_create(&db, &pool, topic).await.unwrap();
    assert!(third.cached);

    // The stored snapshot is still exactly the seed set.
    let stored = db.find_content(topic.id).await.unwrap().unwrap();
    let stored_ids: Vec<String> = stored
        .practice_problems
        .iter()
        .map(|q| q.id.clone())
        .collect();
    assert_eq!(stored_ids, seed_ids);
}

#[tokio::test]
async fn augmentation_skips_questions_already_in_the_snapshot() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("continuity").unwrap();

    content::get_or_create(&db, &pool, topic).await.unwrap();
    let hit = content::get_or_create(&db, &pool, topic).await.unwrap();

    // The bank holds only the snapshot questions, so nothing new attaches.
    assert_eq!(hit.content.practice_problems.len(), 3);
    let mut ids: Vec<&str> = hit
        .content
        .practice_problems
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3, "no duplicate questions in the response");
}

#[tokio::test]
async fn generator_outage_degrades_to_fallback_lesson() {
    let db = create_test_db().await;
    let pool = failing_pool();
    let topic = catalog::lookup_topic("related-rates").unwrap();

    let response = content::get_or_create(&db, &pool, topic)
        .await
        .expect("a dead generator must not fail the request");

    assert!(!response.cached);
    assert!(response.content.explanation.contains(topic.title));
    assert!(!response.content.example.steps.is_empty());
    assert_eq!(response.content.practice_problems.len(), 3);
    for q in &response.content.practice_problems {
        assert_eq!(q.created_by, "fallback");
    }

    // Fallback seeds still reach the bank.
    let bank = db.bank(topic.id).await.unwrap();
    assert_eq!(bank.questions.len(), 3);
}

#[tokio::test]
async fn regenerating_the_example_bumps_the_version() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("optimization").unwrap();

    content::get_or_create(&db, &pool, topic).await.unwrap();

    let part = content::regenerate_part(&db, &pool, topic, ContentPart::Example, 0)
        .await
        .unwrap()
        .expect("content exists");

    let RegeneratedPart::Example(example) = part else {
        panic!("expected a worked example");
    };

    let stored = db.find_content(topic.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.example.problem, example.problem);
}

#[tokio::test]
async fn regenerated_practice_problem_replaces_in_place_and_skips_the_bank() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("substitution").unwrap();

    content::get_or_create(&db, &pool, topic).await.unwrap();
    let before = db.find_content(topic.id).await.unwrap().unwrap();
    let replaced_id = before.practice_problems[1].id.clone();

    let part = content::regenerate_part(&db, &pool, topic, ContentPart::PracticeProblem, 1)
        .await
        .unwrap()
        .expect("content exists");

    let RegeneratedPart::PracticeProblem(new_entry) = part else {
        panic!("expected a practice problem");
    };

    let after = db.find_content(topic.id).await.unwrap().unwrap();
    assert_eq!(after.practice_problems.len(), before.practice_problems.len());
    assert_eq!(after.practice_problems[1].id, new_entry.id);
    assert_ne!(after.practice_problems[1].id, replaced_id);

    // Intentional asymmetry with first-time generation: the regenerated
    // problem does not join the bank.
    let bank = db.bank(topic.id).await.unwrap();
    assert!(bank.questions.iter().all(|q| q.id != new_entry.id));
    assert_eq!(bank.questions.len(), 3);
}

#[tokio::test]
async fn regenerating_without_content_reports_nothing_to_do() {
    let db = create_test_db().await;
    let pool = healthy_pool();
    let topic = catalog::lookup_topic("volumes-of-revolution").unwrap();

    let part = content::regenerate_part(&db, &pool, topic, ContentPart::Example, 0)
        .await
        .unwrap();
    assert!(part.is_none());
}
