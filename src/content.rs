//! Content cache: owns the "does this topic have a lesson yet" decision
//! and orchestrates first-time generation.

use std::collections::HashSet;

use chrono::Utc;
use color_eyre::{eyre::bail, eyre::OptionExt, Result};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::catalog::Topic;
use crate::db::Db;
use crate::extract;
use crate::generate::{fallback, or_fallback, prompts, GeneratorPool, SamplingParams};
use crate::models::{
    ContentRecord, Difficulty, GeneratedQuestion, PracticeSetPayload, QuestionBankRecord,
    QuestionEntry, WorkedExample,
};
use crate::names;
use crate::selector;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub content: ContentRecord,
    pub cached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentPart {
    Example,
    PracticeProblem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum RegeneratedPart {
    Example(WorkedExample),
    PracticeProblem(QuestionEntry),
}

/// Cache lookup with create-on-miss. A hit is augmented at response time
/// with selector-picked questions from the live bank; the stored snapshot
/// is never written on this path.
pub async fn get_or_create(
    db: &Db,
    generators: &GeneratorPool,
    topic: &'static Topic,
) -> Result<ContentResponse> {
    if let Some(mut content) = db.find_content(topic.id).await? {
        let bank = bounded_bank_read(db, topic.id).await;

        let pool: Vec<QuestionEntry> = {
            let snapshot_ids: HashSet<&str> = content
                .practice_problems
                .iter()
                .map(|q| q.id.as_str())
                .collect();
            bank.questions
                .into_iter()
                .filter(|q| !snapshot_ids.contains(q.id.as_str()))
                .collect()
        };

        let extra = selector::select_top_k(&pool, names::EXTRA_QUESTION_COUNT);
        for picked in &extra {
            if let Err(e) = db.touch_usage(topic.id, &picked.id).await {
                tracing::debug!("usage bump failed for {}: {e}", picked.id);
            }
        }
        content.practice_problems.extend(extra);

        return Ok(ContentResponse {
            content,
            cached: true,
        });
    }

    let content = build_content(db, generators, topic).await?;
    Ok(ContentResponse {
        content,
        cached: false,
    })
}

/// Bank read for the hot path: bounded, and degrading to the empty pool
/// instead of hanging or failing the lesson response.
async fn bounded_bank_read(db: &Db, topic_id: &str) -> QuestionBankRecord {
    match timeout(names::STORE_TIMEOUT, db.bank(topic_id)).await {
        Ok(Ok(bank)) => bank,
        Ok(Err(e)) => {
            tracing::warn!("bank read failed for {topic_id}: {e}; serving lesson unaugmented");
            QuestionBankRecord::empty(topic_id)
        }
        Err(_) => {
            tracing::warn!("bank read timed out for {topic_id}; serving lesson unaugmented");
            QuestionBankRecord::empty(topic_id)
        }
    }
}

/// First-time generation: all four slices fan out concurrently and each
/// degrades to canned content on its own, so a bad generator never blanks
/// the lesson. The seed questions also join the durable bank pool.
async fn build_content(
    db: &Db,
    generators: &GeneratorPool,
    topic: &'static Topic,
) -> Result<ContentRecord> {
    tracing::info!("generating lesson content for topic {}", topic.id);
    let params = SamplingParams::default();

    let explanation_task = or_fallback(
        async {
            let raw = generators
                .primary
                .generate(&prompts::explanation(topic), params)
                .await?;
            Ok(raw.trim().to_string())
        },
        fallback::explanation(topic),
        "explanation",
    );

    let summary_task = or_fallback(
        async {
            let raw = generators
                .secondary
                .generate(&prompts::summary(topic), params)
                .await?;
            Ok(raw.trim().to_string())
        },
        fallback::summary(topic),
        "summary",
    );

    let example_task = or_fallback(
        async {
            let raw = generators
                .primary
                .generate(&prompts::worked_example(topic), params)
                .await?;
            extract::extract_json::<WorkedExample>(&raw)
                .ok_or_eyre("worked-example output had no parseable JSON object")
        },
        fallback::example(topic),
        "worked example",
    );

    let practice_task = or_fallback(
        async {
            let raw = generators
                .secondary
                .generate(
                    &prompts::practice_set(topic, names::SEED_QUESTION_COUNT),
                    params,
                )
                .await?;
            let payload = extract::extract_json::<PracticeSetPayload>(&raw)
                .ok_or_eyre("practice-set output had no parseable JSON object")?;
            if payload.questions.is_empty() {
                bail!("practice-set output contained no questions");
            }
            Ok(payload
                .questions
                .into_iter()
                .take(names::SEED_QUESTION_COUNT)
                .map(|g| QuestionEntry::from_generated(topic.id, g, generators.secondary.name()))
                .collect::<Vec<_>>())
        },
        fallback::practice_questions(topic),
        "practice set",
    );

    let (explanation, summary, example, practice_problems) =
        tokio::join!(explanation_task, summary_task, example_task, practice_task);

    let now = Utc::now();
    let record = ContentRecord {
        topic_id: topic.id.to_string(),
        explanation,
        summary,
        example,
        practice_problems,
        version: 1,
        quality_reviewed: false,
        quality_score: names::UNSCORED_QUALITY,
        last_reviewed: None,
        created_at: now,
        updated_at: now,
    };

    db.insert_content(&record).await?;
    db.append_questions(topic.id, &record.practice_problems)
        .await?;

    Ok(record)
}

/// Regenerate a single slice of a stored lesson. `None` when the topic has
/// no lesson yet. Regenerated practice problems stay snapshot-only: unlike
/// first-time seeds they are not merged into the bank.
pub async fn regenerate_part(
    db: &Db,
    generators: &GeneratorPool,
    topic: &'static Topic,
    part: ContentPart,
    problem_index: usize,
) -> Result<Option<RegeneratedPart>> {
    let Some(stored) = db.find_content(topic.id).await? else {
        return Ok(None);
    };
    let params = SamplingParams::default();

    match part {
        ContentPart::Example => {
            let example = or_fallback(
                async {
                    let raw = generators
                        .primary
                        .generate(&prompts::worked_example(topic), params)
                        .await?;
                    extract::extract_json::<WorkedExample>(&raw)
                        .ok_or_eyre("worked-example output had no parseable JSON object")
                },
                fallback::example(topic),
                "worked example",
            )
            .await;

            db.update_example(topic.id, &example).await?;
            Ok(Some(RegeneratedPart::Example(example)))
        }
        ContentPart::PracticeProblem => {
            let entry = or_fallback(
                async {
                    let raw = generators
                        .primary
                        .generate(&prompts::graded_question(topic, Difficulty::Medium), params)
                        .await?;
                    let generated: GeneratedQuestion = extract::extract_json(&raw)
                        .ok_or_eyre("practice-problem output had no parseable JSON object")?;
                    Ok(QuestionEntry::from_generated(
                        topic.id,
                        generated,
                        generators.primary.name(),
                    ))
                },
                fallback::practice_question(topic),
                "practice problem",
            )
            .await;

            let mut problems = stored.practice_problems;
            if problems.is_empty() {
                problems.push(entry.clone());
            } else {
                let index = problem_index.min(problems.len() - 1);
                problems[index] = entry.clone();
            }
            db.update_practice_problems(topic.id, &problems).await?;

            Ok(Some(RegeneratedPart::PracticeProblem(entry)))
        }
    }
}
