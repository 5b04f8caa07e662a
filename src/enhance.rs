//! Enhancement engine: the maintenance pass that rewrites low-quality
//! bank entries in place and tops the pool up to a target size.
//!
//! One invocation covers one topic. The pipeline is linear: load, stage
//! replacements, stage new questions, commit once, report. There is no
//! retry and no rollback; partial success is the accepted steady state
//! and the counts report it transparently.

use color_eyre::Result;
use futures::future::join_all;

use crate::catalog::Topic;
use crate::db::Db;
use crate::extract;
use crate::generate::{prompts, GeneratorPool, SamplingParams, TextGenerator};
use crate::models::{
    Difficulty, EnhanceOptions, EnhanceOutcome, EntryContent, GeneratedQuestion, QuestionEntry,
};
use crate::names;

pub async fn run_enhancement(
    db: &Db,
    generators: &GeneratorPool,
    topic: &'static Topic,
    options: EnhanceOptions,
) -> Result<EnhanceOutcome> {
    let bank = db.bank(topic.id).await?;
    let pool_size = bank.questions.len();

    // Stage content replacements for the worst entries. Each attempt is
    // isolated: a failed generation or parse leaves its entry untouched
    // and the batch moves on.
    let mut replacements: Vec<(String, EntryContent)> = Vec::new();
    if options.enhance_existing {
        let candidates: Vec<&QuestionEntry> = bank
            .questions
            .iter()
            .filter(|q| q.quality_score < names::ENHANCE_QUALITY_THRESHOLD)
            .take(names::ENHANCE_BATCH_LIMIT)
            .collect();

        let attempts = join_all(
            candidates
                .iter()
                .map(|entry| improve_entry(generators, topic, entry)),
        )
        .await;

        for (entry, improved) in candidates.iter().zip(attempts) {
            match improved {
                Some(content) => replacements.push((entry.id.clone(), content)),
                None => tracing::warn!(
                    "entry {} left unchanged: generator output unusable",
                    entry.id
                ),
            }
        }
    }

    // Top up to the target with provenance-diverse new questions. Failed
    // slots are dropped; under-filling is fine.
    let mut new_entries: Vec<QuestionEntry> = Vec::new();
    if options.add_new && pool_size < options.target_count {
        let needed = options.target_count - pool_size;
        let slots = join_all((0..needed).map(|slot| topup_question(generators, topic, slot))).await;
        new_entries.extend(slots.into_iter().flatten());

        if let Some(specialist) = &generators.specialist {
            if let Some(entry) = specialist_question(specialist.as_ref(), topic).await {
                new_entries.push(entry);
            }
        }
    }

    db.commit_enhancement(topic.id, &replacements, &new_entries)
        .await?;

    let total_after = db.bank_question_count(topic.id).await? as usize;
    let outcome = EnhanceOutcome {
        enhanced: replacements.len(),
        added: new_entries.len(),
        total_after,
    };

    tracing::info!(
        "enhancement for {}: {} rewritten, {} added, {} in pool",
        topic.id,
        outcome.enhanced,
        outcome.added,
        outcome.total_after
    );
    Ok(outcome)
}

/// Build the improved content for one low-quality entry. Identity and
/// usage fields never appear here; the replacement is content-only, with
/// the entry's own values backfilling whatever the generator omitted.
async fn improve_entry(
    generators: &GeneratorPool,
    topic: &'static Topic,
    entry: &QuestionEntry,
) -> Option<EntryContent> {
    let prompt = prompts::improve_question(topic.title, entry);
    let raw = match generators
        .primary
        .generate(&prompt, SamplingParams::default())
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("improve generation failed for entry {}: {e}", entry.id);
            return None;
        }
    };

    let improved: GeneratedQuestion = extract::extract_json(&raw)?;
    let quality_score = improved
        .quality_score
        .unwrap_or(names::DEFAULT_ENHANCED_QUALITY)
        .min(1.0);

    Some(EntryContent {
        problem: improved.problem,
        answer: improved.answer,
        hint: improved.hint.or_else(|| entry.hint.clone()),
        solution: if improved.solution.is_empty() {
            entry.solution.clone()
        } else {
            improved.solution
        },
        difficulty: improved.difficulty.unwrap_or(entry.difficulty),
        tags: entry.tags.clone(),
        question_type: entry.question_type,
        options: if improved.options.is_empty() {
            entry.options.clone()
        } else {
            improved.options
        },
        correct_option: improved.correct_option.or_else(|| entry.correct_option.clone()),
        quality_score,
    })
}

/// One top-up slot. Even slots ask the primary backend for a graded JSON
/// question at a rotating difficulty; odd slots ask the secondary backend
/// for an exam-style question in the bracketed format. Temperature steps
/// up with the slot index.
async fn topup_question(
    generators: &GeneratorPool,
    topic: &'static Topic,
    slot: usize,
) -> Option<QuestionEntry> {
    let params = SamplingParams::for_slot(slot);

    if slot % 2 == 0 {
        let difficulty = Difficulty::ALL[(slot / 2) % Difficulty::ALL.len()];
        let raw = match generators
            .primary
            .generate(&prompts::graded_question(topic, difficulty), params)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("top-up slot {slot} failed on {}: {e}", generators.primary.name());
                return None;
            }
        };
        let generated: GeneratedQuestion = extract::extract_json(&raw)?;
        Some(QuestionEntry::from_generated(
            topic.id,
            generated,
            generators.primary.name(),
        ))
    } else {
        let raw = match generators
            .secondary
            .generate(&prompts::challenge_question(topic), params)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("top-up slot {slot} failed on {}: {e}", generators.secondary.name());
                return None;
            }
        };
        let exam = extract::extract_bracketed_fields(&raw)?;
        Some(QuestionEntry::from_exam(
            topic.id,
            exam,
            generators.secondary.name(),
        ))
    }
}

async fn specialist_question(
    specialist: &dyn TextGenerator,
    topic: &'static Topic,
) -> Option<QuestionEntry> {
    let raw = match specialist
        .generate(&prompts::challenge_question(topic), SamplingParams::default())
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("specialist question failed on {}: {e}", specialist.name());
            return None;
        }
    };

    let exam = extract::extract_bracketed_fields(&raw)?;
    Some(QuestionEntry::from_exam(topic.id, exam, specialist.name()))
}
