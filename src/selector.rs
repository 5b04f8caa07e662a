//! Read-time selection of a presentation subset from a topic's pool.
//!
//! Policy is fixed: difficulty diversity first, then pure quality rank.
//! Only `k` is a parameter.

use crate::models::{Difficulty, QuestionEntry};

/// Pick at most `k` questions from the pool: the best-quality entry of
/// each difficulty bucket first (easy, medium, hard), then the remainder
/// by quality rank, never repeating an id and never exceeding `k`.
///
/// The sort is stable, so equal scores keep their pool order and the
/// result is deterministic for a given input.
pub fn select_top_k(questions: &[QuestionEntry], k: usize) -> Vec<QuestionEntry> {
    if k == 0 || questions.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&QuestionEntry> = questions.iter().collect();
    ranked.sort_by(|a, b| {
        b.quality_score
            .partial_cmp(&a.quality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut selected: Vec<&QuestionEntry> = Vec::with_capacity(k);

    for difficulty in Difficulty::ALL {
        if selected.len() == k {
            break;
        }
        if let Some(best) = ranked.iter().find(|q| q.difficulty == difficulty) {
            if !selected.iter().any(|s| s.id == best.id) {
                selected.push(best);
            }
        }
    }

    for candidate in &ranked {
        if selected.len() == k {
            break;
        }
        if !selected.iter().any(|s| s.id == candidate.id) {
            selected.push(candidate);
        }
    }

    selected.truncate(k);
    selected.into_iter().cloned().collect()
}
