//! Deterministic fallback content. Served whenever a generator call fails
//! or its output cannot be extracted, so a lesson page always renders
//! something teachable rather than an error placeholder.

use crate::catalog::Topic;
use crate::models::{Difficulty, GeneratedQuestion, QuestionEntry, WorkedExample};
use crate::names;

pub const FALLBACK_PROVENANCE: &str = "fallback";

pub fn explanation(topic: &Topic) -> String {
    format!(
        "<h3>{title}</h3>\
         <p>{description}</p>\
         <p>This lesson could not be generated right now, so here is the short version. \
         Start by reading the statement of each definition carefully and restating it in \
         your own words. Then work through the practice problems below: attempt each one \
         before looking at its solution, and compare your reasoning step by step.</p>\
         <p>When you can solve a problem without the hint, move on to the next difficulty. \
         Revisit this page later for the full explanation.</p>",
        title = topic.title,
        description = topic.description,
    )
}

pub fn summary(topic: &Topic) -> String {
    format!(
        "{title}: {description} Master the core definition first, practise the standard \
         technique on simple cases, then apply it to exam-style problems.",
        title = topic.title,
        description = topic.description,
    )
}

pub fn example(topic: &Topic) -> WorkedExample {
    WorkedExample {
        problem: format!(
            "Work through the canonical textbook example for {}. State what is given, what \
             is asked, and which rule applies.",
            topic.title
        ),
        solution: "Identify the quantities involved, choose the applicable rule, apply it \
             carefully, and verify the result against the original question."
            .to_string(),
        steps: vec![
            "Write down what is given and what is asked.".to_string(),
            "Choose the rule or definition that connects them.".to_string(),
            "Apply it, keeping each algebraic step explicit.".to_string(),
            "Check the answer by substitution or a sanity estimate.".to_string(),
        ],
        marks: Some(names::DEFAULT_MARKS),
    }
}

/// Single-question fallback for the part-regeneration path.
pub fn practice_question(topic: &Topic) -> QuestionEntry {
    practice_questions(topic).swap_remove(1)
}

pub fn practice_questions(topic: &Topic) -> Vec<QuestionEntry> {
    let blueprints = [
        (
            Difficulty::Easy,
            format!("State the key definition introduced in {}.", topic.title),
            "See the lesson text for the definition.".to_string(),
            "Start from the formal statement, then give an example.".to_string(),
        ),
        (
            Difficulty::Medium,
            format!(
                "Apply the main technique from {} to a simple function of your choice and \
                 show every step.",
                topic.title
            ),
            "Any correct, fully justified application earns full marks.".to_string(),
            "Pick the simplest function the technique applies to.".to_string(),
        ),
        (
            Difficulty::Hard,
            format!(
                "Construct an example where a naive application of the ideas from {} fails, \
                 and explain what goes wrong.",
                topic.title
            ),
            "Look at boundary cases where the hypotheses are violated.".to_string(),
            "Check each hypothesis of the theorem one at a time.".to_string(),
        ),
    ];

    blueprints
        .into_iter()
        .map(|(difficulty, problem, solution, hint)| {
            QuestionEntry::from_generated(
                topic.id,
                GeneratedQuestion {
                    answer: solution.clone(),
                    problem,
                    hint: Some(hint),
                    solution,
                    difficulty: Some(difficulty),
                    quality_score: None,
                    question_type: None,
                    options: Vec::new(),
                    correct_option: None,
                },
                FALLBACK_PROVENANCE,
            )
        })
        .collect()
}
