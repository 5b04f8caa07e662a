#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use calcprep::db::Db;
use calcprep::generate::{GeneratorPool, SamplingParams, TextGenerator};

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("calcprep_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("file:{}", path.display());
    Db::new(url, String::new())
        .await
        .expect("failed to create test database")
}

/// Bare bank entry for fixtures; content fields derive from the id.
#[allow(dead_code)]
pub fn entry(
    id: &str,
    difficulty: calcprep::models::Difficulty,
    quality_score: f64,
) -> calcprep::models::QuestionEntry {
    use calcprep::models::{QuestionEntry, QuestionType};
    let now = chrono::Utc::now();
    QuestionEntry {
        id: id.to_string(),
        problem: format!("problem {id}"),
        answer: format!("answer {id}"),
        hint: None,
        solution: format!("solution {id}"),
        difficulty,
        tags: vec!["fixture".to_string()],
        quality_score,
        created_by: "fixture".to_string(),
        question_type: QuestionType::FullSolution,
        options: Vec::new(),
        correct_option: None,
        created_at: now,
        last_used: now,
        usage_count: 0,
        user_ratings: Vec::new(),
    }
}

/// Minimal content record for fixtures; no practice snapshot.
#[allow(dead_code)]
pub fn content_record(topic_id: &str) -> calcprep::models::ContentRecord {
    use calcprep::models::{ContentRecord, WorkedExample};
    let now = chrono::Utc::now();
    ContentRecord {
        topic_id: topic_id.to_string(),
        explanation: format!("explanation for {topic_id}"),
        summary: format!("summary for {topic_id}"),
        example: WorkedExample {
            problem: "Differentiate x^2.".to_string(),
            solution: "2x by the power rule.".to_string(),
            steps: vec!["Apply the power rule.".to_string()],
            marks: Some(4),
        },
        practice_problems: Vec::new(),
        version: 1,
        quality_reviewed: false,
        quality_score: 0.5,
        last_reviewed: None,
        created_at: now,
        updated_at: now,
    }
}

/// Backend driven by a closure over the prompt: tests route on prompt
/// content and inject failures wherever they like.
pub struct FnGenerator {
    name: String,
    respond: Box<dyn Fn(&str, SamplingParams) -> Result<String, String> + Send + Sync>,
}

impl FnGenerator {
    pub fn new(
        name: &str,
        respond: impl Fn(&str, SamplingParams) -> Result<String, String> + Send + Sync + 'static,
    ) -> Arc<dyn TextGenerator> {
        Arc::new(Self {
            name: name.to_string(),
            respond: Box::new(respond),
        })
    }
}

#[async_trait]
impl TextGenerator for FnGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str, params: SamplingParams) -> color_eyre::Result<String> {
        (self.respond)(prompt, params).map_err(|e| color_eyre::eyre::eyre!(e))
    }
}

#[allow(dead_code)]
pub fn pool_of(
    primary: Arc<dyn TextGenerator>,
    secondary: Arc<dyn TextGenerator>,
) -> GeneratorPool {
    GeneratorPool::new(primary, secondary, None)
}

/// Pool whose every backend errors: exercises the full-fallback path.
#[allow(dead_code)]
pub fn failing_pool() -> GeneratorPool {
    GeneratorPool::new(
        FnGenerator::new("down-primary", |_, _| Err("backend offline".to_string())),
        FnGenerator::new("down-secondary", |_, _| Err("backend offline".to_string())),
        None,
    )
}

/// Pool answering every request with plausible well-formed output:
/// JSON-object prompts get matching JSON, exam prompts get the bracketed
/// format, prose prompts get prose.
#[allow(dead_code)]
pub fn healthy_pool() -> GeneratorPool {
    GeneratorPool::new(
        FnGenerator::new("mock-primary", |prompt, _| Ok(canned_response(prompt))),
        FnGenerator::new("mock-secondary", |prompt, _| Ok(canned_response(prompt))),
        None,
    )
}

#[allow(dead_code)]
pub fn canned_response(prompt: &str) -> String {
    if prompt.contains("\"questions\"") {
        r#"Here you go: {"questions": [
            {"problem": "Compute f'(x) for f(x) = x^2.", "answer": "2x",
             "hint": "Use the power rule.", "solution": "Apply the power rule: f'(x) = 2x.",
             "difficulty": "easy"},
            {"problem": "Differentiate g(x) = x^3 - 4x.", "answer": "3x^2 - 4",
             "hint": "Differentiate term by term.", "solution": "g'(x) = 3x^2 - 4.",
             "difficulty": "medium"},
            {"problem": "Find where h(x) = x^3 - 3x has horizontal tangents.", "answer": "x = ±1",
             "hint": "Set h'(x) = 0.", "solution": "h'(x) = 3x^2 - 3 = 0 gives x = ±1.",
             "difficulty": "hard"}
        ]}"#
        .to_string()
    } else if prompt.contains("Respond in exactly this format") {
        "[Topic: Differentiation]\n\
         [Question Type: Full Solution]\n\
         [Question: Differentiate f(x) = x^4 - 2x using first principles.]\n\
         [Mark: 8 marks]\n\
         [Answer: 4x^3 - 2]\n\
         [Hint: Expand (x+h)^4 carefully.]"
            .to_string()
    } else if prompt.contains("\"steps\"") {
        r#"{"problem": "Differentiate f(x) = 3x^2.", "solution": "f'(x) = 6x by the power rule.",
            "steps": ["Apply the power rule to 3x^2.", "Multiply down the exponent: 6x."],
            "marks": 4}"#
            .to_string()
    } else if prompt.contains("\"problem\"") {
        r#"{"problem": "Differentiate y = 5x^3.", "answer": "15x^2",
            "hint": "Power rule.", "solution": "y' = 15x^2.", "difficulty": "medium"}"#
            .to_string()
    } else {
        "The derivative measures an instantaneous rate of change.".to_string()
    }
}
