use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Difficulty> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    MultipleChoice,
    FullSolution,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multipleChoice",
            QuestionType::FullSolution => "fullSolution",
        }
    }

    pub fn parse(s: &str) -> Option<QuestionType> {
        match s {
            "multipleChoice" => Some(QuestionType::MultipleChoice),
            "fullSolution" => Some(QuestionType::FullSolution),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McqOption {
    pub label: String,
    pub text: String,
}

/// One practice question in a topic's bank. `id` is the stable merge key:
/// enhancement rewrites content fields in place but never touches `id`,
/// `created_at`, `last_used`, `usage_count` or `user_ratings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionEntry {
    pub id: String,
    pub problem: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub solution: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub quality_score: f64,
    pub created_by: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<McqOption>,
    #[serde(default)]
    pub correct_option: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_used: DateTime<Utc>,
    pub usage_count: i64,
    #[serde(default)]
    pub user_ratings: Vec<i64>,
}

/// The content-only fields of a bank entry; the slice an enhancement
/// replacement is allowed to touch. Identity and usage bookkeeping live
/// outside this struct and survive every replacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryContent {
    pub problem: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub solution: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<McqOption>,
    #[serde(default)]
    pub correct_option: Option<String>,
    pub quality_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkedExample {
    pub problem: String,
    pub solution: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub marks: Option<u32>,
}

/// The cached lesson for one topic. `practice_problems` is the snapshot
/// minted at creation time; the live pool lives in the question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub topic_id: String,
    pub explanation: String,
    pub summary: String,
    pub example: WorkedExample,
    pub practice_problems: Vec<QuestionEntry>,
    pub version: i64,
    pub quality_reviewed: bool,
    pub quality_score: f64,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuestionEntry {
    /// Promote a JSON-generated question to a bank entry with a fresh id
    /// and defaulted bookkeeping fields.
    pub fn from_generated(topic_id: &str, generated: GeneratedQuestion, created_by: &str) -> Self {
        let now = Utc::now();
        let mut tags = vec![topic_id.to_string()];
        let question_type = generated.question_type.unwrap_or({
            if generated.options.is_empty() {
                QuestionType::FullSolution
            } else {
                QuestionType::MultipleChoice
            }
        });
        if question_type == QuestionType::MultipleChoice {
            tags.push("mcq".to_string());
        }
        let solution = if generated.solution.is_empty() {
            generated.answer.clone()
        } else {
            generated.solution
        };
        Self {
            id: ulid::Ulid::new().to_string(),
            problem: generated.problem,
            answer: generated.answer,
            hint: generated.hint,
            solution,
            difficulty: generated.difficulty.unwrap_or(Difficulty::Medium),
            tags,
            quality_score: generated
                .quality_score
                .unwrap_or(crate::names::UNSCORED_QUALITY)
                .clamp(0.0, 1.0),
            created_by: created_by.to_string(),
            question_type,
            options: generated.options,
            correct_option: generated.correct_option,
            created_at: now,
            last_used: now,
            usage_count: 0,
            user_ratings: Vec::new(),
        }
    }

    /// Promote a bracketed-grammar exam question to a bank entry.
    /// Difficulty is inferred from the mark weight.
    pub fn from_exam(topic_id: &str, exam: ExamQuestion, created_by: &str) -> Self {
        let now = Utc::now();
        let difficulty = match exam.marks {
            0..=3 => Difficulty::Easy,
            4..=6 => Difficulty::Medium,
            _ => Difficulty::Hard,
        };
        let mut tags = vec![topic_id.to_string(), "exam-style".to_string()];
        if exam.question_type == QuestionType::MultipleChoice {
            tags.push("mcq".to_string());
        }
        Self {
            id: ulid::Ulid::new().to_string(),
            problem: exam.question,
            answer: exam.answer.clone(),
            hint: Some(exam.hint),
            solution: exam.answer,
            difficulty,
            tags,
            quality_score: crate::names::UNSCORED_QUALITY,
            created_by: created_by.to_string(),
            question_type: exam.question_type,
            options: exam.options,
            correct_option: exam.correct_option,
            created_at: now,
            last_used: now,
            usage_count: 0,
            user_ratings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBankRecord {
    pub topic_id: String,
    pub questions: Vec<QuestionEntry>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl QuestionBankRecord {
    /// The empty-record shape returned for topics with no bank yet.
    pub fn empty(topic_id: &str) -> Self {
        let now = Utc::now();
        Self {
            topic_id: topic_id.to_string(),
            questions: Vec::new(),
            created_at: now,
            last_updated: now,
        }
    }
}

/// Parsed output of the bracketed exam-question grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamQuestion {
    pub topic: String,
    pub question_type: QuestionType,
    pub question: String,
    pub marks: u32,
    pub answer: String,
    pub hint: String,
    pub options: Vec<McqOption>,
    pub correct_option: Option<String>,
}

/// One question as produced by a JSON-emitting generator, before it is
/// promoted to a bank entry. Everything beyond problem/answer is optional
/// because generator output is unreliable.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub problem: String,
    pub answer: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub options: Vec<McqOption>,
    #[serde(default)]
    pub correct_option: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSetPayload {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceOptions {
    #[serde(default = "default_true")]
    pub enhance_existing: bool,
    #[serde(default = "default_true")]
    pub add_new: bool,
    #[serde(default = "default_target_count")]
    pub target_count: usize,
}

fn default_true() -> bool {
    true
}

fn default_target_count() -> usize {
    crate::names::DEFAULT_BANK_TARGET
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            enhance_existing: true,
            add_new: true,
            target_count: crate::names::DEFAULT_BANK_TARGET,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceOutcome {
    pub enhanced: usize,
    pub added: usize,
    pub total_after: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub total_topics: i64,
    pub reviewed_topics: i64,
    pub avg_version: f64,
    pub total_questions: i64,
    pub avg_quality: f64,
    pub topics_needing_attention: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic_id: String,
    pub attempts: i64,
    pub correct: i64,
    pub streak: i64,
    pub best_streak: i64,
    pub mastery_level: i64,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

impl TopicProgress {
    pub fn empty(topic_id: &str) -> Self {
        Self {
            topic_id: topic_id.to_string(),
            attempts: 0,
            correct: 0,
            streak: 0,
            best_streak: 0,
            mastery_level: 0,
            completed: false,
            updated_at: Utc::now(),
        }
    }
}
