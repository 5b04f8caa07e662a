// Row models: flat shapes as they come back from libsql, converted into
// the domain types at the data-layer boundary. JSON columns and enum
// columns decode here and nowhere else.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::WrapErr, Result};
use serde::Deserialize;

use crate::models::{
    ContentRecord, Difficulty, QuestionEntry, QuestionType, TopicProgress,
};

pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)
        .wrap_err_with(|| format!("invalid stored timestamp: {s}"))?
        .with_timezone(&Utc))
}

#[derive(Deserialize)]
pub struct ContentRow {
    pub topic_id: String,
    pub explanation: String,
    pub summary: String,
    pub example: String,
    pub practice_problems: String,
    pub version: i64,
    pub quality_reviewed: i64,
    pub quality_score: f64,
    pub last_reviewed: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ContentRow {
    pub fn into_record(self) -> Result<ContentRecord> {
        Ok(ContentRecord {
            example: serde_json::from_str(&self.example)?,
            practice_problems: serde_json::from_str(&self.practice_problems)?,
            quality_reviewed: self.quality_reviewed != 0,
            last_reviewed: self.last_reviewed.as_deref().map(parse_ts).transpose()?,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
            topic_id: self.topic_id,
            explanation: self.explanation,
            summary: self.summary,
            version: self.version,
            quality_score: self.quality_score,
        })
    }
}

#[derive(Deserialize)]
pub struct BankMetaRow {
    pub topic_id: String,
    pub created_at: String,
    pub last_updated: String,
}

#[derive(Deserialize)]
pub struct BankQuestionRow {
    pub id: String,
    pub problem: String,
    pub answer: String,
    pub hint: Option<String>,
    pub solution: String,
    pub difficulty: String,
    pub tags: String,
    pub quality_score: f64,
    pub created_by: String,
    pub question_type: String,
    pub options: Option<String>,
    pub correct_option: Option<String>,
    pub created_at: String,
    pub last_used: String,
    pub usage_count: i64,
    pub user_ratings: String,
}

impl BankQuestionRow {
    pub fn into_entry(self) -> Result<QuestionEntry> {
        Ok(QuestionEntry {
            difficulty: Difficulty::parse(&self.difficulty).unwrap_or(Difficulty::Medium),
            question_type: QuestionType::parse(&self.question_type)
                .unwrap_or(QuestionType::FullSolution),
            tags: serde_json::from_str(&self.tags)?,
            options: match self.options.as_deref() {
                Some(raw) => serde_json::from_str(raw)?,
                None => Vec::new(),
            },
            user_ratings: serde_json::from_str(&self.user_ratings)?,
            created_at: parse_ts(&self.created_at)?,
            last_used: parse_ts(&self.last_used)?,
            id: self.id,
            problem: self.problem,
            answer: self.answer,
            hint: self.hint,
            solution: self.solution,
            quality_score: self.quality_score,
            created_by: self.created_by,
            correct_option: self.correct_option,
            usage_count: self.usage_count,
        })
    }
}

#[derive(Deserialize)]
pub struct StatsRow {
    pub total_topics: i64,
    pub reviewed_topics: i64,
    pub avg_version: f64,
    pub total_questions: i64,
    pub avg_quality: f64,
}

#[derive(Deserialize)]
pub struct TopicIdRow {
    pub topic_id: String,
}

#[derive(Deserialize)]
pub struct ProgressRow {
    pub topic_id: String,
    pub attempts: i64,
    pub correct: i64,
    pub streak: i64,
    pub best_streak: i64,
    pub mastery_level: i64,
    pub completed: i64,
    pub updated_at: String,
}

impl ProgressRow {
    pub fn into_progress(self) -> Result<TopicProgress> {
        Ok(TopicProgress {
            completed: self.completed != 0,
            updated_at: parse_ts(&self.updated_at)?,
            topic_id: self.topic_id,
            attempts: self.attempts,
            correct: self.correct,
            streak: self.streak,
            best_streak: self.best_streak,
            mastery_level: self.mastery_level,
        })
    }
}
