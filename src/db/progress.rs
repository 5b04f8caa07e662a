use chrono::Utc;
use color_eyre::Result;
use libsql::params;

use super::helpers::query_optional;
use super::models::ProgressRow;
use super::Db;
use crate::models::TopicProgress;
use crate::names;

impl Db {
    pub async fn progress(&self, topic_id: &str) -> Result<TopicProgress> {
        let conn = self.db.connect()?;
        let row = query_optional::<ProgressRow>(
            &conn,
            "SELECT topic_id, attempts, correct, streak, best_streak, mastery_level,
                    completed, updated_at
             FROM user_progress WHERE topic_id = ?",
            params![topic_id],
        )
        .await?;

        match row {
            Some(row) => row.into_progress(),
            None => Ok(TopicProgress::empty(topic_id)),
        }
    }

    /// Counter bookkeeping for one answered question. Mastery is the floor
    /// of the accuracy percentage.
    pub async fn record_attempt(&self, topic_id: &str, correct: bool) -> Result<TopicProgress> {
        let mut progress = self.progress(topic_id).await?;

        progress.attempts += 1;
        if correct {
            progress.correct += 1;
            progress.streak += 1;
            progress.best_streak = progress.best_streak.max(progress.streak);
        } else {
            progress.streak = 0;
        }
        progress.mastery_level = progress.correct * 100 / progress.attempts;
        progress.completed = progress.mastery_level >= names::MASTERY_COMPLETED_LEVEL
            && progress.attempts >= names::MASTERY_MIN_ATTEMPTS;
        progress.updated_at = Utc::now();

        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO user_progress (topic_id, attempts, correct, streak, best_streak,
                                        mastery_level, completed, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(topic_id) DO UPDATE SET
                 attempts = excluded.attempts,
                 correct = excluded.correct,
                 streak = excluded.streak,
                 best_streak = excluded.best_streak,
                 mastery_level = excluded.mastery_level,
                 completed = excluded.completed,
                 updated_at = excluded.updated_at",
            params![
                progress.topic_id.as_str(),
                progress.attempts,
                progress.correct,
                progress.streak,
                progress.best_streak,
                progress.mastery_level,
                progress.completed as i64,
                progress.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        Ok(progress)
    }
}
