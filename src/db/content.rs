use chrono::Utc;
use color_eyre::Result;
use libsql::params;

use super::helpers::{query_all, query_optional};
use super::models::ContentRow;
use super::Db;
use crate::models::{ContentRecord, QuestionEntry, WorkedExample};

const CONTENT_COLUMNS: &str = "topic_id, explanation, summary, example, practice_problems, \
     version, quality_reviewed, quality_score, last_reviewed, created_at, updated_at";

impl Db {
    pub async fn find_content(&self, topic_id: &str) -> Result<Option<ContentRecord>> {
        let conn = self.db.connect()?;
        let row = query_optional::<ContentRow>(
            &conn,
            &format!("SELECT {CONTENT_COLUMNS} FROM content WHERE topic_id = ?"),
            params![topic_id],
        )
        .await?;

        row.map(ContentRow::into_record).transpose()
    }

    /// Store a freshly generated lesson. Creation-only: when two builds of
    /// the same topic race, the first write wins and the second is dropped.
    pub async fn insert_content(&self, record: &ContentRecord) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            &format!(
                "INSERT INTO content ({CONTENT_COLUMNS})
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(topic_id) DO NOTHING"
            ),
            params![
                record.topic_id.as_str(),
                record.explanation.as_str(),
                record.summary.as_str(),
                serde_json::to_string(&record.example)?,
                serde_json::to_string(&record.practice_problems)?,
                record.version,
                record.quality_reviewed as i64,
                record.quality_score,
                record.last_reviewed.map(|t| t.to_rfc3339()),
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )
        .await?;

        tracing::info!("content stored for topic {}", record.topic_id);
        Ok(())
    }

    pub async fn update_example(&self, topic_id: &str, example: &WorkedExample) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "UPDATE content SET example = ?, version = version + 1, updated_at = ?
             WHERE topic_id = ?",
            params![
                serde_json::to_string(example)?,
                Utc::now().to_rfc3339(),
                topic_id
            ],
        )
        .await?;

        tracing::info!("worked example regenerated for topic {topic_id}");
        Ok(())
    }

    pub async fn update_practice_problems(
        &self,
        topic_id: &str,
        problems: &[QuestionEntry],
    ) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "UPDATE content SET practice_problems = ?, version = version + 1, updated_at = ?
             WHERE topic_id = ?",
            params![
                serde_json::to_string(problems)?,
                Utc::now().to_rfc3339(),
                topic_id
            ],
        )
        .await?;

        tracing::info!("practice problem snapshot updated for topic {topic_id}");
        Ok(())
    }

    pub async fn mark_reviewed(&self, topic_id: &str, quality_score: f64) -> Result<()> {
        let conn = self.db.connect()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "UPDATE content SET quality_reviewed = 1, quality_score = ?, last_reviewed = ?,
                    updated_at = ?
             WHERE topic_id = ?",
            params![quality_score, now.as_str(), now.as_str(), topic_id],
        )
        .await?;

        Ok(())
    }

    pub async fn all_content(&self) -> Result<Vec<ContentRecord>> {
        let conn = self.db.connect()?;
        let rows = query_all::<ContentRow>(
            &conn,
            &format!("SELECT {CONTENT_COLUMNS} FROM content ORDER BY topic_id"),
            (),
        )
        .await?;

        rows.into_iter().map(ContentRow::into_record).collect()
    }
}
