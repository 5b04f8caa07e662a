use color_eyre::Result;
use libsql::params;

use super::helpers::{query_all, query_one};
use super::models::{StatsRow, TopicIdRow};
use super::Db;

impl Db {
    pub async fn content_stats_row(&self) -> Result<StatsRow> {
        let conn = self.db.connect()?;
        query_one::<StatsRow>(
            &conn,
            r#"
            SELECT
                (SELECT COUNT(*) FROM content) AS total_topics,
                (SELECT COUNT(*) FROM content WHERE quality_reviewed = 1) AS reviewed_topics,
                (SELECT COALESCE(AVG(version), 0.0) FROM content) AS avg_version,
                (SELECT COUNT(*) FROM bank_questions) AS total_questions,
                (SELECT COALESCE(AVG(quality_score), 0.0) FROM bank_questions) AS avg_quality
            "#,
            (),
        )
        .await
    }

    /// Topics whose pool is empty or carries any entry below the threshold.
    pub async fn topics_needing_attention(&self, threshold: f64) -> Result<Vec<String>> {
        let conn = self.db.connect()?;
        let rows = query_all::<TopicIdRow>(
            &conn,
            r#"
            SELECT c.topic_id AS topic_id
            FROM content c
            WHERE NOT EXISTS (
                      SELECT 1 FROM bank_questions q WHERE q.topic_id = c.topic_id
                  )
               OR EXISTS (
                      SELECT 1 FROM bank_questions q
                      WHERE q.topic_id = c.topic_id AND q.quality_score < ?
                  )
            ORDER BY c.topic_id
            "#,
            params![threshold],
        )
        .await?;

        Ok(rows.into_iter().map(|r| r.topic_id).collect())
    }
}
