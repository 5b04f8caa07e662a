use chrono::Utc;
use color_eyre::Result;
use libsql::params;
use serde::Deserialize;
use ulid::Ulid;

use super::helpers::query_optional;
use super::Db;
use crate::models::{ContentRecord, QuestionBankRecord};

#[derive(Deserialize)]
struct BackupRow {
    content: String,
    question_bank: String,
}

impl Db {
    /// Snapshot the full content and question-bank collections into one
    /// timestamped archive row. Returns the backup id.
    pub async fn backup_all(&self) -> Result<String> {
        let content = self.all_content().await?;
        let banks = self.all_banks().await?;

        let backup_id = Ulid::new().to_string();
        let conn = self.db.connect()?;
        conn.execute(
            "INSERT INTO content_backups (id, created_at, content, question_bank)
             VALUES (?, ?, ?, ?)",
            params![
                backup_id.as_str(),
                Utc::now().to_rfc3339(),
                serde_json::to_string(&content)?,
                serde_json::to_string(&banks)?,
            ],
        )
        .await?;

        tracing::info!(
            "backup {backup_id} archived {} content record(s) and {} bank(s)",
            content.len(),
            banks.len()
        );
        Ok(backup_id)
    }

    pub async fn find_backup(
        &self,
        backup_id: &str,
    ) -> Result<Option<(Vec<ContentRecord>, Vec<QuestionBankRecord>)>> {
        let conn = self.db.connect()?;
        let row = query_optional::<BackupRow>(
            &conn,
            "SELECT content, question_bank FROM content_backups WHERE id = ?",
            params![backup_id],
        )
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some((
            serde_json::from_str(&row.content)?,
            serde_json::from_str(&row.question_bank)?,
        )))
    }
}
