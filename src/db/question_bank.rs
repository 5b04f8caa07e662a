use chrono::Utc;
use color_eyre::Result;
use libsql::params;

use super::helpers::{query_all, query_count, query_optional};
use super::models::{parse_ts, BankMetaRow, BankQuestionRow};
use super::Db;
use crate::models::{EntryContent, QuestionBankRecord, QuestionEntry};

const QUESTION_COLUMNS: &str = "id, problem, answer, hint, solution, difficulty, tags, \
     quality_score, created_by, question_type, options, correct_option, \
     created_at, last_used, usage_count, user_ratings";

impl Db {
    /// Load a topic's full question pool. Topics without a bank yet get the
    /// empty record shape, not an error.
    pub async fn bank(&self, topic_id: &str) -> Result<QuestionBankRecord> {
        let conn = self.db.connect()?;

        let meta = query_optional::<BankMetaRow>(
            &conn,
            "SELECT topic_id, created_at, last_updated FROM question_banks WHERE topic_id = ?",
            params![topic_id],
        )
        .await?;

        let Some(meta) = meta else {
            return Ok(QuestionBankRecord::empty(topic_id));
        };

        let rows = query_all::<BankQuestionRow>(
            &conn,
            &format!(
                "SELECT {QUESTION_COLUMNS} FROM bank_questions WHERE topic_id = ? ORDER BY rowid"
            ),
            params![topic_id],
        )
        .await?;

        let questions = rows
            .into_iter()
            .map(BankQuestionRow::into_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(QuestionBankRecord {
            topic_id: meta.topic_id,
            questions,
            created_at: parse_ts(&meta.created_at)?,
            last_updated: parse_ts(&meta.last_updated)?,
        })
    }

    pub async fn bank_question_count(&self, topic_id: &str) -> Result<i64> {
        let conn = self.db.connect()?;
        query_count(
            &conn,
            "SELECT COUNT(*) FROM bank_questions WHERE topic_id = ?",
            params![topic_id],
        )
        .await
    }

    /// Merge new entries into a topic's pool, creating the bank row on
    /// first use. Entries land as fresh rows, so concurrent appends for
    /// the same topic never overwrite each other.
    pub async fn append_questions(
        &self,
        topic_id: &str,
        entries: &[QuestionEntry],
    ) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        // Plain row inserts, no multi-statement transaction: concurrent
        // appends for one topic interleave freely without lock contention
        // and cannot overwrite each other.
        let conn = self.db.connect()?;
        upsert_bank_row(&conn, topic_id).await?;
        for entry in entries {
            insert_entry(&conn, topic_id, entry).await?;
        }

        tracing::info!(
            "appended {} question(s) to bank for topic {topic_id}",
            entries.len()
        );
        Ok(())
    }

    /// Overwrite the content fields of one entry, keyed by id. Identity and
    /// usage columns are not in the UPDATE and cannot change. An unknown id
    /// is a no-op: enhancement may race a concurrent regeneration.
    pub async fn replace_entry(
        &self,
        topic_id: &str,
        entry_id: &str,
        content: &EntryContent,
    ) -> Result<()> {
        let conn = self.db.connect()?;
        let affected = update_entry_content(&conn, topic_id, entry_id, content).await?;

        if affected == 0 {
            tracing::debug!("replace_entry missed: no entry {entry_id} in topic {topic_id}");
        }
        Ok(())
    }

    /// Apply one enhancement run's staged replacements and appended entries
    /// as a single logical update, bumping `last_updated` once.
    pub async fn commit_enhancement(
        &self,
        topic_id: &str,
        replacements: &[(String, EntryContent)],
        new_entries: &[QuestionEntry],
    ) -> Result<()> {
        if replacements.is_empty() && new_entries.is_empty() {
            return Ok(());
        }

        let conn = self.db.connect()?;
        let tx = conn.transaction().await?;

        upsert_bank_row(&tx, topic_id).await?;
        for (entry_id, content) in replacements {
            let affected = update_entry_content(&tx, topic_id, entry_id, content).await?;
            if affected == 0 {
                tracing::debug!(
                    "enhancement replacement missed entry {entry_id} in topic {topic_id}"
                );
            }
        }
        for entry in new_entries {
            insert_entry(&tx, topic_id, entry).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Usage tracking: bump the served counter and freshness timestamp.
    pub async fn touch_usage(&self, topic_id: &str, entry_id: &str) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "UPDATE bank_questions SET usage_count = usage_count + 1, last_used = ?
             WHERE id = ? AND topic_id = ?",
            params![Utc::now().to_rfc3339(), entry_id, topic_id],
        )
        .await?;
        Ok(())
    }

    pub async fn rate_entry(&self, topic_id: &str, entry_id: &str, rating: i64) -> Result<()> {
        let conn = self.db.connect()?;
        conn.execute(
            "UPDATE bank_questions SET user_ratings = json_insert(user_ratings, '$[#]', ?)
             WHERE id = ? AND topic_id = ?",
            params![rating, entry_id, topic_id],
        )
        .await?;
        Ok(())
    }

    pub async fn all_banks(&self) -> Result<Vec<QuestionBankRecord>> {
        let conn = self.db.connect()?;
        let metas = query_all::<BankMetaRow>(
            &conn,
            "SELECT topic_id, created_at, last_updated FROM question_banks ORDER BY topic_id",
            (),
        )
        .await?;

        let mut banks = Vec::with_capacity(metas.len());
        for meta in metas {
            banks.push(self.bank(&meta.topic_id).await?);
        }
        Ok(banks)
    }
}

async fn upsert_bank_row(conn: &libsql::Connection, topic_id: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO question_banks (topic_id, created_at, last_updated) VALUES (?, ?, ?)
         ON CONFLICT(topic_id) DO UPDATE SET last_updated = excluded.last_updated",
        params![topic_id, now.as_str(), now.as_str()],
    )
    .await?;
    Ok(())
}

async fn insert_entry(
    conn: &libsql::Connection,
    topic_id: &str,
    entry: &QuestionEntry,
) -> Result<()> {
    let options = if entry.options.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&entry.options)?)
    };

    conn.execute(
        &format!(
            "INSERT INTO bank_questions (topic_id, {QUESTION_COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ),
        params![
            topic_id,
            entry.id.as_str(),
            entry.problem.as_str(),
            entry.answer.as_str(),
            entry.hint.as_deref(),
            entry.solution.as_str(),
            entry.difficulty.as_str(),
            serde_json::to_string(&entry.tags)?,
            entry.quality_score,
            entry.created_by.as_str(),
            entry.question_type.as_str(),
            options,
            entry.correct_option.as_deref(),
            entry.created_at.to_rfc3339(),
            entry.last_used.to_rfc3339(),
            entry.usage_count,
            serde_json::to_string(&entry.user_ratings)?,
        ],
    )
    .await?;

    Ok(())
}

async fn update_entry_content(
    conn: &libsql::Connection,
    topic_id: &str,
    entry_id: &str,
    content: &EntryContent,
) -> Result<u64> {
    let options = if content.options.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&content.options)?)
    };

    let affected = conn
        .execute(
            "UPDATE bank_questions
             SET problem = ?, answer = ?, hint = ?, solution = ?, difficulty = ?, tags = ?,
                 question_type = ?, options = ?, correct_option = ?, quality_score = ?
             WHERE id = ? AND topic_id = ?",
            params![
                content.problem.as_str(),
                content.answer.as_str(),
                content.hint.as_deref(),
                content.solution.as_str(),
                content.difficulty.as_str(),
                serde_json::to_string(&content.tags)?,
                content.question_type.as_str(),
                options,
                content.correct_option.as_deref(),
                content.quality_score,
                entry_id,
                topic_id
            ],
        )
        .await?;

    Ok(affected)
}
