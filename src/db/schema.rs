// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(conn: &libsql::Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS content (
            topic_id TEXT PRIMARY KEY,
            explanation TEXT NOT NULL,
            summary TEXT NOT NULL,
            example TEXT NOT NULL,
            practice_problems TEXT NOT NULL DEFAULT '[]',
            version INTEGER NOT NULL DEFAULT 1,
            quality_reviewed INTEGER NOT NULL DEFAULT 0,
            quality_score REAL NOT NULL DEFAULT 0.5,
            last_reviewed TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS question_banks (
            topic_id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            last_updated TEXT NOT NULL
        )
        "#,
        (),
    )
    .await?;

    // One row per bank entry. Appends never rewrite existing rows, and
    // content replacement is a keyed UPDATE that cannot reach the identity
    // or usage columns.
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS bank_questions (
            id TEXT PRIMARY KEY,
            topic_id TEXT NOT NULL,
            problem TEXT NOT NULL,
            answer TEXT NOT NULL,
            hint TEXT,
            solution TEXT NOT NULL,
            difficulty TEXT NOT NULL DEFAULT 'medium',
            tags TEXT NOT NULL DEFAULT '[]',
            quality_score REAL NOT NULL DEFAULT 0.5,
            created_by TEXT NOT NULL,
            question_type TEXT NOT NULL DEFAULT 'fullSolution',
            options TEXT,
            correct_option TEXT,
            created_at TEXT NOT NULL,
            last_used TEXT NOT NULL,
            usage_count INTEGER NOT NULL DEFAULT 0,
            user_ratings TEXT NOT NULL DEFAULT '[]',
            FOREIGN KEY(topic_id) REFERENCES question_banks(topic_id) ON DELETE CASCADE
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_bank_questions_topic
        ON bank_questions(topic_id)
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS user_progress (
            topic_id TEXT PRIMARY KEY,
            attempts INTEGER NOT NULL DEFAULT 0,
            correct INTEGER NOT NULL DEFAULT 0,
            streak INTEGER NOT NULL DEFAULT 0,
            best_streak INTEGER NOT NULL DEFAULT 0,
            mastery_level INTEGER NOT NULL DEFAULT 0,
            completed INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS content_backups (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            content TEXT NOT NULL,
            question_bank TEXT NOT NULL
        )
        "#,
        (),
    )
    .await?;

    Ok(())
}
