// Database module - provides data access layer

use std::sync::Arc;

use color_eyre::{eyre::OptionExt, Result};

// Re-export row models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod schema;
mod helpers;
mod content;
mod question_bank;
mod progress;
mod backup;
mod report;

// Main database handle
#[derive(Clone)]
pub struct Db {
    db: Arc<libsql::Database>,
}

impl Db {
    /// Open a local `file:` database or a remote Turso database and make
    /// sure the schema exists.
    pub async fn new(url: String, auth_token: String) -> Result<Self> {
        let db = if let Some(path) = url.strip_prefix("file:") {
            libsql::Builder::new_local(path).build().await?
        } else {
            libsql::Builder::new_remote(url, auth_token).build().await?
        };

        let conn = db.connect()?;

        // Connection check before anything else touches the store.
        let one = conn
            .query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_eyre("connection check returned no rows")?
            .get::<i32>(0)?;
        assert_eq!(one, 1);

        schema::create_schema(&conn).await?;

        tracing::info!("database ready, schema verified");

        Ok(Self { db: Arc::new(db) })
    }
}
