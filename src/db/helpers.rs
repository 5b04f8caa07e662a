use color_eyre::{eyre::OptionExt, Result};
use libsql::params::IntoParams;
use serde::de::DeserializeOwned;

// Thin wrappers over libsql row streams: every query in the data layer
// goes through one of these so row decoding stays in one place.

/// Run a query and deserialize every row into `T`.
pub async fn query_all<T: DeserializeOwned>(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<Vec<T>> {
    let mut rows = conn.query(sql, params).await?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        out.push(libsql::de::from_row::<T>(&row)?);
    }
    Ok(out)
}

/// Run a query expected to produce at least one row; deserialize the first.
pub async fn query_one<T: DeserializeOwned>(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<T> {
    let row = conn
        .query(sql, params)
        .await?
        .next()
        .await?
        .ok_or_eyre("query returned no rows")?;
    Ok(libsql::de::from_row::<T>(&row)?)
}

/// Run a query and deserialize the first row, or `None` when it produced no rows.
pub async fn query_optional<T: DeserializeOwned>(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<Option<T>> {
    match conn.query(sql, params).await?.next().await? {
        Some(row) => Ok(Some(libsql::de::from_row::<T>(&row)?)),
        None => Ok(None),
    }
}

/// Fetch a single integer scalar (COUNT and friends) from the first row.
pub async fn query_count(
    conn: &libsql::Connection,
    sql: &str,
    params: impl IntoParams,
) -> Result<i64> {
    let row = conn
        .query(sql, params)
        .await?
        .next()
        .await?
        .ok_or_eyre("query returned no rows")?;
    Ok(row.get::<i64>(0)?)
}
