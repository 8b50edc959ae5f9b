use std::path::Path;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;

use crate::models::EventRecord;

/// Opens the tracker database read-only. A missing or unreadable file is
/// reported here rather than at the first query.
pub async fn connect(path: &Path) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true);

    SqlitePool::connect_with(options)
        .await
        .with_context(|| format!("failed to open tracker database {}", path.display()))
}

/// Fetches every event logged in the target year, in table order. The
/// `user_id` column is stored as an integer by the bot; it is cast to text
/// here so callers can treat identifiers as opaque strings.
pub async fn fetch_year_events(pool: &SqlitePool, year: i32) -> anyhow::Result<Vec<EventRecord>> {
    let rows = sqlx::query(
        "SELECT CAST(user_id AS TEXT) AS user_id, username, timestamp \
         FROM poop_tracker \
         WHERE strftime('%Y', timestamp) = ?",
    )
    .bind(year.to_string())
    .fetch_all(pool)
    .await
    .context("failed to query poop_tracker")?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        events.push(EventRecord {
            user_id: row.get("user_id"),
            username: row.get("username"),
            timestamp: row.get("timestamp"),
        });
    }

    Ok(events)
}
