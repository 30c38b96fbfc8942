use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_current_feed_table(conn)?;
    create_timeline_versions_table(conn)?;
    Ok(())
}

fn create_current_feed_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS current_feed (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            payload TEXT NOT NULL,
            fetched_at TEXT NOT NULL
        )",
        [],
    )
    .context("Failed to create current_feed table")?;

    Ok(())
}

fn create_timeline_versions_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS timeline_versions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            payload TEXT NOT NULL,
            recorded_at TEXT NOT NULL,
            changes INTEGER NOT NULL DEFAULT 0,
            source TEXT NOT NULL DEFAULT 'refresh'
        )",
        [],
    )
    .context("Failed to create timeline_versions table")?;

    Ok(())
}
