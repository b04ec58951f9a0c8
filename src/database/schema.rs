//! Request store schema
//!
//! - `users`: reporters and managers
//! - `requests`: one row per tracked request; `created_at` is ISO text
//!   (`YYYY-MM-DD HH:MM:SS`) so date-range filters compare textually
//!
//! Insert order follows the foreign keys: `users` before `requests`.

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Initialise the schema (idempotent)
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            role TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS requests (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            reporter_id INTEGER NOT NULL REFERENCES users(id),
            assignee_id INTEGER REFERENCES users(id),
            progress_status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        -- Period reports filter on status then creation time
        CREATE INDEX IF NOT EXISTS idx_requests_status_created
            ON requests(progress_status, created_at);

        -- Per-manager reports and rankings
        CREATE INDEX IF NOT EXISTS idx_requests_assignee
            ON requests(assignee_id, progress_status, created_at);
        "#,
    )?;

    debug!("Request store schema ready");
    Ok(())
}
