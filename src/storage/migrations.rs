//! Database migrations for gtask.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;
use tracing::debug;

use crate::error::Error;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, Error> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| Error::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), Error> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| Error::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), Error> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), Error> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(Error::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: tasks, notes, and tags.
fn migrate_v1(conn: &Connection) -> Result<(), Error> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS task (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL,
            priority INTEGER NOT NULL,
            start_at TEXT,
            end_at TEXT,
            updated_at TEXT NOT NULL,
            completed_at TEXT,
            finished INTEGER NOT NULL DEFAULT 0 CHECK (finished IN (0, 1))
        );

        -- Notes are append-only
        CREATE TABLE IF NOT EXISTS note (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id INTEGER NOT NULL REFERENCES task (id) ON DELETE CASCADE,
            comment TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_note_task ON note(task_id);

        CREATE TABLE IF NOT EXISTS tag (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS tag_pair (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id INTEGER NOT NULL REFERENCES task (id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tag (id),
            UNIQUE (task_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_tag_pair_task ON tag_pair(task_id);
        ",
    )
    .map_err(|e| Error::Database(format!("Migration v1 failed: {e}")))
}
