//! Task repository on top of [`Database`].

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::Database;
use crate::error::Error;
use crate::task::{NewTask, Task};

/// Which tasks to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Unfinished tasks.
    Pending,
    /// Finished tasks.
    Finished,
}

impl TaskFilter {
    const fn where_clause(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Pending => "WHERE finished = 0",
            Self::Finished => "WHERE finished = 1",
        }
    }
}

const TASK_COLUMNS: &str =
    "id, description, priority, start_at, end_at, updated_at, completed_at, finished";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
        priority: row.get(2)?,
        tags: Vec::new(),
        notes: Vec::new(),
        start_at: row.get(3)?,
        end_at: row.get(4)?,
        updated_at: row.get(5)?,
        completed_at: row.get(6)?,
        finished: row.get(7)?,
    })
}

impl Database {
    /// Insert a task with its tags and return the new id.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub fn add_task(&self, task: &NewTask, now: NaiveDateTime) -> Result<i64, Error> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO task (description, priority, start_at, end_at, updated_at, finished)
             VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            params![task.description, task.priority, task.start_at, task.end_at, now],
        )
        .map_err(|e| Error::Database(format!("Failed to insert task: {e}")))?;
        let id = tx.last_insert_rowid();

        replace_tags(&tx, id, &task.tags)?;
        tx.commit()?;

        debug!(id, "inserted task");
        Ok(id)
    }

    /// Fetch a task with its tags and notes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no task has this id.
    pub fn get_task(&self, id: i64) -> Result<Task, Error> {
        let mut task = self
            .conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM task WHERE id = ?1"),
                [id],
                task_from_row,
            )
            .optional()
            .map_err(|e| Error::Database(format!("Failed to query task {id}: {e}")))?
            .ok_or(Error::NotFound(id))?;

        task.tags = self.task_tags(id)?;
        task.notes = self.task_notes(id)?;
        Ok(task)
    }

    /// List tasks ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, Error> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM task {} ORDER BY id",
            filter.where_clause()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut tasks = stmt
            .query_map([], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(format!("Failed to list tasks: {e}")))?;

        for task in &mut tasks {
            task.tags = self.task_tags(task.id)?;
            task.notes = self.task_notes(task.id)?;
        }
        Ok(tasks)
    }

    /// Write back description, priority, timestamps and tags.
    ///
    /// The stored tag set becomes exactly `task.tags`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist.
    pub fn update_task(&self, task: &Task, now: NaiveDateTime) -> Result<(), Error> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx
            .execute(
                "UPDATE task
                 SET description = ?2, priority = ?3, start_at = ?4, end_at = ?5, updated_at = ?6
                 WHERE id = ?1",
                params![
                    task.id,
                    task.description,
                    task.priority,
                    task.start_at,
                    task.end_at,
                    now
                ],
            )
            .map_err(|e| Error::Database(format!("Failed to update task {}: {e}", task.id)))?;
        if changed == 0 {
            return Err(Error::NotFound(task.id));
        }

        replace_tags(&tx, task.id, &task.tags)?;
        tx.commit()?;

        debug!(id = task.id, "updated task");
        Ok(())
    }

    /// Attach a note to a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist.
    pub fn add_note(&self, id: i64, note: &str) -> Result<(), Error> {
        self.ensure_exists(id)?;
        self.conn
            .execute(
                "INSERT INTO note (task_id, comment) VALUES (?1, ?2)",
                params![id, note],
            )
            .map_err(|e| Error::Database(format!("Failed to add note to task {id}: {e}")))?;
        debug!(id, "added note");
        Ok(())
    }

    /// Mark a task finished (stamping `completed_at`) or unfinished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist.
    pub fn set_finished(&self, id: i64, finished: bool, now: NaiveDateTime) -> Result<(), Error> {
        let completed_at = finished.then_some(now);
        let changed = self
            .conn
            .execute(
                "UPDATE task SET finished = ?2, completed_at = ?3, updated_at = ?4 WHERE id = ?1",
                params![id, finished, completed_at, now],
            )
            .map_err(|e| Error::Database(format!("Failed to update status of task {id}: {e}")))?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        debug!(id, finished, "updated status");
        Ok(())
    }

    /// Delete a task with its notes and tag links.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the task does not exist.
    pub fn delete_task(&self, id: i64) -> Result<(), Error> {
        let changed = self
            .conn
            .execute("DELETE FROM task WHERE id = ?1", [id])
            .map_err(|e| Error::Database(format!("Failed to delete task {id}: {e}")))?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        debug!(id, "deleted task");
        Ok(())
    }

    fn ensure_exists(&self, id: i64) -> Result<(), Error> {
        let exists: bool = self
            .conn
            .query_row("SELECT EXISTS(SELECT 1 FROM task WHERE id = ?1)", [id], |row| {
                row.get(0)
            })?;
        if exists {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }

    fn task_tags(&self, id: i64) -> Result<Vec<String>, Error> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT t.name FROM tag t
             JOIN tag_pair p ON p.tag_id = t.id
             WHERE p.task_id = ?1
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(tags)
    }

    fn task_notes(&self, id: i64) -> Result<Vec<String>, Error> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT comment FROM note WHERE task_id = ?1 ORDER BY id")?;
        let notes = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(notes)
    }
}

fn replace_tags(conn: &Connection, id: i64, tags: &[String]) -> Result<(), Error> {
    conn.execute("DELETE FROM tag_pair WHERE task_id = ?1", [id])?;
    for tag in tags {
        conn.execute("INSERT OR IGNORE INTO tag (name) VALUES (?1)", [tag])?;
        conn.execute(
            "INSERT OR IGNORE INTO tag_pair (task_id, tag_id)
             SELECT ?1, id FROM tag WHERE name = ?2",
            params![id, tag],
        )?;
    }
    Ok(())
}
