//! Command implementations for gtask.
//!
//! Each command returns its rendered output; `main` prints it.

mod add;
mod status;

pub use add::{add, modify, MAX_PRIORITY, MIN_PRIORITY};
pub use status::{delete, done, undo};

use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;

use crate::cli::args::{Cli, OutputFormat};
use crate::core::Clock;
use crate::error::Error;
use crate::output::{format_task_details, format_tasks};
use crate::storage::{Database, TaskFilter};

/// Execute list command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn list<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    format: OutputFormat,
) -> Result<String, Error> {
    let tasks = db.list_tasks(TaskFilter::All)?;
    format_tasks(&tasks, "Tasks", format, clock.now())
}

/// Execute due command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn due<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    format: OutputFormat,
) -> Result<String, Error> {
    let tasks = db.list_tasks(TaskFilter::Pending)?;
    format_tasks(&tasks, "Due", format, clock.now())
}

/// Execute archived command
///
/// # Errors
///
/// Returns an error if the query or output formatting fails.
pub fn archived<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    format: OutputFormat,
) -> Result<String, Error> {
    let tasks = db.list_tasks(TaskFilter::Finished)?;
    format_tasks(&tasks, "Archived", format, clock.now())
}

/// Execute get command
///
/// # Errors
///
/// Returns an error if any id does not exist.
pub fn get(db: &Database, ids: &[i64], format: OutputFormat) -> Result<String, Error> {
    let tasks = ids
        .iter()
        .map(|&id| db.get_task(id))
        .collect::<Result<Vec<_>, _>>()?;
    format_task_details(&tasks, format)
}

/// Execute note command
///
/// # Errors
///
/// Returns an error if the note is empty or the task does not exist.
pub fn note(db: &Database, id: i64, words: &[String], format: OutputFormat) -> Result<String, Error> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("note text is empty".to_string()));
    }
    db.add_note(id, &text)?;

    match format {
        OutputFormat::Json => crate::output::to_json(&db.get_task(id)?),
        OutputFormat::Pretty => Ok(format!("{} task {id}", "Noted:".green().bold())),
    }
}

/// Generate shell completions for the specified shell.
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "gt", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
