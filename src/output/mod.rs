//! Output formatting for gtask.
//!
//! Every command result is rendered either as colored text or as JSON.

mod json;
mod pretty;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::Error;
use crate::task::Task;

pub use json::*;
pub use pretty::*;

/// What a batch command did to its tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Marked finished.
    Finished,
    /// Marked unfinished again.
    Reopened,
    /// Removed.
    Deleted,
}

impl Action {
    /// Capitalized verb for summary lines.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Finished => "Finished",
            Self::Reopened => "Reopened",
            Self::Deleted => "Deleted",
        }
    }

    /// The state a skipped task is already in.
    #[must_use]
    pub const fn state(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Reopened => "pending",
            Self::Deleted => "deleted",
        }
    }
}

/// Outcome of `done`, `undo`, or `delete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// What was done.
    pub action: Action,
    /// Tasks that changed.
    pub ids: Vec<i64>,
    /// Tasks left alone because they were already in the target state.
    pub skipped: Vec<i64>,
}

/// Format a task list based on output format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[Task],
    title: &str,
    format: OutputFormat,
    now: NaiveDateTime,
) -> Result<String, Error> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title, now)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format task details based on output format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn format_task_details(tasks: &[Task], format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Pretty => Ok(tasks
            .iter()
            .map(format_task_pretty)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(tasks),
    }
}

/// Format a batch outcome based on output format.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn format_summary(summary: &Summary, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => format_summary_json(summary),
    }
}
