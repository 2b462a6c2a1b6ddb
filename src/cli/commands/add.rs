//! `gt add` and `gt mod`.
//!
//! Both hand their raw tokens to the argument scanner and persist the
//! resulting draft.

use colored::Colorize;
use tracing::info;

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::Error;
use crate::output::{format_window, to_json};
use crate::parser::{parse_task, Mode};
use crate::storage::Database;
use crate::task::{NewTask, Task};

/// Lowest accepted priority.
pub const MIN_PRIORITY: i32 = 1;
/// Highest accepted priority.
pub const MAX_PRIORITY: i32 = 10;

fn validate_priority(priority: i32) -> Result<(), Error> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {priority}"
        )))
    }
}

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the tokens do not parse, the priority is out of
/// range, or the insert fails.
pub fn add<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    tokens: &[String],
    format: OutputFormat,
) -> Result<String, Error> {
    let draft = parse_task(tokens, Mode::Add, clock)?;
    let new_task = NewTask::from_draft(&draft)
        .ok_or_else(|| Error::InvalidInput("task description is required".to_string()))?;
    validate_priority(new_task.priority)?;

    let id = db.add_task(&new_task, clock.now())?;
    info!(id, "added task");
    let task = db.get_task(id)?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(describe(&task, "Created:")),
    }
}

/// Execute the mod command.
///
/// # Errors
///
/// Returns an error if the tokens do not parse, the task does not exist,
/// the priority is out of range, or the update fails.
pub fn modify<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    tokens: &[String],
    format: OutputFormat,
) -> Result<String, Error> {
    let draft = parse_task(tokens, Mode::Modify, clock)?;
    let id = draft
        .id
        .ok_or_else(|| Error::InvalidInput("task id is required".to_string()))?;
    if let Some(priority) = draft.priority.filter(|_| draft.priority_given) {
        validate_priority(priority)?;
    }

    let mut task = db.get_task(id)?;
    task.apply(&draft);
    db.update_task(&task, clock.now())?;
    info!(id, "modified task");
    let task = db.get_task(id)?;

    match format {
        OutputFormat::Json => to_json(&task),
        OutputFormat::Pretty => Ok(describe(&task, "Modified:")),
    }
}

fn describe(task: &Task, label: &str) -> String {
    let mut output = format!(
        "{} {} (ID: {})",
        label.green().bold(),
        task.description,
        task.id.to_string().dimmed()
    );

    let window = format_window(task.start_at, task.end_at);
    if !window.is_empty() {
        output.push_str(&format!("\n  {}: {}", "When".dimmed(), window));
    }
    if !task.tags.is_empty() {
        output.push_str(&format!("\n  {}: {}", "Tags".dimmed(), task.tags.join(", ")));
    }
    output.push_str(&format!("\n  {}: {}", "Priority".dimmed(), task.priority));
    output
}
