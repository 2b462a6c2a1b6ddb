//! JSON output formatting for gtask.

use serde::Serialize;
use serde_json::json;

use super::Summary;
use crate::error::Error;
use crate::task::Task;

/// Format tasks as JSON.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[Task], list_name: &str) -> Result<String, Error> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a batch outcome as JSON.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn format_summary_json(summary: &Summary) -> Result<String, Error> {
    to_json(summary)
}

/// Generic JSON formatter for any serializable type.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(value)?)
}
