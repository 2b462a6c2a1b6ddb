use chrono::NaiveDateTime;
use colored::Colorize;

use super::Summary;
use crate::task::Task;

const DATE_TIME: &str = "%Y-%m-%d %H:%M";

/// "1 task", "3 tasks".
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Render a task's window as `start`, `start–end`, or `start – end`
/// when it crosses days.
#[must_use]
pub fn format_window(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> String {
    match (start, end) {
        (None, _) => String::new(),
        (Some(start), None) => start.format(DATE_TIME).to_string(),
        (Some(start), Some(end)) if start.date() == end.date() => {
            format!("{}–{}", start.format(DATE_TIME), end.format("%H:%M"))
        },
        (Some(start), Some(end)) => {
            format!("{} – {}", start.format(DATE_TIME), end.format(DATE_TIME))
        },
    }
}

fn status_icon(task: &Task) -> colored::ColoredString {
    if task.finished {
        "[x]".green()
    } else {
        "[ ]".white()
    }
}

fn tag_list(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("+{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a list of tasks as aligned rows.
#[must_use]
pub fn format_tasks_pretty(tasks: &[Task], title: &str, now: NaiveDateTime) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 tasks)\n  No tasks");
    }

    let id_width = tasks
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut output = format!("{title} ({})\n", pluralize(tasks.len(), "task"));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        let mut line = format!(
            "{:>id_width$} {} {} {}",
            task.id.to_string().dimmed(),
            status_icon(task),
            format!("p{:<2}", task.priority).magenta(),
            task.description.bold(),
        );

        let window = format_window(task.start_at, task.end_at);
        if !window.is_empty() {
            let window = if task.is_overdue(now) {
                window.red()
            } else {
                window.yellow()
            };
            line.push_str(&format!("  {window}"));
        }

        if !task.tags.is_empty() {
            line.push_str(&format!("  {}", tag_list(&task.tags).cyan()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single task with its notes.
#[must_use]
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task), task.description.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), task.priority));

    let window = format_window(task.start_at, task.end_at);
    if !window.is_empty() {
        output.push_str(&format!("  {}: {}\n", "When".dimmed(), window));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), tag_list(&task.tags)));
    }

    if let Some(completed) = task.completed_at {
        output.push_str(&format!(
            "  {}: {}\n",
            "Completed".dimmed(),
            completed.format(DATE_TIME)
        ));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Updated".dimmed(),
        task.updated_at.format(DATE_TIME)
    ));

    if !task.notes.is_empty() {
        output.push_str(&format!("  {}:\n", "Notes".dimmed()));
        for note in &task.notes {
            output.push_str(&format!("    - {note}\n"));
        }
    }

    output
}

/// Format the outcome of a batch operation.
#[must_use]
pub fn format_summary_pretty(summary: &Summary) -> String {
    let mut lines = Vec::new();
    for id in &summary.skipped {
        lines.push(
            format!("Task {id} is already {}.", summary.action.state())
                .yellow()
                .to_string(),
        );
    }
    lines.push(format!(
        "{} {}.",
        summary.action.verb(),
        pluralize(summary.ids.len(), "task")
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::output::Action;

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, day)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn make_task(id: i64, description: &str) -> Task {
        Task {
            id,
            description: description.to_string(),
            priority: 5,
            tags: Vec::new(),
            notes: Vec::new(),
            start_at: None,
            end_at: None,
            updated_at: at(13, 8),
            completed_at: None,
            finished: false,
        }
    }

    // ===== Helpers =====

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0, "task"), "0 tasks");
        assert_eq!(pluralize(1, "task"), "1 task");
        assert_eq!(pluralize(2, "task"), "2 tasks");
    }

    #[test]
    fn test_format_window() {
        assert_eq!(format_window(None, None), "");
        assert_eq!(format_window(Some(at(13, 14)), None), "2024-11-13 14:00");
        assert_eq!(
            format_window(Some(at(13, 14)), Some(at(13, 16))),
            "2024-11-13 14:00–16:00"
        );
        assert_eq!(
            format_window(Some(at(13, 23)), Some(at(14, 1))),
            "2024-11-13 23:00 – 2024-11-14 01:00"
        );
    }

    // ===== Lists =====

    #[test]
    fn test_format_tasks_pretty_empty_list() {
        let output = format_tasks_pretty(&[], "Due", at(13, 8));
        assert!(output.contains("Due (0 tasks)"));
        assert!(output.contains("No tasks"));
    }

    #[test]
    fn test_format_tasks_pretty_rows() {
        let mut task = make_task(3, "write report");
        task.tags = vec!["work".to_string()];
        task.start_at = Some(at(13, 14));
        let mut done = make_task(4, "buy milk");
        done.finished = true;

        let output = format_tasks_pretty(&[task, done], "Tasks", at(13, 8));

        assert!(output.contains("Tasks (2 tasks)"));
        assert!(output.contains("[ ]"));
        assert!(output.contains("[x]"));
        assert!(output.contains("write report"));
        assert!(output.contains("2024-11-13 14:00"));
        assert!(output.contains("+work"));
        assert!(output.contains("buy milk"));
    }

    // ===== Details =====

    #[test]
    fn test_format_task_pretty_with_notes() {
        let mut task = make_task(7, "plan trip");
        task.notes = vec!["book hotel".to_string(), "check trains".to_string()];
        task.tags = vec!["travel".to_string()];

        let output = format_task_pretty(&task);

        assert!(output.contains("plan trip"));
        assert!(output.contains(": 7"));
        assert!(output.contains("+travel"));
        assert!(output.contains("- book hotel"));
        assert!(output.contains("- check trains"));
    }

    #[test]
    fn test_format_task_pretty_completed() {
        let mut task = make_task(1, "x");
        task.finished = true;
        task.completed_at = Some(at(13, 9));

        let output = format_task_pretty(&task);
        assert!(output.contains("[x]"));
        assert!(output.contains("2024-11-13 09:00"));
    }

    // ===== Summaries =====

    #[test]
    fn test_format_summary_pretty() {
        let summary = Summary {
            action: Action::Finished,
            ids: vec![1, 2],
            skipped: vec![3],
        };
        let output = format_summary_pretty(&summary);
        assert!(output.contains("Task 3 is already finished."));
        assert!(output.ends_with("Finished 2 tasks."));
    }

    #[test]
    fn test_format_summary_pretty_single() {
        let summary = Summary {
            action: Action::Deleted,
            ids: vec![9],
            skipped: Vec::new(),
        };
        assert_eq!(format_summary_pretty(&summary), "Deleted 1 task.");
    }
}
