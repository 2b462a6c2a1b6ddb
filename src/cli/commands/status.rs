//! `gt done`, `gt undo` and `gt delete`.

use std::io::{BufRead, Write};

use tracing::info;

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::Error;
use crate::output::{format_summary, pluralize, Action, Summary};
use crate::storage::Database;

/// Mark tasks finished. Tasks that already are get reported and skipped.
///
/// # Errors
///
/// Returns an error if any id does not exist or the update fails.
pub fn done<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    ids: &[i64],
    format: OutputFormat,
) -> Result<String, Error> {
    set_status(db, clock, ids, true, format)
}

/// Mark tasks unfinished. Tasks that already are get reported and skipped.
///
/// # Errors
///
/// Returns an error if any id does not exist or the update fails.
pub fn undo<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    ids: &[i64],
    format: OutputFormat,
) -> Result<String, Error> {
    set_status(db, clock, ids, false, format)
}

fn set_status<C: Clock + ?Sized>(
    db: &Database,
    clock: &C,
    ids: &[i64],
    finished: bool,
    format: OutputFormat,
) -> Result<String, Error> {
    let now = clock.now();
    let mut summary = Summary {
        action: if finished {
            Action::Finished
        } else {
            Action::Reopened
        },
        ids: Vec::new(),
        skipped: Vec::new(),
    };

    for &id in ids {
        let task = db.get_task(id)?;
        if task.finished == finished {
            summary.skipped.push(id);
            continue;
        }
        db.set_finished(id, finished, now)?;
        summary.ids.push(id);
    }

    info!(changed = summary.ids.len(), skipped = summary.skipped.len(), finished, "updated status");
    format_summary(&summary, format)
}

/// Delete tasks, asking first when `confirm` is set.
///
/// Every id is checked before the prompt so a typo never deletes a partial
/// set. Anything but `y`/`yes` aborts without deleting.
///
/// # Errors
///
/// Returns an error if any id does not exist, the prompt cannot be
/// written or read, or a delete fails.
pub fn delete<R: BufRead, W: Write>(
    db: &Database,
    ids: &[i64],
    confirm: bool,
    input: &mut R,
    prompt: &mut W,
    format: OutputFormat,
) -> Result<String, Error> {
    let mut unique = Vec::with_capacity(ids.len());
    for &id in ids {
        db.get_task(id)?;
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    let mut summary = Summary {
        action: Action::Deleted,
        ids: Vec::new(),
        skipped: Vec::new(),
    };

    if confirm && !ask(input, prompt, &unique)? {
        info!("delete aborted");
        return format_summary(&summary, format);
    }

    for id in unique {
        db.delete_task(id)?;
        summary.ids.push(id);
    }
    info!(deleted = summary.ids.len(), "deleted tasks");
    format_summary(&summary, format)
}

fn ask<R: BufRead, W: Write>(input: &mut R, prompt: &mut W, ids: &[i64]) -> Result<bool, Error> {
    let list = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    write!(prompt, "Delete {} ({list})? [y/n] ", pluralize(ids.len(), "task"))?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;

    use super::*;
    use crate::core::FixedClock;
    use crate::storage::TaskFilter;
    use crate::task::NewTask;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 11, 13)
                .and_then(|d| d.and_hms_opt(10, 30, 0))
                .unwrap(),
        )
    }

    fn seed(db: &Database, count: usize) {
        for n in 0..count {
            let task = NewTask {
                description: format!("task {n}"),
                priority: 5,
                tags: Vec::new(),
                start_at: None,
                end_at: None,
            };
            db.add_task(&task, clock().0).unwrap();
        }
    }

    // ===== done / undo =====

    #[test]
    fn test_done_skips_finished() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 2);
        done(&db, &clock(), &[1], OutputFormat::Pretty).unwrap();

        let output = done(&db, &clock(), &[1, 2], OutputFormat::Pretty).unwrap();
        assert!(output.contains("Task 1 is already finished."));
        assert!(output.contains("Finished 1 task."));

        let task = db.get_task(2).unwrap();
        assert!(task.finished);
        assert_eq!(task.completed_at, Some(clock().0));
    }

    #[test]
    fn test_undo() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 1);
        done(&db, &clock(), &[1], OutputFormat::Pretty).unwrap();

        let output = undo(&db, &clock(), &[1], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["action"], "reopened");
        assert_eq!(value["ids"][0], 1);

        let task = db.get_task(1).unwrap();
        assert!(!task.finished);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_done_missing_id() {
        let db = Database::open_in_memory().unwrap();
        let err = done(&db, &clock(), &[5], OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, Error::NotFound(5)));
    }

    // ===== delete =====

    #[test]
    fn test_delete_confirmed() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 2);
        let mut input = Cursor::new("y\n");
        let mut prompt = Vec::new();

        let output = delete(&db, &[1, 2], true, &mut input, &mut prompt, OutputFormat::Pretty)
            .unwrap();

        assert_eq!(String::from_utf8(prompt).unwrap(), "Delete 2 tasks (1, 2)? [y/n] ");
        assert_eq!(output, "Deleted 2 tasks.");
        assert!(db.list_tasks(TaskFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_delete_declined() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 1);
        let mut input = Cursor::new("n\n");
        let mut prompt = Vec::new();

        let output =
            delete(&db, &[1], true, &mut input, &mut prompt, OutputFormat::Pretty).unwrap();

        assert_eq!(output, "Deleted 0 tasks.");
        assert!(db.get_task(1).is_ok());
    }

    #[test]
    fn test_delete_without_confirmation() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 1);
        let mut input = Cursor::new("");
        let mut prompt = Vec::new();

        delete(&db, &[1, 1], false, &mut input, &mut prompt, OutputFormat::Pretty).unwrap();

        assert!(prompt.is_empty());
        assert!(db.get_task(1).is_err());
    }

    #[test]
    fn test_delete_checks_ids_first() {
        let db = Database::open_in_memory().unwrap();
        seed(&db, 1);
        let mut input = Cursor::new("y\n");
        let mut prompt = Vec::new();

        let err = delete(&db, &[1, 9], false, &mut input, &mut prompt, OutputFormat::Pretty)
            .unwrap_err();

        assert!(matches!(err, Error::NotFound(9)));
        assert!(db.get_task(1).is_ok());
    }
}
