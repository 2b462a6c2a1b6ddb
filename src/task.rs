//! The persisted task record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::parser::{TaskDraft, DEFAULT_PRIORITY};

/// A stored task with its tags and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Database id.
    pub id: i64,
    /// What needs doing.
    pub description: String,
    /// 1 (lowest) to 10 (highest).
    pub priority: i32,
    /// Tag names, sorted.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Notes in creation order.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Start (or due) time.
    pub start_at: Option<NaiveDateTime>,
    /// End time, if the task spans a window.
    pub end_at: Option<NaiveDateTime>,
    /// Last modification.
    pub updated_at: NaiveDateTime,
    /// When the task was finished.
    pub completed_at: Option<NaiveDateTime>,
    /// Whether the task is done.
    pub finished: bool,
}

/// Fields for inserting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// What needs doing.
    pub description: String,
    /// Priority.
    pub priority: i32,
    /// Tag names.
    pub tags: Vec<String>,
    /// Start (or due) time.
    pub start_at: Option<NaiveDateTime>,
    /// End time.
    pub end_at: Option<NaiveDateTime>,
}

impl NewTask {
    /// Build an insertable task from an add-mode draft.
    ///
    /// Returns `None` if the draft has no description.
    #[must_use]
    pub fn from_draft(draft: &TaskDraft) -> Option<Self> {
        Some(Self {
            description: draft.description.clone()?,
            priority: draft.priority.unwrap_or(DEFAULT_PRIORITY),
            tags: draft.tags_to_add.iter().cloned().collect(),
            start_at: draft.start_at,
            end_at: draft.end_at,
        })
    }
}

impl Task {
    /// Apply a modify-mode draft to this task.
    ///
    /// A new time expression replaces both timestamps. Tags are added
    /// before removals are applied. The priority only changes when the
    /// draft names one explicitly.
    pub fn apply(&mut self, draft: &TaskDraft) {
        if let Some(description) = &draft.description {
            self.description.clone_from(description);
        }
        if let Some(priority) = draft.priority.filter(|_| draft.priority_given) {
            self.priority = priority;
        }
        if draft.has_schedule() {
            self.start_at = draft.start_at;
            self.end_at = draft.end_at;
        }
        for tag in &draft.tags_to_add {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
        self.tags.retain(|t| !draft.tags_to_remove.contains(t));
        self.tags.sort();
    }

    /// True if the task is unfinished and its start time has passed.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.finished && self.start_at.is_some_and(|at| at < now)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 13)
            .and_then(|d| d.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    fn task() -> Task {
        Task {
            id: 1,
            description: "write report".to_string(),
            priority: 5,
            tags: vec!["old".to_string(), "work".to_string()],
            notes: Vec::new(),
            start_at: Some(at(9)),
            end_at: Some(at(10)),
            updated_at: at(8),
            completed_at: None,
            finished: false,
        }
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_new_task_from_draft() {
        let draft = TaskDraft {
            description: Some("buy milk".to_string()),
            tags_to_add: set(&["errands"]),
            priority: Some(3),
            start_at: Some(at(14)),
            ..TaskDraft::default()
        };
        let new = NewTask::from_draft(&draft).unwrap();
        assert_eq!(new.description, "buy milk");
        assert_eq!(new.priority, 3);
        assert_eq!(new.tags, vec!["errands"]);
        assert_eq!(new.start_at, Some(at(14)));
        assert_eq!(new.end_at, None);
    }

    #[test]
    fn test_new_task_needs_description() {
        assert!(NewTask::from_draft(&TaskDraft::default()).is_none());
    }

    #[test]
    fn test_apply_tags() {
        let mut task = task();
        let draft = TaskDraft {
            id: Some(1),
            tags_to_add: set(&["home", "work"]),
            tags_to_remove: set(&["old"]),
            ..TaskDraft::default()
        };
        task.apply(&draft);
        assert_eq!(task.tags, vec!["home", "work"]);
        assert_eq!(task.priority, 5);
        assert_eq!(task.description, "write report");
    }

    #[test]
    fn test_apply_schedule_replaces_both() {
        let mut task = task();
        let draft = TaskDraft {
            id: Some(1),
            description: Some("renamed".to_string()),
            start_at: Some(at(15)),
            ..TaskDraft::default()
        };
        task.apply(&draft);
        assert_eq!(task.description, "renamed");
        assert_eq!(task.start_at, Some(at(15)));
        assert_eq!(task.end_at, None);
    }

    #[test]
    fn test_apply_keeps_priority_without_explicit_value() {
        let mut task = task();
        task.priority = 9;
        let draft = TaskDraft {
            id: Some(1),
            priority: Some(DEFAULT_PRIORITY),
            ..TaskDraft::default()
        };
        task.apply(&draft);
        assert_eq!(task.priority, 9);

        let draft = TaskDraft {
            id: Some(1),
            priority: Some(2),
            priority_given: true,
            ..TaskDraft::default()
        };
        task.apply(&draft);
        assert_eq!(task.priority, 2);
    }

    #[test]
    fn test_overdue() {
        let mut task = task();
        assert!(task.is_overdue(at(12)));
        assert!(!task.is_overdue(at(7)));
        task.finished = true;
        assert!(!task.is_overdue(at(12)));
    }
}
