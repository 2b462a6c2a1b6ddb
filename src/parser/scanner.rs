//! Argument scanner for `add` and `mod`.
//!
//! Walks the raw command-line tokens, classifies each by its leading sigil
//! and assembles a [`TaskDraft`]:
//!
//! - `+tag` adds a tag
//! - `!tag` removes a tag (modify only)
//! - `@ <expr>...` sets the date and/or time window
//! - `%N` sets the priority
//!
//! ```
//! use gtask::core::SystemClock;
//! use gtask::parser::{parse_task, Mode};
//!
//! let draft = parse_task(&["Write report", "+work", "%8"], Mode::Add, &SystemClock).unwrap();
//! assert_eq!(draft.description.as_deref(), Some("Write report"));
//! assert_eq!(draft.priority, Some(8));
//! ```

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use tracing::debug;

use super::time::parse_time_window;
use crate::core::{combine, resolve_date, Clock, FixedClock, ResolvedDate, TimeWindow};
use crate::error::ParseError;

/// Priority given to new tasks that name none.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Number of tokens after `@` inspected for the time expression.
pub const LOOKAHEAD: usize = 3;

/// Whether the arguments describe a new task or changes to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `<description> {+tag | @ expr | %prio}*`
    Add,
    /// `<id> {+tag | !tag | @ expr | %prio | description}*`
    Modify,
}

impl Mode {
    const fn valid_prefixes(self) -> &'static str {
        match self {
            Self::Add => "{+, @, %}",
            Self::Modify => "{+, !, @, %}",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Modify => "mod",
        })
    }
}

/// The interpreter's output, before anything is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Target task (modify mode only).
    pub id: Option<i64>,
    /// Description; always set in add mode.
    pub description: Option<String>,
    /// Tags to attach.
    pub tags_to_add: BTreeSet<String>,
    /// Tags to detach (modify mode only).
    pub tags_to_remove: BTreeSet<String>,
    /// Priority. [`DEFAULT_PRIORITY`] unless a `%N` token set it.
    pub priority: Option<i32>,
    /// True if the priority came from a `%N` token rather than the default.
    pub priority_given: bool,
    /// Start (or due) timestamp.
    pub start_at: Option<NaiveDateTime>,
    /// End timestamp, if a range was given.
    pub end_at: Option<NaiveDateTime>,
}

impl TaskDraft {
    /// True if the draft carries a time expression.
    #[must_use]
    pub const fn has_schedule(&self) -> bool {
        self.start_at.is_some()
    }
}

/// A token inside the `@` lookahead window, resolved one way or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeToken {
    Date(ResolvedDate),
    Window(TimeWindow),
}

/// Date and time window collected from one `@` expression.
#[derive(Debug, Default)]
struct TimeExpression {
    date: Option<ResolvedDate>,
    window: Option<TimeWindow>,
}

impl TimeExpression {
    const fn is_empty(&self) -> bool {
        self.date.is_none() && self.window.is_none()
    }

    fn set(&mut self, token: TimeToken) -> Result<(), ParseError> {
        match token {
            TimeToken::Date(date) => {
                if self.date.is_some() {
                    return Err(ParseError::semantic("task date already set"));
                }
                self.date = Some(date);
            },
            TimeToken::Window(window) => {
                if self.window.is_some() {
                    return Err(ParseError::semantic("task timestamp already set"));
                }
                self.window = Some(window);
            },
        }
        Ok(())
    }
}

/// Interpret a task's command-line tokens.
///
/// In [`Mode::Add`] the first token is the description; in [`Mode::Modify`]
/// it is the numeric task id. The clock is read once per call.
///
/// After `@`, up to [`LOOKAHEAD`] tokens are tried as a date, then as a
/// time window. The first of them must resolve. Later ones that resolve to
/// neither are skipped, and scanning resumes after the whole window.
///
/// # Errors
///
/// Fails fast with the first [`ParseError`]: an unknown prefix for the mode,
/// a date, time window, priority or description given twice, a bad id or
/// priority number, or any error from the time expression itself.
pub fn parse_task<S, C>(args: &[S], mode: Mode, clock: &C) -> Result<TaskDraft, ParseError>
where
    S: AsRef<str>,
    C: Clock + ?Sized,
{
    let clock = FixedClock::snapshot(clock);
    let mut draft = TaskDraft::default();

    let Some(head) = args.first().map(AsRef::as_ref) else {
        return Err(ParseError::semantic(match mode {
            Mode::Add => "task description is required",
            Mode::Modify => "task id is required",
        }));
    };
    match mode {
        Mode::Add => {
            if head.trim().is_empty() {
                return Err(ParseError::semantic("task description is required"));
            }
            draft.description = Some(head.to_string());
        },
        Mode::Modify => {
            let id = head
                .parse::<i64>()
                .map_err(|_| ParseError::syntax("task id must be an integer", head))?;
            draft.id = Some(id);
        },
    }

    let mut expr = TimeExpression::default();
    let mut time_seen = false;
    let mut index = 1;

    while index < args.len() {
        let token = args[index].as_ref();
        let mut chars = token.chars();
        let prefix = chars.next();
        let rest = chars.as_str();

        match (prefix, mode) {
            (Some('+'), _) => {
                draft.tags_to_add.insert(tag_name(rest, token)?);
            },
            (Some('!'), Mode::Modify) => {
                draft.tags_to_remove.insert(tag_name(rest, token)?);
            },
            (Some('@'), _) => {
                if time_seen {
                    return Err(ParseError::semantic("task date/timestamp already set"));
                }
                if !rest.is_empty() {
                    return Err(ParseError::syntax(
                        "time expression must be separated from '@'",
                        token,
                    ));
                }
                time_seen = true;
                index = scan_time_window(args, index, &mut expr, &clock)?;
                continue;
            },
            (Some('%'), _) => {
                if draft.priority.is_some() {
                    return Err(ParseError::semantic("task priority already set"));
                }
                if !rest.is_empty() {
                    let priority = rest
                        .parse::<i32>()
                        .map_err(|_| ParseError::syntax("priority must be an integer", token))?;
                    draft.priority = Some(priority);
                    draft.priority_given = true;
                }
            },
            (Some(c), Mode::Modify) if !is_sigil(c) => {
                if draft.description.is_some() {
                    return Err(ParseError::semantic(format!(
                        "task description already set, '{token}' is outside of valid set for {mode} {}",
                        mode.valid_prefixes()
                    )));
                }
                draft.description = Some(token.to_string());
            },
            (Some(c), _) => {
                return Err(ParseError::semantic(format!(
                    "attempts to use invalid prefix '{c}' in '{token}' outside of valid set for {mode} {}",
                    mode.valid_prefixes()
                )));
            },
            (None, _) => {
                return Err(ParseError::semantic(format!(
                    "empty argument outside of valid set for {mode} {}",
                    mode.valid_prefixes()
                )));
            },
        }
        index += 1;
    }

    let schedule = combine(expr.date, expr.window, &clock);
    draft.start_at = schedule.start_at;
    draft.end_at = schedule.end_at;

    if draft.priority.is_none() {
        draft.priority = Some(DEFAULT_PRIORITY);
    }

    debug!(?draft, %mode, "parsed task arguments");
    Ok(draft)
}

const fn is_sigil(c: char) -> bool {
    matches!(c, '+' | '!' | '@' | '%')
}

fn tag_name(name: &str, token: &str) -> Result<String, ParseError> {
    if name.is_empty() {
        return Err(ParseError::syntax("tag name cannot be empty", token));
    }
    Ok(name.to_string())
}

/// Scan the lookahead window following the `@` at `at`.
///
/// Returns the index just past the window, where the main scan resumes.
fn scan_time_window<S: AsRef<str>>(
    args: &[S],
    at: usize,
    expr: &mut TimeExpression,
    clock: &FixedClock,
) -> Result<usize, ParseError> {
    let first = at + 1;
    let last = (first + LOOKAHEAD).min(args.len());
    if first >= last {
        return Err(ParseError::syntax("'@' must be followed by a time expression", "@"));
    }

    for arg in &args[first..last] {
        let token = arg.as_ref();
        match classify_time_token(token, clock) {
            Ok(resolved) => expr.set(resolved)?,
            Err(e) if expr.is_empty() => return Err(e),
            Err(e) => debug!(token, error = %e, "leaving time expression"),
        }
    }
    Ok(last)
}

fn classify_time_token(token: &str, clock: &FixedClock) -> Result<TimeToken, ParseError> {
    let date_err = match resolve_date(token, clock) {
        Ok(date) => return Ok(TimeToken::Date(date)),
        Err(e) => e,
    };
    match parse_time_window(token) {
        Ok(window) => Ok(TimeToken::Window(window)),
        Err(time_err) if looks_like_time(token) => Err(time_err),
        Err(_) => Err(date_err),
    }
}

/// A token made only of time characters, with at most one dash.
fn looks_like_time(token: &str) -> bool {
    !token.is_empty()
        && token.matches('-').count() <= 1
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b':' | b'-' | b'a' | b'A' | b'p' | b'P' | b'm' | b'M'))
}
