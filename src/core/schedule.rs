//! Combining a resolved date and a time window into task timestamps.

use chrono::NaiveDateTime;

use super::clock::Clock;
use super::datetime::{ResolvedDate, TimeWindow};

/// Absolute start/end timestamps for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    /// When the task starts (or is due).
    pub start_at: Option<NaiveDateTime>,
    /// When the task ends, if a range was given.
    pub end_at: Option<NaiveDateTime>,
}

impl Schedule {
    /// True if neither timestamp is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_at.is_none() && self.end_at.is_none()
    }
}

/// Produce final timestamps from an optional date and an optional window.
///
/// - date and window: the date's day at the window's times
/// - date only: the date's own timestamp, no end
/// - window only: today at the window's times
/// - neither: an empty schedule
pub fn combine<C: Clock + ?Sized>(
    date: Option<ResolvedDate>,
    window: Option<TimeWindow>,
    clock: &C,
) -> Schedule {
    match (date, window) {
        (Some(date), None) => Schedule {
            start_at: Some(date.timestamp()),
            end_at: None,
        },
        (date, Some(window)) => {
            let day = date.map_or_else(|| clock.now().date(), |d| d.date());
            Schedule {
                start_at: Some(day.and_time(window.start().to_naive_time())),
                end_at: window.end().map(|end| day.and_time(end.to_naive_time())),
            }
        },
        (None, None) => Schedule::default(),
    }
}
