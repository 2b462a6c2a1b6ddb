//! Calendar dates and times of day used by task time expressions.
//!
//! The date resolver maps a single token (`tmrw`, `fri`, `2024-12-25`, ...)
//! to a [`ResolvedDate`]. Times of day come out of the time-range parser in
//! `crate::parser::time` as a [`TimeWindow`].

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::clock::Clock;
use crate::error::ParseError;

/// Accepted explicit date formats, tried in order.
pub const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%Y-%m-%d"];

/// A wall-clock time within a single day.
///
/// Ordering compares hour first, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
}

impl TimeOfDay {
    /// Build a time of day, or `None` if `hour > 23` or `minute > 59`.
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            None
        } else {
            Some(Self { hour, minute })
        }
    }

    /// Hour in 24-hour form.
    #[must_use]
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute of the hour.
    #[must_use]
    pub const fn minute(&self) -> u32 {
        self.minute
    }

    /// Convert to a chrono time with zero seconds.
    #[must_use]
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A start time with an optional, strictly later end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: Option<TimeOfDay>,
}

impl TimeWindow {
    /// A window with only a start time.
    #[must_use]
    pub const fn at(start: TimeOfDay) -> Self {
        Self { start, end: None }
    }

    /// A window from `start` to `end`, or `None` unless `start < end`.
    #[must_use]
    pub fn between(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self {
            start,
            end: Some(end),
        })
    }

    /// Start of the window.
    #[must_use]
    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    /// End of the window, if one was given.
    #[must_use]
    pub const fn end(&self) -> Option<TimeOfDay> {
        self.end
    }
}

/// A calendar date produced from a keyword or an explicit date.
///
/// Keywords carry an implied time of day (23:59 for `eod`, `tmrw`, the
/// weekdays; the current instant for `now`). Explicit dates sit at 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate(NaiveDateTime);

impl ResolvedDate {
    /// The calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// The date together with its implied time of day.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.0
    }
}

/// Resolve a single token to a calendar date.
///
/// Keywords are matched case-sensitively: `eod`, `now`, `tmrw`, `yest`,
/// `eow`, and the three-letter weekdays `sun` through `sat`. Weekdays pick
/// the next occurrence, today included. Anything else must match one of
/// [`DATE_FORMATS`].
///
/// # Errors
///
/// Returns [`ParseError::Format`] if the token is neither a keyword nor an
/// accepted date.
pub fn resolve_date<C: Clock + ?Sized>(token: &str, clock: &C) -> Result<ResolvedDate, ParseError> {
    let now = clock.now();
    let end_of_day = now.date().and_time(end_of_day_time());

    let resolved = match token {
        "eod" => end_of_day,
        "now" => now,
        "tmrw" => end_of_day + Duration::days(1),
        "yest" => end_of_day - Duration::days(1),
        _ => {
            if let Some(weekday) = keyword_weekday(token) {
                end_of_day + Duration::days(days_until(now.date().weekday(), weekday))
            } else {
                return parse_explicit_date(token)
                    .map(|date| ResolvedDate(date.and_time(NaiveTime::MIN)))
                    .ok_or_else(|| ParseError::Format(token.to_string()));
            }
        },
    };

    Ok(ResolvedDate(resolved))
}

fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

fn keyword_weekday(token: &str) -> Option<Weekday> {
    match token {
        "eow" | "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        _ => None,
    }
}

/// Days from `today` forward to `target`, in `0..7`.
fn days_until(today: Weekday, target: Weekday) -> i64 {
    (i64::from(target.num_days_from_sunday()) - i64::from(today.num_days_from_sunday()) + 7) % 7
}

fn parse_explicit_date(token: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter(|format| fits_layout(token, format))
        .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
}

/// True if `token` has exactly the digit positions of `format`: two digits
/// for `%d` and `%m`, four for `%Y`. chrono alone would accept `1-2-24`.
fn fits_layout(token: &str, format: &str) -> bool {
    let mut expected = String::with_capacity(10);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('%', Some('Y')) => {
                expected.push_str("0000");
                chars.next();
            },
            ('%', Some('d' | 'm')) => {
                expected.push_str("00");
                chars.next();
            },
            _ => expected.push(c),
        }
    }

    token.len() == expected.len()
        && token.bytes().zip(expected.bytes()).all(|(t, e)| {
            if e == b'0' {
                t.is_ascii_digit()
            } else {
                t == e
            }
        })
}
