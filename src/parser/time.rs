//! Parser for 12-hour time expressions: `H[:MM][am|pm][-H[:MM][am|pm]]`.
//!
//! Each half of a range runs through the same small state machine:
//!
//! ```text
//! ExpectHour --digits--> AfterHour --':'--> ExpectMinute --digits--> AfterMinute
//!                            |                   |                       |
//!                            +-------am/pm-------+---------am/pm---------+--> AfterMeridiem
//! ```
//!
//! A dash from any state past `ExpectHour` closes the start half and begins
//! the end half. The end token closes the expression.

use tracing::trace;

use super::lexer::{tokenize, Token, TokenKind};
use crate::core::{TimeOfDay, TimeWindow};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_literal(literal: &str) -> Self {
        if literal.eq_ignore_ascii_case("pm") {
            Self::Pm
        } else {
            Self::Am
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectHour,
    AfterHour,
    ExpectMinute,
    AfterMinute,
    AfterMeridiem,
    Done,
}

/// One side of a time range as written, before 24-hour conversion.
#[derive(Debug, Clone, Copy, Default)]
struct Half {
    hour: u32,
    minute: Option<u32>,
    meridiem: Option<Meridiem>,
}

impl Half {
    fn hour_24(&self) -> u32 {
        match self.meridiem {
            Some(Meridiem::Pm) if self.hour != 12 => self.hour + 12,
            Some(Meridiem::Am) if self.hour == 12 => 0,
            _ => self.hour,
        }
    }
}

/// Parse a time or time range such as `2pm`, `10am-4:15`, or `2-4pm`.
///
/// Hours are 12-hour clock values (1 to 12); minutes need two digits.
/// An end half with no am/pm whose hour is below the start's (24-hour) hour
/// is moved into the afternoon, so `11-1` is 11:00 to 13:00. The start half
/// is never adjusted from the end's marker: `2-4pm` is 02:00 to 16:00.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the violated rule and the full expression:
/// `Lex` for bad characters, `Syntax` for misplaced tokens, `Range` for
/// out-of-bounds values, `Semantic` when the end is not after the start.
pub fn parse_time_window(source: &str) -> Result<TimeWindow, ParseError> {
    let tokens = tokenize(source)?;
    trace!(?tokens, "scanned time expression");

    let mut first: Option<Half> = None;
    let mut current = Half::default();
    let mut state = State::ExpectHour;

    for token in &tokens {
        state = match (state, token.kind) {
            (State::ExpectHour, TokenKind::Digits) => {
                current.hour = parse_hour(token, source)?;
                State::AfterHour
            },
            (State::ExpectHour, TokenKind::End) if first.is_some() => {
                return Err(ParseError::syntax("expected an hour after the dash", source));
            },
            (State::ExpectHour, TokenKind::End) => {
                return Err(ParseError::syntax("time expression requires an hour", source));
            },
            (State::ExpectHour | State::AfterMinute, TokenKind::Colon) => {
                return Err(ParseError::syntax("colon is expected after hour, not minute", source));
            },
            (State::ExpectHour, TokenKind::Dash) => {
                return Err(ParseError::syntax(
                    "dashes require an hour and cannot be duplicated",
                    source,
                ));
            },
            (State::ExpectHour, TokenKind::Meridiem) => {
                return Err(ParseError::syntax(
                    "'am'/'pm' cannot occur without an hour nor can there be duplicates",
                    source,
                ));
            },

            (State::AfterHour, TokenKind::Digits) => {
                return Err(ParseError::syntax(
                    "minutes must be separated by colon from hours",
                    source,
                ));
            },
            (State::AfterHour, TokenKind::Colon) => State::ExpectMinute,

            (State::ExpectMinute, TokenKind::Digits) => {
                current.minute = Some(parse_minute(token, source)?);
                State::AfterMinute
            },
            (State::ExpectMinute, TokenKind::Colon) => {
                return Err(ParseError::syntax(
                    "colons cannot be duplicated for same hour, minute combination",
                    source,
                ));
            },

            (State::AfterMinute, TokenKind::Digits) => {
                return Err(ParseError::syntax("minutes cannot be duplicated", source));
            },

            (State::AfterMeridiem, TokenKind::Digits) => {
                return Err(ParseError::syntax(
                    "hours and minutes cannot come after 'am'/'pm' signature",
                    source,
                ));
            },
            (State::AfterMeridiem, TokenKind::Colon) => {
                return Err(ParseError::syntax("colon can never occur after 'am' or 'pm'", source));
            },
            (State::AfterMeridiem, TokenKind::Meridiem) => {
                return Err(ParseError::syntax(
                    "'am'/'pm' cannot occur without an hour nor can there be duplicates",
                    source,
                ));
            },

            (State::AfterHour | State::ExpectMinute | State::AfterMinute, TokenKind::Meridiem) => {
                current.meridiem = Some(Meridiem::from_literal(token.literal));
                State::AfterMeridiem
            },
            (
                State::AfterHour | State::ExpectMinute | State::AfterMinute | State::AfterMeridiem,
                TokenKind::Dash,
            ) => {
                if first.is_some() {
                    return Err(ParseError::syntax(
                        "dashes require an hour and cannot be duplicated",
                        source,
                    ));
                }
                first = Some(std::mem::take(&mut current));
                State::ExpectHour
            },
            (
                State::AfterHour | State::ExpectMinute | State::AfterMinute | State::AfterMeridiem,
                TokenKind::End,
            ) => State::Done,

            (State::Done, _) => break,
        };
    }

    let window = match first {
        Some(start) => build_range(start, current, source)?,
        None => TimeWindow::at(build_start(current, source)?),
    };
    trace!(?window, source, "parsed time expression");
    Ok(window)
}

fn parse_hour(token: &Token<'_>, source: &str) -> Result<u32, ParseError> {
    match token.literal.parse::<u32>() {
        Ok(hour) if (1..=12).contains(&hour) => Ok(hour),
        _ => Err(ParseError::range("hours must be between 1 and 12", source)),
    }
}

fn parse_minute(token: &Token<'_>, source: &str) -> Result<u32, ParseError> {
    if token.literal.len() != 2 {
        return Err(ParseError::syntax("minutes require 2 digits", source));
    }
    match token.literal.parse::<u32>() {
        Ok(minute) if minute <= 59 => Ok(minute),
        _ => Err(ParseError::range("minutes cannot be greater than 59", source)),
    }
}

fn build_start(half: Half, source: &str) -> Result<TimeOfDay, ParseError> {
    TimeOfDay::new(half.hour_24(), half.minute.unwrap_or(0))
        .ok_or_else(|| ParseError::range("time of day out of range", source))
}

fn build_range(start: Half, end: Half, source: &str) -> Result<TimeWindow, ParseError> {
    let start = build_start(start, source)?;

    let end_hour = match end.meridiem {
        Some(_) => end.hour_24(),
        None if end.hour < start.hour() => end.hour + 12,
        None => end.hour,
    };

    TimeOfDay::new(end_hour, end.minute.unwrap_or(0))
        .and_then(|end| TimeWindow::between(start, end))
        .ok_or_else(|| {
            ParseError::semantic(format!(
                "starting time must be earlier than ending time: {source}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(window: &TimeWindow) -> ((u32, u32), Option<(u32, u32)>) {
        (
            (window.start().hour(), window.start().minute()),
            window.end().map(|e| (e.hour(), e.minute())),
        )
    }

    fn parse(source: &str) -> ((u32, u32), Option<(u32, u32)>) {
        hm(&parse_time_window(source).unwrap())
    }

    // ===================
    // Single Times
    // ===================

    #[test]
    fn test_every_twelve_hour_value() {
        for hour in 1..=12 {
            assert_eq!(parse(&format!("{hour}am")), ((hour % 12, 0), None));
            assert_eq!(parse(&format!("{hour}pm")), ((hour % 12 + 12, 0), None));
            assert_eq!(parse(&format!("{hour}PM")), ((hour % 12 + 12, 0), None));
        }
    }

    #[test]
    fn test_unmarked_hour_is_literal() {
        assert_eq!(parse("9"), ((9, 0), None));
        assert_eq!(parse("12"), ((12, 0), None));
    }

    #[test]
    fn test_minutes() {
        assert_eq!(parse("2:30pm"), ((14, 30), None));
        assert_eq!(parse("12:05am"), ((0, 5), None));
        assert_eq!(parse("7:00"), ((7, 0), None));
    }

    #[test]
    fn test_meridiem_case_insensitive() {
        assert_eq!(parse("3pM"), ((15, 0), None));
        assert_eq!(parse("12Am"), ((0, 0), None));
    }

    // ===================
    // Ranges
    // ===================

    #[test]
    fn test_both_halves_marked() {
        assert_eq!(parse("2:30pm-4:45pm"), ((14, 30), Some((16, 45))));
        assert_eq!(parse("10am-4pm"), ((10, 0), Some((16, 0))));
    }

    #[test]
    fn test_end_marker_does_not_move_start() {
        assert_eq!(parse("2-4pm"), ((2, 0), Some((16, 0))));
    }

    #[test]
    fn test_unmarked_smaller_end_moves_to_afternoon() {
        assert_eq!(parse("10am-4:15"), ((10, 0), Some((16, 15))));
        assert_eq!(parse("11-1"), ((11, 0), Some((13, 0))));
        assert_eq!(parse("2pm-4"), ((14, 0), Some((16, 0))));
    }

    #[test]
    fn test_unmarked_larger_end_is_literal() {
        assert_eq!(parse("9-11"), ((9, 0), Some((11, 0))));
        assert_eq!(parse("12am-1"), ((0, 0), Some((1, 0))));
    }

    #[test]
    fn test_end_must_follow_start() {
        assert!(matches!(parse_time_window("4pm-2pm"), Err(ParseError::Semantic(_))));
        assert!(matches!(parse_time_window("3-3"), Err(ParseError::Semantic(_))));
        assert!(matches!(parse_time_window("2:30-2:30"), Err(ParseError::Semantic(_))));
        // 12 after 2pm would land past midnight
        assert!(matches!(parse_time_window("2pm-12"), Err(ParseError::Semantic(_))));
    }

    #[test]
    fn test_ordering_error_message() {
        let err = parse_time_window("5pm-1pm").unwrap_err();
        assert_eq!(
            err.to_string(),
            "starting time must be earlier than ending time: 5pm-1pm"
        );
    }

    // ===================
    // Rejections
    // ===================

    #[test]
    fn test_hour_out_of_range() {
        assert!(matches!(parse_time_window("14"), Err(ParseError::Range { .. })));
        assert!(matches!(parse_time_window("0"), Err(ParseError::Range { .. })));
        assert!(matches!(parse_time_window("2-13"), Err(ParseError::Range { .. })));
    }

    #[test]
    fn test_minute_out_of_range() {
        assert!(matches!(parse_time_window("2:60"), Err(ParseError::Range { .. })));
    }

    #[test]
    fn test_minute_needs_two_digits() {
        assert!(matches!(parse_time_window("2:3pm"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_duplicate_colon() {
        let err = parse_time_window("2::30pm").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.to_string().contains("2::30pm"));
    }

    #[test]
    fn test_colon_placement() {
        assert!(matches!(parse_time_window(":30"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2:30:15"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2pm:30"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_digits_need_colon() {
        assert!(matches!(parse_time_window("120"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2:304"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_meridiem_placement() {
        assert!(matches!(parse_time_window("pm"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2pmam"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2pm3"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_dash_placement() {
        assert!(matches!(parse_time_window("-4"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("1-2-3"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window("2-"), Err(ParseError::Syntax { .. })));
        assert!(matches!(parse_time_window(""), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_lex_errors_surface() {
        assert!(matches!(parse_time_window("2 pm"), Err(ParseError::Lex { .. })));
        assert!(matches!(parse_time_window("tmrw"), Err(ParseError::Lex { .. })));
    }
}
