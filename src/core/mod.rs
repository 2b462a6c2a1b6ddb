//! Core date/time abstractions for gtask.
//!
//! This module provides the clock capability, the date resolver, and the
//! combiner that turns a date plus a time window into task timestamps.

pub mod clock;
mod datetime;
mod schedule;

pub use clock::{Clock, FixedClock, SystemClock};
pub use datetime::{resolve_date, ResolvedDate, TimeOfDay, TimeWindow, DATE_FORMATS};
pub use schedule::{combine, Schedule};
