//! Time source for relative date keywords and default-date composition.

use chrono::{Local, NaiveDateTime};

/// Supplies the current instant.
///
/// The interpreter never reads the system clock directly; callers hand it a
/// `Clock` so tests can pin "now" to a fixed instant.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Snapshot another clock once.
    pub fn snapshot<C: Clock + ?Sized>(clock: &C) -> Self {
        Self(clock.now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
