//! Calendar date source.
//!
//! Statistics are keyed by local calendar date. The store asks a [`Clock`]
//! for "today" instead of reading the system time directly, so tests can
//! move through days deterministically.

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDate};

/// Provides the current local date.
pub trait Clock {
    /// Today's date in the user's local timezone.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a given date that can be advanced manually.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    /// Create a clock that reports `date` until advanced.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    /// Move the clock forward by `days`.
    pub fn advance_days(&self, days: i64) {
        self.date.set(self.date.get() + Duration::days(days));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advance() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), start);

        clock.advance_days(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
    }

    #[test]
    fn test_shared_clock_sees_updates() {
        let clock = std::rc::Rc::new(FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        ));
        let shared = std::rc::Rc::clone(&clock);

        clock.advance_days(1);
        assert_eq!(shared.today(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
