//! Wall-clock access, injectable for tests.

use std::cell::Cell;

use chrono::{Local, NaiveDate, Utc};

/// Source of the local calendar day and the current instant.
pub trait Clock {
    /// Today's date in the visitor's local time zone.
    fn today(&self) -> NaiveDate;

    /// Milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> i64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<NaiveDate>,
    millis: Cell<i64>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(today: NaiveDate, epoch_millis: i64) -> Self {
        Self {
            today: Cell::new(today),
            millis: Cell::new(epoch_millis),
        }
    }

    pub fn set_today(&self, today: NaiveDate) {
        self.today.set(today);
    }

    pub fn advance_millis(&self, millis: i64) {
        self.millis.set(self.millis.get() + millis);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }

    fn epoch_millis(&self) -> i64 {
        self.millis.get()
    }
}

impl<T: Clock + ?Sized> Clock for std::rc::Rc<T> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }

    fn epoch_millis(&self) -> i64 {
        (**self).epoch_millis()
    }
}
