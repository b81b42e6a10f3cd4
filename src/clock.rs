use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
///
/// The resolver and classifier never read the wall clock themselves; the
/// caller supplies "today" through this capability so tests can pin
/// arbitrary dates.
pub trait Clock: Send + Sync {
    /// The current date at day granularity (no time-of-day component).
    fn today(&self) -> NaiveDate;
}

/// Wall-clock dates in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
