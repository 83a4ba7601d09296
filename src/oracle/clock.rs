//! Authoritative calendar date for the puzzle

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Default offset of the puzzle day from UTC, in hours
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -6;

/// Source of "today" for the word store
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock read in a fixed UTC offset, so every player rolls over
/// at the same instant
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    #[must_use]
    pub const fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Clock for a whole-hour offset, `None` if outside ±23 hours
    #[must_use]
    pub fn from_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours.checked_mul(3600)?).map(Self::new)
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Self::new(Utc.fix()))
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
