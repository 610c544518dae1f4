//! Time source for the booking pipeline.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Source of the current instant.
///
/// Handlers take a clock instead of calling `Utc::now()` so booking dates
/// and countdowns can be pinned in tests.
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds the display offset for a number of minutes east of UTC.
///
/// Out-of-range offsets fall back to UTC.
pub fn display_offset(minutes_east: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes_east.saturating_mul(60)).unwrap_or(Utc.fix())
}
