//! Recurring weekly deadlines.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Weekday};
use thiserror::Error;

/// Errors raised when building clock anchors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("anchor hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),
}

/// A fixed weekday and hour, e.g. "Thursday 12:00".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyAnchor {
    weekday: Weekday,
    time: NaiveTime,
}

impl WeeklyAnchor {
    pub fn new(weekday: Weekday, hour: u32) -> Result<Self, ClockError> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or(ClockError::InvalidHour(hour))?;
        Ok(Self { weekday, time })
    }

    pub fn at(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }
}

/// Next occurrence of `anchor` strictly after `now`, in `now`'s timezone.
///
/// On the anchor day before the anchor time the deadline is later the same
/// day. At or after the anchor time it rolls a full week ahead.
pub fn next_weekly_deadline<Tz: TimeZone>(now: &DateTime<Tz>, anchor: WeeklyAnchor) -> DateTime<Tz> {
    let tz = now.timezone();
    let local = now.naive_local();

    let today = i64::from(local.weekday().num_days_from_monday());
    let target = i64::from(anchor.weekday.num_days_from_monday());
    let mut days_ahead = (target - today).rem_euclid(7);
    if days_ahead == 0 && local.time() >= anchor.time {
        days_ahead = 7;
    }

    let date = local.date() + Duration::days(days_ahead);
    let candidate = resolve_local(&tz, date.and_time(anchor.time));
    if candidate > *now {
        candidate
    } else {
        // Only reachable around a DST transition.
        resolve_local(&tz, (date + Duration::days(7)).and_time(anchor.time))
    }
}

/// Resolves a wall-clock time, taking the earlier instant on a fold and
/// skipping forward an hour across a gap.
pub(super) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}
