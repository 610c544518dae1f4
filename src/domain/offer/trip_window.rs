//! The upcoming weekend trip window.

use std::fmt::Display;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Weekday};

use super::deadline::{next_weekly_deadline, resolve_local, WeeklyAnchor};

const DEPARTURE_HOUR: i64 = 21;
const TRIP_NIGHTS: i64 = 2;

/// Departure and return of the next weekend trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripWindow<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> TripWindow<Tz>
where
    Tz::Offset: Display,
{
    /// Compact label, e.g. `Fri, 23 Oct 9pm – Sun, 25 Oct 9pm`.
    pub fn label(&self) -> String {
        const FORMAT: &str = "%a, %-d %b %-I%P";
        format!(
            "{} – {}",
            self.start.format(FORMAT),
            self.end.format(FORMAT)
        )
    }
}

/// Next Friday 21:00 to Sunday 21:00 in `now`'s timezone.
///
/// Once Friday 21:00 has passed the window rolls to the following weekend.
pub fn weekend_trip_window<Tz: TimeZone>(now: &DateTime<Tz>) -> TripWindow<Tz> {
    let anchor = WeeklyAnchor::at(
        Weekday::Fri,
        NaiveTime::MIN + Duration::hours(DEPARTURE_HOUR),
    );
    let start = next_weekly_deadline(now, anchor);
    let end_local = start.naive_local() + Duration::days(TRIP_NIGHTS);
    let end = resolve_local(&start.timezone(), end_local);
    TripWindow { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn sunday_rolls_to_coming_friday() {
        let now = ist().with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        let window = weekend_trip_window(&now);

        assert_eq!(window.start, ist().with_ymd_and_hms(2026, 10, 23, 21, 0, 0).unwrap());
        assert_eq!(window.end, ist().with_ymd_and_hms(2026, 10, 25, 21, 0, 0).unwrap());
    }

    #[test]
    fn friday_evening_before_departure_is_same_day() {
        let now = ist().with_ymd_and_hms(2026, 10, 23, 20, 59, 0).unwrap();
        let window = weekend_trip_window(&now);
        assert_eq!(window.start, ist().with_ymd_and_hms(2026, 10, 23, 21, 0, 0).unwrap());
    }

    #[test]
    fn friday_after_departure_rolls_a_week() {
        let now = ist().with_ymd_and_hms(2026, 10, 23, 21, 0, 0).unwrap();
        let window = weekend_trip_window(&now);
        assert_eq!(window.start, ist().with_ymd_and_hms(2026, 10, 30, 21, 0, 0).unwrap());
    }

    #[test]
    fn label_is_compact() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        assert_eq!(
            weekend_trip_window(&now).label(),
            "Fri, 23 Oct 9pm – Sun, 25 Oct 9pm"
        );
    }
}
