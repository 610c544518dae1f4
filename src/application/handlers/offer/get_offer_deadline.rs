//! GetOfferDeadlineHandler - Query for the weekly booking deadline and offer timer.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::domain::foundation::Clock;
use crate::domain::offer::{
    next_weekly_deadline, remaining, weekend_trip_window, Countdown, OfferCountdown, WeeklyAnchor,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferDeadlineView {
    pub now: DateTime<FixedOffset>,
    pub deadline: DateTime<FixedOffset>,
    /// Full time left until the deadline.
    pub remaining: Countdown,
    pub total_hours: u64,
    /// The capped promotional timer.
    pub offer: OfferCountdown,
    pub trip_window: String,
}

pub struct GetOfferDeadlineHandler {
    clock: Arc<dyn Clock>,
    anchor: WeeklyAnchor,
    display_offset: FixedOffset,
}

impl GetOfferDeadlineHandler {
    pub fn new(clock: Arc<dyn Clock>, anchor: WeeklyAnchor, display_offset: FixedOffset) -> Self {
        Self {
            clock,
            anchor,
            display_offset,
        }
    }

    pub fn handle(&self) -> OfferDeadlineView {
        let now = self.clock.now().with_timezone(&self.display_offset);
        let deadline = next_weekly_deadline(&now, self.anchor);
        let left = remaining(&deadline, &now);

        OfferDeadlineView {
            remaining: left,
            total_hours: left.total_hours(),
            offer: OfferCountdown::compute(&deadline, &now),
            trip_window: weekend_trip_window(&now).label(),
            now,
            deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{display_offset, FixedClock};
    use crate::domain::offer::UrgencyLevel;
    use chrono::{TimeZone, Utc, Weekday};

    fn handler_at(utc: DateTime<Utc>) -> GetOfferDeadlineHandler {
        GetOfferDeadlineHandler::new(
            Arc::new(FixedClock::at(utc)),
            WeeklyAnchor::new(Weekday::Thu, 12).unwrap(),
            display_offset(330),
        )
    }

    #[test]
    fn thursday_morning_counts_down_to_noon() {
        // Thursday 2026-10-22 11:00 IST.
        let view = handler_at(Utc.with_ymd_and_hms(2026, 10, 22, 5, 30, 0).unwrap()).handle();

        assert_eq!(view.deadline.to_rfc3339(), "2026-10-22T12:00:00+05:30");
        assert_eq!(view.total_hours, 1);
        assert_eq!(view.offer.urgency, UrgencyLevel::Medium);
        assert!(!view.offer.expired);
    }

    #[test]
    fn sunday_counts_down_to_coming_thursday() {
        // Sunday 2026-10-18 10:00 IST.
        let view = handler_at(Utc.with_ymd_and_hms(2026, 10, 18, 4, 30, 0).unwrap()).handle();

        assert_eq!(view.deadline.to_rfc3339(), "2026-10-22T12:00:00+05:30");
        assert_eq!(view.remaining.days, 4);
        assert_eq!(view.remaining.hours, 2);
        assert_eq!(view.offer.countdown.hours, 2);
        assert_eq!(view.offer.urgency, UrgencyLevel::Low);
        assert_eq!(view.trip_window, "Fri, 23 Oct 9pm – Sun, 25 Oct 9pm");
    }
}
