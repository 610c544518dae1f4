//! Countdown decomposition and the capped offer timer.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Remaining time split into display components. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    /// Whole hours remaining, days included.
    pub fn total_hours(&self) -> u64 {
        self.days * 24 + self.hours
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }
}

/// Time left until `target`, clamped to zero once `target` has passed.
///
/// The countdown does not advance the target; callers recompute it.
pub fn remaining<Tz: TimeZone, Tz2: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz2>) -> Countdown {
    let secs = target
        .clone()
        .signed_duration_since(now.clone())
        .num_seconds()
        .max(0);
    Countdown::from_secs(secs as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

/// The promotional offer timer.
///
/// Shows at most a two hour window regardless of how far away the real
/// deadline is, and grows more urgent as it runs down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OfferCountdown {
    pub countdown: Countdown,
    pub urgency: UrgencyLevel,
    pub expired: bool,
}

impl OfferCountdown {
    pub const MAX_WINDOW_SECS: u64 = 2 * SECS_PER_HOUR;

    pub fn compute<Tz: TimeZone, Tz2: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz2>) -> Self {
        let left = remaining(target, now).total_seconds();
        if left == 0 {
            return Self {
                countdown: Countdown::default(),
                urgency: UrgencyLevel::High,
                expired: true,
            };
        }

        let capped = left.min(Self::MAX_WINDOW_SECS);
        let urgency = if capped <= 30 * SECS_PER_MINUTE {
            UrgencyLevel::High
        } else if capped <= 60 * SECS_PER_MINUTE {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        };

        Self {
            countdown: Countdown::from_secs(capped),
            urgency,
            expired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, h, m, s).unwrap()
    }

    #[test]
    fn remaining_decomposes_components() {
        let now = at(0, 0, 0);
        let target = now + Duration::days(2) + Duration::hours(3) + Duration::seconds(125);
        let left = remaining(&target, &now);

        assert_eq!(
            left,
            Countdown {
                days: 2,
                hours: 3,
                minutes: 2,
                seconds: 5
            }
        );
        assert_eq!(left.total_hours(), 51);
    }

    #[test]
    fn remaining_is_zero_once_target_passed() {
        let left = remaining(&at(10, 0, 0), &at(11, 0, 0));
        assert!(left.is_zero());
        assert_eq!(left, Countdown::default());
    }

    #[test]
    fn offer_countdown_caps_at_two_hours() {
        let now = at(0, 0, 0);
        let offer = OfferCountdown::compute(&(now + Duration::days(3)), &now);

        assert_eq!(offer.countdown.total_seconds(), OfferCountdown::MAX_WINDOW_SECS);
        assert_eq!(offer.countdown.days, 0);
        assert_eq!(offer.urgency, UrgencyLevel::Low);
        assert!(!offer.expired);
    }

    #[test]
    fn offer_urgency_thresholds() {
        let now = at(0, 0, 0);
        let urgency = |mins: i64| OfferCountdown::compute(&(now + Duration::minutes(mins)), &now).urgency;

        assert_eq!(urgency(30), UrgencyLevel::High);
        assert_eq!(urgency(31), UrgencyLevel::Medium);
        assert_eq!(urgency(60), UrgencyLevel::Medium);
        assert_eq!(urgency(61), UrgencyLevel::Low);
    }

    #[test]
    fn offer_expires_at_target() {
        let now = at(12, 0, 0);
        let offer = OfferCountdown::compute(&now, &now);
        assert!(offer.expired);
        assert!(offer.countdown.is_zero());
    }
}
