use std::fmt::{Debug, Formatter};

use chrono::{DateTime, TimeDelta, Utc};

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Utc>,

    /// Exclusive.
    pub end: DateTime<Utc>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, other: DateTime<Utc>) -> bool {
        (self.start <= other) && (other < self.end)
    }

    /// Number of days the interval spans, any started day counting as a whole one.
    ///
    /// Empty and reversed intervals span zero days.
    #[must_use]
    pub fn n_days(self) -> i64 {
        let millis = self.duration().num_milliseconds();
        if millis <= 0 { 0 } else { (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY }
    }

    /// Number of whole hours, rounded up, between the interval start and `now`.
    ///
    /// This is the look-back window needed to fetch a series covering the interval.
    #[must_use]
    pub fn hours_since_start(self, now: DateTime<Utc>) -> u32 {
        let millis = (now - self.start).num_milliseconds().max(0);
        u32::try_from((millis + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR).unwrap_or(u32::MAX).max(1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_contains_is_half_open() {
        let interval = Interval::new(at(1, 0), at(2, 0));
        assert!(interval.contains(at(1, 0)));
        assert!(interval.contains(at(1, 23)));
        assert!(!interval.contains(at(2, 0)));
    }

    #[test]
    fn test_n_days_whole() {
        assert_eq!(Interval::new(at(1, 0), at(30, 0)).n_days(), 29);
    }

    #[test]
    fn test_n_days_partial_rounds_up() {
        assert_eq!(Interval::new(at(1, 0), at(1, 1)).n_days(), 1);
        assert_eq!(Interval::new(at(1, 0), at(18, 13)).n_days(), 18);
    }

    #[test]
    fn test_n_days_empty_or_reversed() {
        assert_eq!(Interval::new(at(1, 0), at(1, 0)).n_days(), 0);
        assert_eq!(Interval::new(at(2, 0), at(1, 0)).n_days(), 0);
    }

    #[test]
    fn test_hours_since_start() {
        let interval = Interval::new(at(1, 0), at(2, 0));
        assert_eq!(interval.hours_since_start(at(2, 0)), 24);
        assert_eq!(interval.hours_since_start(at(1, 0)), 1);
    }

    #[test]
    fn test_rounding_up_by_a_millisecond() {
        let start = at(1, 0);
        let end = start + TimeDelta::days(2) + TimeDelta::milliseconds(1);
        let interval = Interval::new(start, end);
        assert_eq!(interval.n_days(), 3);
        assert_eq!(interval.hours_since_start(start + TimeDelta::minutes(61)), 2);
    }
}
